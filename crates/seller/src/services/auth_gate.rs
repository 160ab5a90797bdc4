//! Authentication gate.
//!
//! An [`AuthGate`] subscribes to an [`AuthProvider`]'s notification stream
//! and resolves once:
//!
//! ```text
//! Pending ──first notification──▶ Authenticated(user) | Unauthenticated
//! ```
//!
//! Only the first notification is acted upon. The stream is dropped right
//! after it (which unsubscribes), so later sign-outs or sign-ins within the
//! gate's lifetime are not observed. If the provider never notifies, the gate
//! stays `Pending`.
//!
//! The resolved gate is the only way to obtain an [`AuthenticatedSession`],
//! which the submission workflow requires up front.

use futures::StreamExt;
use futures::stream::BoxStream;
use listing_core::{Uid, User};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_sessions::Session;

use crate::models::session_keys;

/// Stream of authentication notifications. `None` means signed out.
pub type AuthStream = BoxStream<'static, Option<User>>;

/// Source of "auth state changed" notifications.
///
/// Dropping the returned stream unsubscribes.
pub trait AuthProvider: Send + Sync {
    /// Subscribe to authentication state changes.
    fn subscribe(&self) -> AuthStream;
}

impl<F> AuthProvider for F
where
    F: Fn() -> AuthStream + Send + Sync,
{
    fn subscribe(&self) -> AuthStream {
        self()
    }
}

/// Resolution state of an [`AuthGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No notification received yet.
    Pending,
    /// The first notification carried a signed-in user.
    Authenticated(User),
    /// The first notification carried no user.
    Unauthenticated,
}

impl AuthState {
    /// Whether the gate is still waiting for its first notification.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The signed-in user, if authenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Proof that a user was authenticated when the gate resolved.
///
/// Only constructible from a resolved [`AuthGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    user: User,
}

impl AuthenticatedSession {
    /// The authenticated user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// The authenticated user's identifier.
    #[must_use]
    pub const fn uid(&self) -> &Uid {
        &self.user.uid
    }
}

/// Single-shot subscription to an [`AuthProvider`].
///
/// Dropping or disposing the gate stops the listener; no state changes are
/// published afterwards.
#[derive(Debug)]
pub struct AuthGate {
    state: watch::Receiver<AuthState>,
    listener: JoinHandle<()>,
}

impl AuthGate {
    /// Subscribe to `provider` and start listening for the first notification.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn activate(provider: &dyn AuthProvider) -> Self {
        let mut notifications = provider.subscribe();
        let (tx, rx) = watch::channel(AuthState::Pending);

        let listener = tokio::spawn(async move {
            if let Some(user) = notifications.next().await {
                let resolved = user.map_or(AuthState::Unauthenticated, AuthState::Authenticated);
                tracing::debug!(
                    authenticated = matches!(resolved, AuthState::Authenticated(_)),
                    "auth gate resolved"
                );
                tx.send_replace(resolved);
            }
        });

        Self {
            state: rx,
            listener,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Whether the gate is still waiting for its first notification.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.state.borrow().is_resolving()
    }

    /// The signed-in user, if the gate resolved to authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user().cloned()
    }

    /// A receiver that observes state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.clone()
    }

    /// Wait until the gate leaves `Pending`.
    ///
    /// Returns `Pending` only if the provider's stream ended without ever
    /// notifying; otherwise this waits as long as the provider does.
    pub async fn resolved(&mut self) -> AuthState {
        let resolved = self
            .state
            .wait_for(|state| !state.is_resolving())
            .await
            .map(|state| state.clone());
        resolved.unwrap_or_else(|_closed| self.state.borrow().clone())
    }

    /// Session handle for the authenticated user, if any.
    #[must_use]
    pub fn session(&self) -> Option<AuthenticatedSession> {
        self.current_user().map(|user| AuthenticatedSession { user })
    }

    /// Stop listening. Equivalent to dropping the gate.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for AuthGate {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Provider reading the signed-in user from the request session.
///
/// Emits exactly one notification: the user stored under
/// [`session_keys::CURRENT_USER`], or `None`.
#[derive(Clone)]
pub struct SessionAuthProvider {
    session: Session,
}

impl SessionAuthProvider {
    /// Create a provider over a request session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl AuthProvider for SessionAuthProvider {
    fn subscribe(&self) -> AuthStream {
        let session = self.session.clone();
        futures::stream::once(async move {
            session
                .get::<User>(session_keys::CURRENT_USER)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "failed to read session user");
                    None
                })
        })
        .boxed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use futures::channel::mpsc;

    use super::*;

    fn once(user: Option<User>) -> impl Fn() -> AuthStream + Send + Sync {
        move || futures::stream::once(futures::future::ready(user.clone())).boxed()
    }

    #[tokio::test]
    async fn test_resolves_to_authenticated() {
        let mut gate = AuthGate::activate(&once(Some(User::new("u1"))));
        let state = gate.resolved().await;
        assert_eq!(state, AuthState::Authenticated(User::new("u1")));
        assert!(!gate.is_resolving());
        assert_eq!(gate.session().unwrap().uid().as_str(), "u1");
    }

    #[tokio::test]
    async fn test_resolves_to_unauthenticated() {
        let mut gate = AuthGate::activate(&once(None));
        assert_eq!(gate.resolved().await, AuthState::Unauthenticated);
        assert!(gate.session().is_none());
        assert!(gate.current_user().is_none());
    }

    #[tokio::test]
    async fn test_pending_until_first_notification() {
        let (tx, rx) = mpsc::unbounded::<Option<User>>();
        let rx = Mutex::new(Some(rx));
        let provider = move || -> AuthStream {
            match rx.lock().unwrap().take() {
                Some(rx) => rx.boxed(),
                None => futures::stream::empty().boxed(),
            }
        };

        let mut gate = AuthGate::activate(&provider);
        tokio::task::yield_now().await;
        assert_eq!(gate.state(), AuthState::Pending);
        assert!(gate.is_resolving());

        tx.unbounded_send(Some(User::new("late"))).unwrap();
        assert_eq!(
            gate.resolved().await,
            AuthState::Authenticated(User::new("late"))
        );
    }

    #[tokio::test]
    async fn test_closed_stream_without_notification_stays_pending() {
        let provider = || -> AuthStream { futures::stream::empty().boxed() };
        let mut gate = AuthGate::activate(&provider);
        assert_eq!(gate.resolved().await, AuthState::Pending);
        assert!(gate.session().is_none());
    }
}
