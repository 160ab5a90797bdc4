//! Authentication extractor.
//!
//! [`RequireSession`] runs an [`AuthGate`] over the request session and
//! hands the handler an [`AuthenticatedSession`]. Handlers behind it never
//! see an unauthenticated request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use listing_core::User;
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::models::session_keys;
use crate::services::{AuthGate, AuthState, AuthenticatedSession, SessionAuthProvider};
use crate::state::AppState;

/// Extractor that requires a signed-in seller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(session): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", session.uid())
/// }
/// ```
pub struct RequireSession(pub AuthenticatedSession);

/// Rejection when the auth gate does not resolve to a signed-in user.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page (for HTML requests).
    RedirectToLogin(String),
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// The gate never resolved.
    Unavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(path) => Redirect::to(&path).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        let mut gate = AuthGate::activate(&SessionAuthProvider::new(session));
        let resolved = gate.resolved().await;

        match resolved {
            AuthState::Authenticated(user) => {
                set_sentry_user(&user.uid, user.email.as_deref());
                gate.session().map(Self).ok_or(AuthRejection::Unavailable)
            }
            AuthState::Unauthenticated if parts.uri.path().starts_with("/api/") => {
                Err(AuthRejection::Unauthorized)
            }
            AuthState::Unauthenticated => Err(AuthRejection::RedirectToLogin(
                state.config().login_path.clone(),
            )),
            AuthState::Pending => {
                tracing::warn!("auth gate closed without resolving");
                Err(AuthRejection::Unavailable)
            }
        }
    }
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the signed-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<User>(session_keys::CURRENT_USER).await?;
    Ok(())
}
