//! Session middleware configuration.
//!
//! Sessions live in `PostgreSQL` via tower-sessions. The identity provider
//! that signs sellers in writes the current user into the session; this
//! service only reads it (and removes it on logout).

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::SellerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "listing_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The `tower_sessions` table is created by the CLI's `migrate` command.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &SellerConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());
    session_layer(store, config.base_url.starts_with("https://"))
}

/// Session layer over any store, with the service's cookie settings.
#[must_use]
pub fn session_layer<S: SessionStore>(store: S, secure: bool) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
