//! Authentication route handlers.
//!
//! Sign-in is handled by the external identity provider, which writes the
//! current user into the shared session. This service only signs out.

use axum::{extract::State, response::Redirect};
use tower_sessions::Session;

use crate::error::{Result, clear_sentry_user};
use crate::middleware::clear_current_user;
use crate::state::AppState;

/// Handle logout.
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    clear_sentry_user();
    Ok(Redirect::to(&state.config().login_path))
}
