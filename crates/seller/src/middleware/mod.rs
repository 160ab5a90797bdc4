//! HTTP middleware stack for the seller service.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Body limit (multipart uploads)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, RequireSession, clear_current_user, set_current_user};
pub use request_id::{RequestId, request_id_middleware};
pub use session::{create_session_layer, session_layer};
