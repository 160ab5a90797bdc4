//! HTTP route handlers for the seller service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//! GET  /uploads/*              - Uploaded images (local object store)
//!
//! # Products (requires auth)
//! GET  /products/new           - Add-product form
//! POST /products               - Submit the form (multipart)
//!
//! # Auth
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products/new", get(products::new_product))
        .route("/products", post(products::create))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/logout", post(auth::logout))
}

/// All application routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .nest("/auth", auth_routes())
}
