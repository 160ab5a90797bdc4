//! Domain models for the seller service.

pub mod form;
pub mod session;

pub use form::ProductForm;
pub use session::keys as session_keys;
