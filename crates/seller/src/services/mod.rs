//! Business logic services for the seller service.
//!
//! # Services
//!
//! - `auth_gate` - Resolves whether the current session is authenticated
//! - `submission` - Upload-then-persist product submission workflow

pub mod auth_gate;
pub mod submission;

pub use auth_gate::{
    AuthGate, AuthProvider, AuthState, AuthStream, AuthenticatedSession, SessionAuthProvider,
};
pub use submission::{
    SubmissionError, SubmissionResult, SubmissionWorkflow, SubmittedProduct, ValidationError,
};
