//! Authenticated user identity.

use serde::{Deserialize, Serialize};

use super::id::Uid;

/// An identity handle issued by the external identity provider.
///
/// The listing service never owns users; it only holds this handle for the
/// lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by the identity provider.
    pub uid: Uid,
    /// Email address, if the provider shared one.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, if the provider shared one.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl User {
    /// Create a user handle with only an identifier.
    #[must_use]
    pub fn new(uid: impl Into<Uid>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }
}
