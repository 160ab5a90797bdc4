//! Session-related types.
//!
//! The identity provider signs users in and stores a [`listing_core::User`]
//! under [`keys::CURRENT_USER`] in the shared session store. This service
//! only reads that entry (and removes it on logout).

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}
