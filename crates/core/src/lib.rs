//! Listing Core - Shared domain types.
//!
//! This crate provides the types used across the listing components:
//! - `seller` - Product submission service (HTTP, storage, auth gate)
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Collaborator traits and their backends live in the
//! `seller` crate.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, users, categories, price parsing, drafts and records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
