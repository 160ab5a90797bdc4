//! Core types for product listings.
//!
//! This module provides type-safe wrappers for the listing domain.

pub mod category;
pub mod document;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use category::{Category, CategoryError};
pub use document::{Document, FieldValue};
pub use id::*;
pub use price::parse_price;
pub use product::{ImageFile, ProductDraft, ProductRecord};
pub use user::User;
