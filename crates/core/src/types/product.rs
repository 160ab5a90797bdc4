//! Product draft (form state) and the record it produces.

use bytes::Bytes;
use serde::{Serialize, Serializer};

use super::category::Category;
use super::document::{Document, FieldValue};
use super::id::Uid;
use super::price::parse_price;

/// An image selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original filename as supplied by the client.
    pub name: String,
    /// MIME type reported by the client, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl ImageFile {
    /// Create an image handle.
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// In-progress listing form state.
///
/// Each field is set independently; there is no cross-field validation and no
/// derived state. `price` is kept as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub category: Option<Category>,
    pub status: String,
    pub image: Option<ImageFile>,
}

impl ProductDraft {
    /// An empty draft, as when the form first mounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    pub const fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn set_image(&mut self, image: Option<ImageFile>) {
        self.image = image;
    }

    /// Whether an image has been selected.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// A product listing as persisted in the document store.
///
/// Serializes as its [`Document`], so a `NaN` price is written as `"NaN"`
/// rather than `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub title: String,
    /// Numeric parse of the draft price; `NaN` when the text had no number.
    pub price: f64,
    pub category: Option<Category>,
    pub status: String,
    /// Public retrieval URL of the uploaded image.
    pub image: String,
    /// Identifier of the user who submitted the listing.
    pub user_id: Uid,
}

impl ProductRecord {
    /// Build a record from the current draft values.
    #[must_use]
    pub fn from_draft(draft: &ProductDraft, image_url: impl Into<String>, user_id: Uid) -> Self {
        Self {
            title: draft.title.clone(),
            price: parse_price(&draft.price),
            category: draft.category,
            status: draft.status.clone(),
            image: image_url.into(),
            user_id,
        }
    }

    /// Convert into the field map handed to the document store.
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document::from([
            ("title".to_owned(), FieldValue::from(self.title.as_str())),
            ("price".to_owned(), FieldValue::Number(self.price)),
            (
                "category".to_owned(),
                FieldValue::from(self.category.map(Category::as_str)),
            ),
            ("status".to_owned(), FieldValue::from(self.status.as_str())),
            ("image".to_owned(), FieldValue::from(self.image.as_str())),
            ("userId".to_owned(), FieldValue::from(self.user_id.as_str())),
        ])
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}
