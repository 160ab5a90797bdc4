//! Listing form state.
//!
//! Holds the five draft fields plus the result message of the last
//! submission. A new result always replaces the previous one; there is no
//! history.

use listing_core::{Category, CategoryError, ImageFile, ProductDraft};

use crate::services::submission::SubmissionResult;

/// Form state for the add-product page.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    draft: ProductDraft,
    result: Option<SubmissionResult>,
}

impl ProductForm {
    /// Empty form, as first rendered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Copy of the draft to hand to the submission workflow.
    #[must_use]
    pub fn snapshot(&self) -> ProductDraft {
        self.draft.clone()
    }

    /// Apply a named text field from the submitted form.
    ///
    /// Unknown field names are ignored. An empty `category` clears the
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` if `category` is not one of the fixed set.
    pub fn set_text_field(&mut self, name: &str, value: String) -> Result<(), CategoryError> {
        match name {
            "title" => self.draft.set_title(value),
            "price" => self.draft.set_price(value),
            "status" => self.draft.set_status(value),
            "category" if value.is_empty() => self.draft.set_category(None),
            "category" => self.draft.set_category(Some(value.parse::<Category>()?)),
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
        Ok(())
    }

    /// Set or clear the selected image.
    pub fn set_image(&mut self, image: Option<ImageFile>) {
        self.draft.set_image(image);
    }

    /// Record the outcome of a submission, replacing any earlier one.
    pub fn record_result(&mut self, result: SubmissionResult) {
        self.result = Some(result);
    }

    /// Outcome of the last submission, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// Message to show for the last submission, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.result.as_ref().map(SubmissionResult::message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_route_to_setters() {
        let mut form = ProductForm::new();
        form.set_text_field("title", "Trench coat".into()).unwrap();
        form.set_text_field("price", "120".into()).unwrap();
        form.set_text_field("status", "available".into()).unwrap();
        form.set_text_field("category", "coats".into()).unwrap();
        form.set_text_field("csrf", "ignored".into()).unwrap();

        let draft = form.draft();
        assert_eq!(draft.title, "Trench coat");
        assert_eq!(draft.price, "120");
        assert_eq!(draft.status, "available");
        assert_eq!(draft.category, Some(Category::Coats));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut form = ProductForm::new();
        assert!(form.set_text_field("category", "hats".into()).is_err());
        assert!(form.draft().category.is_none());
    }

    #[test]
    fn test_result_overwrites_previous() {
        let mut form = ProductForm::new();
        assert!(form.message().is_none());

        form.record_result(SubmissionResult::Error("boom".into()));
        form.record_result(SubmissionResult::Success);

        assert_eq!(form.message().as_deref(), Some("Product added successfully!"));
    }
}
