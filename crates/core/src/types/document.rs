//! Schemaless document representation.
//!
//! The document store accepts any map of named values; nothing here enforces
//! a shape. Product records are converted into a [`Document`] right before
//! they are handed to the store.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// A document as written to the store: field name to value.
pub type Document = BTreeMap<String, FieldValue>;

/// A single document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl FieldValue {
    /// Returns the number if this is a `Number` value.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string if this is a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// JSON has no representation for non-finite numbers, so they are written as
// their JavaScript spelling instead of collapsing to `null`.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if n.is_nan() => serializer.serialize_str("NaN"),
            Self::Number(n) if n.is_infinite() && n.is_sign_positive() => {
                serializer.serialize_str("Infinity")
            }
            Self::Number(n) if n.is_infinite() => serializer.serialize_str("-Infinity"),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_number_serializes_as_number() {
        let json = serde_json::to_string(&FieldValue::Number(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn test_non_finite_numbers_serialize_as_strings() {
        let nan = serde_json::to_string(&FieldValue::Number(f64::NAN)).unwrap();
        let inf = serde_json::to_string(&FieldValue::Number(f64::INFINITY)).unwrap();
        let neg = serde_json::to_string(&FieldValue::Number(f64::NEG_INFINITY)).unwrap();
        assert_eq!(nan, "\"NaN\"");
        assert_eq!(inf, "\"Infinity\"");
        assert_eq!(neg, "\"-Infinity\"");
    }

    #[test]
    fn test_option_none_becomes_null() {
        let value: FieldValue = Option::<String>::None.into();
        assert_eq!(value, FieldValue::Null);
        assert_eq!(serde_json::to_string(&value).unwrap(), "null");
    }

    #[test]
    fn test_document_serializes_as_object() {
        let mut doc = Document::new();
        doc.insert("title".into(), "Boots".into());
        doc.insert("price".into(), 20.0.into());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "Boots");
        assert_eq!(json["price"], 20.0);
    }
}
