//! Newtype IDs for type-safe entity references.
//!
//! Identifiers in this domain are opaque strings handed out by external
//! collaborators (the identity provider, the document store). Use the
//! `define_id!` macro to create wrappers that prevent mixing them up.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use listing_core::define_id;
/// define_id!(SellerId);
/// define_id!(ListingId);
///
/// let seller = SellerId::new("abc");
/// let listing = ListingId::new("abc");
///
/// // These are different types, so this won't compile:
/// // let _: SellerId = listing;
/// assert_eq!(seller.as_str(), listing.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// User identifier issued by the identity provider.
define_id!(Uid);
// Identifier assigned by the document store on creation.
define_id!(DocumentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_value() {
        let uid = Uid::new("u-123");
        assert_eq!(uid.to_string(), "u-123");
        assert_eq!(uid.as_str(), "u-123");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = DocumentId::from("doc-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"doc-1\"");
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let raw: String = Uid::from("abc".to_string()).into();
        assert_eq!(raw, "abc");
    }
}
