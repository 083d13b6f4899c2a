//! Catalog types mirroring the store API book shape.
//!
//! Books are a read-only projection of server state: every catalog fetch
//! replaces the whole snapshot, and nothing on the client mutates a `Book`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How many characters of the description an anonymous visitor gets to see.
pub const PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in euros. The API sends a JSON float; totals are computed
    /// in `Decimal` so cart arithmetic stays exact.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub publisher: Option<Publisher>,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Author names joined for display, empty string when unknown.
    pub fn author_line(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Description as shown to anonymous visitors: the first [`PREVIEW_LIMIT`]
/// characters followed by an ellipsis when truncated. Works on character
/// counts, never byte offsets.
pub fn preview_description(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(PREVIEW_LIMIT) {
        None => Cow::Borrowed(description),
        Some((cut, _)) => {
            let mut out = description[..cut].to_string();
            out.push_str("...");
            Cow::Owned(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_untouched() {
        let d = "A short blurb.";
        assert_eq!(preview_description(d), d);
    }

    #[test]
    fn test_exactly_limit_untouched() {
        let d = "x".repeat(PREVIEW_LIMIT);
        assert_eq!(preview_description(&d), d);
    }

    #[test]
    fn test_long_description_truncated_with_ellipsis() {
        let d = "y".repeat(PREVIEW_LIMIT + 40);
        let preview = preview_description(&d);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let d = "é".repeat(PREVIEW_LIMIT + 1);
        let preview = preview_description(&d);
        assert_eq!(preview.chars().count(), PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_book_decodes_camel_case() {
        let json = r#"{
            "id": 1,
            "title": "A",
            "description": "desc",
            "price": 10.5,
            "stockQuantity": 2,
            "authors": [{"id": 7, "name": "Ann Author"}],
            "publisher": {"id": 3, "name": "Pub"}
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.stock_quantity, 2);
        assert_eq!(book.price.to_string(), "10.5");
        assert_eq!(book.author_line(), "Ann Author");
    }

    #[test]
    fn test_book_optional_fields_default() {
        let json = r#"{"id": 2, "title": "B", "price": 4}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.description.is_empty());
        assert!(book.authors.is_empty());
        assert!(book.publisher.is_none());
        assert!(!book.in_stock());
    }
}
