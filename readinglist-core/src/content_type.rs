//! Content-type declarations
//!
//! The entry store only knows about content types that have been declared
//! to it. [`book_content_type`] is the shape this system registers at init.

use serde::{Deserialize, Serialize};

/// Slug of the book content type
pub const BOOK_TYPE: &str = "book";

/// Fields a content type supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Title,
    Body,
    Image,
}

/// Human-facing labels for a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLabels {
    pub name: String,
    pub singular_name: String,
}

impl TypeLabels {
    pub fn new(name: impl Into<String>, singular_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singular_name: singular_name.into(),
        }
    }
}

/// Declared shape of a content type
///
/// Whole-shape equality decides whether a re-registration is the idempotent
/// no-op case or a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDef {
    /// Type slug used in store queries
    pub slug: String,

    /// Display labels
    pub labels: TypeLabels,

    /// Listable/queryable outside the editor
    pub public: bool,

    /// Whether the host platform exposes an archive listing for this type
    pub has_archive: bool,

    /// Supported entry fields
    pub supports: Vec<EntryField>,

    /// Eligible for inclusion in the public read API
    pub show_in_rest: bool,
}

impl ContentTypeDef {
    /// Create a content type with the given slug and labels
    pub fn new(slug: impl Into<String>, labels: TypeLabels) -> Self {
        Self {
            slug: slug.into(),
            labels,
            public: false,
            has_archive: false,
            supports: Vec::new(),
            show_in_rest: false,
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn has_archive(mut self, has_archive: bool) -> Self {
        self.has_archive = has_archive;
        self
    }

    pub fn supports(mut self, fields: impl IntoIterator<Item = EntryField>) -> Self {
        self.supports = fields.into_iter().collect();
        self
    }

    pub fn show_in_rest(mut self, show_in_rest: bool) -> Self {
        self.show_in_rest = show_in_rest;
        self
    }
}

/// The `book` content type registered at init
pub fn book_content_type() -> ContentTypeDef {
    ContentTypeDef::new(BOOK_TYPE, TypeLabels::new("Books", "Book"))
        .public(true)
        .has_archive(true)
        .supports([EntryField::Title, EntryField::Body, EntryField::Image])
        .show_in_rest(true)
}
