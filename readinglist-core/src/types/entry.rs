//! Book entries and image references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to an image attachment
///
/// The attachment itself lives in the external media library; this is only
/// the identifier handed to the image resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A book entry as stored by the entry store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Unique identifier, assigned by the store on creation and immutable
    pub id: Uuid,

    /// Entry title
    pub title: String,

    /// Rich text body markup
    pub body: Option<String>,

    /// Reference to the entry's primary image attachment
    pub image: Option<ImageRef>,

    /// Creation timestamp, assigned by the store
    pub created_at: DateTime<Utc>,
}

/// The shape of a book entry before the store has assigned its identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub body: Option<String>,
    pub image: Option<ImageRef>,
}

impl BookDraft {
    /// Create a draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            image: None,
        }
    }

    /// Set the body markup
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the image reference
    pub fn with_image(mut self, image: impl Into<ImageRef>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_builder() {
        let draft = BookDraft::new("Dune").with_body("<p>Spice.</p>").with_image("img1");
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.body.as_deref(), Some("<p>Spice.</p>"));
        assert_eq!(draft.image, Some(ImageRef::new("img1")));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = BookEntry {
            id: Uuid::new_v4(),
            title: "Foundation".to_string(),
            body: None,
            image: Some(ImageRef::new("img1")),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["title"], "Foundation");
        // ImageRef serializes transparently as its identifier
        assert_eq!(json["image"], "img1");
        let back: BookEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
