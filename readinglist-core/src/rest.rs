//! Read-API field extensions
//!
//! Derived, read-only fields added to the serialized representation of
//! entries in the public read API. The one field this system ships is
//! `featured_image_src`, the medium-size URL of an entry's image.

use crate::resolver::{ImageResolver, ImageSize};
use crate::types::BookEntry;
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field name of the featured image extension
pub const FEATURED_IMAGE_FIELD: &str = "featured_image_src";

/// Wire value of the featured image field: a URL string, or `false`
///
/// `false` is the explicit "no image" sentinel — never `null` and never an
/// omitted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeaturedImageSrc {
    Url(String),
    Missing,
}

impl Serialize for FeaturedImageSrc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeaturedImageSrc::Url(url) => serializer.serialize_str(url),
            FeaturedImageSrc::Missing => serializer.serialize_bool(false),
        }
    }
}

/// Derive the featured image URL for an entry
///
/// Entries without an image reference, and references the resolver cannot
/// turn into a medium-size URL, both come back as [`FeaturedImageSrc::Missing`].
pub async fn featured_image_src(
    entry: &BookEntry,
    resolver: &dyn ImageResolver,
) -> FeaturedImageSrc {
    let Some(image) = &entry.image else {
        return FeaturedImageSrc::Missing;
    };
    match resolver.resolve(image, ImageSize::Medium).await {
        Some(resolved) if !resolved.url.is_empty() => FeaturedImageSrc::Url(resolved.url),
        _ => FeaturedImageSrc::Missing,
    }
}

/// A derived read-API field
#[async_trait]
pub trait RestField: Send + Sync {
    /// Compute the field value for one serialized entry
    async fn value(&self, entry: &BookEntry) -> Value;
}

/// The featured image field extension
pub struct FeaturedImageField {
    resolver: Arc<dyn ImageResolver>,
}

impl FeaturedImageField {
    pub fn new(resolver: Arc<dyn ImageResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl RestField for FeaturedImageField {
    async fn value(&self, entry: &BookEntry) -> Value {
        let src = featured_image_src(entry, self.resolver.as_ref()).await;
        serde_json::to_value(src).unwrap_or(Value::Bool(false))
    }
}

/// Registry of read-API fields per content type
#[derive(Default)]
pub struct RestFieldRegistry {
    fields: BTreeMap<String, Vec<(String, Arc<dyn RestField>)>>,
}

impl RestFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field under a content type, replacing any field of the
    /// same name
    pub fn register(
        &mut self,
        content_type: impl Into<String>,
        name: impl Into<String>,
        field: Arc<dyn RestField>,
    ) {
        let name = name.into();
        let fields = self.fields.entry(content_type.into()).or_default();
        if let Some(existing) = fields.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = field;
        } else {
            fields.push((name, field));
        }
    }

    /// Names of the fields registered for a content type
    pub fn field_names(&self, content_type: &str) -> Vec<&str> {
        self.fields
            .get(content_type)
            .map(|fields| fields.iter().map(|(n, _)| n.as_str()).collect())
            .unwrap_or_default()
    }

    /// Apply every registered field to a serialized entry map
    pub async fn extend(
        &self,
        content_type: &str,
        entry: &BookEntry,
        map: &mut serde_json::Map<String, Value>,
    ) {
        let Some(fields) = self.fields.get(content_type) else {
            return;
        };
        for (name, field) in fields {
            map.insert(name.clone(), field.value(entry).await);
        }
    }
}
