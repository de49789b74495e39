//! Image resolution
//!
//! Maps an image reference plus a size label to a URL. Resolution never
//! fails loudly: anything the resolver cannot produce is `None`, which
//! consumers render as "no image".

use crate::types::ImageRef;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named size variants kept by the media library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Thumbnail,
    Medium,
    Large,
    Full,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::Full => "full",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved image variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

impl ResolvedImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
            alt: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Abstract image resolver
#[async_trait]
pub trait ImageResolver: Send + Sync {
    /// Resolve an image reference at the requested size
    ///
    /// `None` means "no image" — unknown reference, missing size variant,
    /// or any backend failure.
    async fn resolve(&self, image: &ImageRef, size: ImageSize) -> Option<ResolvedImage>;
}

/// In-memory media library
///
/// Built once at startup from seed data, immutable afterwards.
#[derive(Debug, Default)]
pub struct MediaLibrary {
    images: HashMap<ImageRef, HashMap<ImageSize, ResolvedImage>>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a size variant for an attachment
    pub fn insert(&mut self, image: impl Into<ImageRef>, size: ImageSize, resolved: ResolvedImage) {
        self.images.entry(image.into()).or_default().insert(size, resolved);
    }
}

#[async_trait]
impl ImageResolver for MediaLibrary {
    async fn resolve(&self, image: &ImageRef, size: ImageSize) -> Option<ResolvedImage> {
        self.images.get(image).and_then(|sizes| sizes.get(&size)).cloned()
    }
}
