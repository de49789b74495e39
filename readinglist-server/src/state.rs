//! Application state

use anyhow::Result;
use readinglist_core::{
    default_dispatcher, BookDraft, EntryStore, HookStage, ImageSize, MediaLibrary, MemoryStore,
    Platform, ResolvedImage, BOOK_TYPE,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared application state
///
/// The platform is immutable once the lifecycle hooks have fired; the only
/// later mutation is entry creation inside the store, behind its own lock.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<Platform>,
}

/// Seed fixture loaded at startup
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub books: Vec<SeedBook>,

    #[serde(default)]
    pub images: Vec<SeedImage>,
}

/// One seeded book entry
#[derive(Debug, Deserialize)]
pub struct SeedBook {
    pub title: String,
    pub body: Option<String>,
    pub image: Option<String>,
}

/// One seeded media-library attachment with its size variants
#[derive(Debug, Deserialize)]
pub struct SeedImage {
    pub id: String,
    pub sizes: HashMap<ImageSize, SeedVariant>,
}

#[derive(Debug, Deserialize)]
pub struct SeedVariant {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

impl SeedData {
    /// Load seed data from a JSON file
    pub async fn load(path: &std::path::Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Build the platform from seed data: fire the lifecycle stages, then seed
/// entries through the store
pub async fn build_state(seed: SeedData) -> Result<AppState> {
    let store = Arc::new(MemoryStore::new());

    let mut library = MediaLibrary::new();
    for image in seed.images {
        for (size, variant) in image.sizes {
            let mut resolved = ResolvedImage::new(variant.url);
            if let (Some(width), Some(height)) = (variant.width, variant.height) {
                resolved = resolved.with_dimensions(width, height);
            }
            if let Some(alt) = variant.alt {
                resolved = resolved.with_alt(alt);
            }
            library.insert(image.id.as_str(), size, resolved);
        }
    }

    let mut platform = Platform::new(store.clone(), Arc::new(library));
    let dispatcher = default_dispatcher();
    dispatcher.fire(HookStage::Init, &mut platform).await?;
    dispatcher.fire(HookStage::RestInit, &mut platform).await?;

    // Entries go in after Init so the content type exists
    for book in seed.books {
        let mut draft = BookDraft::new(book.title);
        if let Some(body) = book.body {
            draft = draft.with_body(body);
        }
        if let Some(image) = book.image {
            draft = draft.with_image(image.as_str());
        }
        store.create_entry(BOOK_TYPE, draft).await?;
    }

    Ok(AppState {
        platform: Arc::new(platform),
    })
}

impl AppState {
    /// Create application state from the environment
    ///
    /// `READINGLIST_SEED` names a JSON seed file; without it, or when the
    /// file cannot be read, the server starts with an empty store.
    pub async fn new() -> Result<Self> {
        let seed = match std::env::var("READINGLIST_SEED") {
            Ok(path) => match SeedData::load(std::path::Path::new(&path)).await {
                Ok(seed) => seed,
                Err(e) => {
                    tracing::warn!("Failed to load seed file, starting empty: {}", e);
                    SeedData::default()
                }
            },
            Err(_) => SeedData::default(),
        };

        build_state(seed).await
    }
}
