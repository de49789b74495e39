//! Lifecycle hooks
//!
//! Initialization is explicit: the host process builds a [`Platform`],
//! registers hooks on a [`HookDispatcher`], and fires the stages in order.
//! Re-firing a stage is harmless since every bundled registration is
//! idempotent.

use crate::content_type::{book_content_type, BOOK_TYPE};
use crate::error::Result;
use crate::render::{BlockRegistry, ListingTemplate};
use crate::resolver::ImageResolver;
use crate::rest::{FeaturedImageField, RestFieldRegistry, FEATURED_IMAGE_FIELD};
use crate::store::EntryStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Namespaced name of the listing block
pub const LISTING_BLOCK: &str = "readinglist/book-list";

/// Registration context handed to hooks
pub struct Platform {
    pub store: Arc<dyn EntryStore>,
    pub resolver: Arc<dyn ImageResolver>,
    pub blocks: BlockRegistry,
    pub rest_fields: RestFieldRegistry,
}

impl Platform {
    pub fn new(store: Arc<dyn EntryStore>, resolver: Arc<dyn ImageResolver>) -> Self {
        Self {
            store,
            resolver,
            blocks: BlockRegistry::new(),
            rest_fields: RestFieldRegistry::new(),
        }
    }
}

/// Stages a hook can attach to, fired in declaration order at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Content types and block templates
    Init,
    /// Read-API field extensions
    RestInit,
}

/// One lifecycle registration
#[async_trait]
pub trait Hook: Send + Sync {
    fn stage(&self) -> HookStage;

    async fn run(&self, platform: &mut Platform) -> Result<()>;
}

/// Ordered hook list fired stage by stage
#[derive(Default)]
pub struct HookDispatcher {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hook: impl Hook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Run every hook attached to the stage, in registration order
    pub async fn fire(&self, stage: HookStage, platform: &mut Platform) -> Result<()> {
        for hook in self.hooks.iter().filter(|h| h.stage() == stage) {
            hook.run(platform).await?;
        }
        Ok(())
    }
}

/// Declares the `book` content type to the entry store
pub struct RegisterBookType;

#[async_trait]
impl Hook for RegisterBookType {
    fn stage(&self) -> HookStage {
        HookStage::Init
    }

    async fn run(&self, platform: &mut Platform) -> Result<()> {
        platform.store.register_content_type(&book_content_type()).await?;
        tracing::debug!(slug = BOOK_TYPE, "registered content type");
        Ok(())
    }
}

/// Installs the listing template for the block namespace
pub struct RegisterListingBlock;

#[async_trait]
impl Hook for RegisterListingBlock {
    fn stage(&self) -> HookStage {
        HookStage::Init
    }

    async fn run(&self, platform: &mut Platform) -> Result<()> {
        let template = ListingTemplate::new(platform.store.clone(), platform.resolver.clone());
        let slug = crate::render::template_slug(LISTING_BLOCK).to_string();
        platform.blocks.register(slug, Arc::new(template));
        tracing::debug!(block = LISTING_BLOCK, "registered block render template");
        Ok(())
    }
}

/// Adds the featured image field to the book read representation
pub struct RegisterFeaturedImageField;

#[async_trait]
impl Hook for RegisterFeaturedImageField {
    fn stage(&self) -> HookStage {
        HookStage::RestInit
    }

    async fn run(&self, platform: &mut Platform) -> Result<()> {
        let field = FeaturedImageField::new(platform.resolver.clone());
        platform
            .rest_fields
            .register(BOOK_TYPE, FEATURED_IMAGE_FIELD, Arc::new(field));
        tracing::debug!(field = FEATURED_IMAGE_FIELD, "registered read-API field");
        Ok(())
    }
}

/// Dispatcher preloaded with every bundled hook
pub fn default_dispatcher() -> HookDispatcher {
    let mut dispatcher = HookDispatcher::new();
    dispatcher.add(RegisterBookType);
    dispatcher.add(RegisterListingBlock);
    dispatcher.add(RegisterFeaturedImageField);
    dispatcher
}
