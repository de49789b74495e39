//! Dynamic block rendering
//!
//! A block registry dispatches an invoking block's namespaced name to a
//! render template; the listing template queries the entry store and joins
//! per-entry fragments into the final markup.

mod markup;

pub use markup::{render_listing, EntryFragment, WrapperAttributes};

use crate::content_type::BOOK_TYPE;
use crate::error::Result;
use crate::resolver::{ImageResolver, ImageSize};
use crate::store::EntryStore;
use crate::types::{BookEntry, DisplayConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A dynamic block's server-side render step
#[async_trait]
pub trait RenderTemplate: Send + Sync {
    /// Render the block given its persisted attributes and the wrapper
    /// attributes supplied by the layout system
    async fn render(&self, attributes: &Value, wrapper: &WrapperAttributes) -> Result<String>;
}

/// Derive the template slug from a namespaced block name
///
/// `readinglist/book-list` dispatches on `readinglist`: one render template
/// per block namespace.
pub fn template_slug(block_name: &str) -> &str {
    block_name.split('/').next().unwrap_or(block_name)
}

/// Registry of render templates keyed by template slug
#[derive(Default, Clone)]
pub struct BlockRegistry {
    templates: HashMap<String, Arc<dyn RenderTemplate>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a slug
    pub fn register(&mut self, slug: impl Into<String>, template: Arc<dyn RenderTemplate>) {
        self.templates.insert(slug.into(), template);
    }

    /// Look up a template by slug
    pub fn template(&self, slug: &str) -> Option<&Arc<dyn RenderTemplate>> {
        self.templates.get(slug)
    }

    /// Render the block identified by its namespaced name
    ///
    /// A block whose slug has no registered template renders to an empty
    /// string, never an error.
    pub async fn render(
        &self,
        block_name: &str,
        attributes: &Value,
        wrapper: &WrapperAttributes,
    ) -> Result<String> {
        let slug = template_slug(block_name);
        match self.template(slug) {
            Some(template) => {
                tracing::debug!(block = %block_name, template = %slug, "rendering block template");
                template.render(attributes, wrapper).await
            }
            None => {
                tracing::debug!(block = %block_name, template = %slug, "no render template registered");
                Ok(String::new())
            }
        }
    }
}

/// Build the per-entry fragments for a listing render
///
/// The pure step of the pipeline: entries are processed one at a time in
/// store order, titles always included, image and body gated by the
/// config. Image resolution failures leave the fragment without an image.
pub async fn listing_fragments(
    config: DisplayConfig,
    entries: &[BookEntry],
    resolver: &dyn ImageResolver,
) -> Vec<EntryFragment> {
    let mut fragments = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut fragment = EntryFragment::new(entry.title.clone());
        if config.show_image {
            if let Some(image) = &entry.image {
                fragment.image = resolver.resolve(image, ImageSize::Medium).await;
            }
        }
        if config.show_content {
            fragment.body = entry.body.clone();
        }
        fragments.push(fragment);
    }
    fragments
}

/// The book-listing render template
pub struct ListingTemplate {
    store: Arc<dyn EntryStore>,
    resolver: Arc<dyn ImageResolver>,
}

impl ListingTemplate {
    pub fn new(store: Arc<dyn EntryStore>, resolver: Arc<dyn ImageResolver>) -> Self {
        Self { store, resolver }
    }
}

#[async_trait]
impl RenderTemplate for ListingTemplate {
    async fn render(&self, attributes: &Value, wrapper: &WrapperAttributes) -> Result<String> {
        // Malformed or missing attributes fall back to the defaults
        let config: DisplayConfig =
            serde_json::from_value(attributes.clone()).unwrap_or_default();

        // The full current result set, in store order; a store failure is
        // the one error that propagates out of a render
        let entries = self.store.list_entries(BOOK_TYPE).await?;

        let fragments = listing_fragments(config, &entries, self.resolver.as_ref()).await;
        Ok(render_listing(wrapper, &fragments)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_slug_is_the_namespace_segment() {
        assert_eq!(template_slug("readinglist/book-list"), "readinglist");
        assert_eq!(template_slug("bare-name"), "bare-name");
        assert_eq!(template_slug(""), "");
    }

    #[tokio::test]
    async fn test_unregistered_slug_renders_nothing() {
        let registry = BlockRegistry::new();
        let output = registry
            .render("unknown/block", &Value::Null, &WrapperAttributes::new())
            .await
            .unwrap();
        assert_eq!(output, "");
    }
}
