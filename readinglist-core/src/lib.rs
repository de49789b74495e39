//! Reading List Core Library
//!
//! This crate provides the book-listing render pipeline: the `book`
//! content-type declaration, the `featured_image_src` read-API field
//! extension, and the dynamic block render engine that turns editor
//! display flags plus the current entry set into a markup fragment.
//! Entry storage and image resolution are seams ([`EntryStore`],
//! [`ImageResolver`]) with in-memory implementations for serving and tests.

pub mod content_type;
pub mod error;
pub mod hooks;
pub mod render;
pub mod resolver;
pub mod rest;
pub mod store;
pub mod types;

pub use content_type::{book_content_type, ContentTypeDef, EntryField, TypeLabels, BOOK_TYPE};
pub use error::{ReadingListError, Result, StoreError, StoreResult};
pub use hooks::{default_dispatcher, Hook, HookDispatcher, HookStage, Platform, LISTING_BLOCK};
pub use render::{
    listing_fragments, render_listing, BlockRegistry, EntryFragment, ListingTemplate,
    RenderTemplate, WrapperAttributes,
};
pub use resolver::{ImageResolver, ImageSize, MediaLibrary, ResolvedImage};
pub use rest::{
    featured_image_src, FeaturedImageField, FeaturedImageSrc, RestField, RestFieldRegistry,
    FEATURED_IMAGE_FIELD,
};
pub use store::{EntryStore, MemoryStore};
pub use types::{BookDraft, BookEntry, DisplayConfig, ImageRef};
