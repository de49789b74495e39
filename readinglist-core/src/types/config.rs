//! Per-placement display configuration

use serde::{Deserialize, Serialize};

/// Display flags for one listing placement
///
/// Produced by the editor-facing settings panel and persisted with the
/// placement, not with the entries. The serialized field names are the
/// attribute names the panel stores (`showImage` / `showContent`), and a
/// missing attribute deserializes to its default of `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Render the medium-size image for entries that have one
    pub show_image: bool,

    /// Render the raw body markup
    pub show_content: bool,
}

impl DisplayConfig {
    pub fn new(show_image: bool, show_content: bool) -> Self {
        Self {
            show_image,
            show_content,
        }
    }
}
