//! Dynamic block render endpoint

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html, Json};
use readinglist_core::WrapperAttributes;
use serde::Deserialize;
use serde_json::Value;

/// Render request for one block placement
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Namespaced block name, e.g. `readinglist/book-list`
    pub block: String,

    /// Persisted block attributes (the placement's display configuration)
    #[serde(default)]
    pub attributes: Value,

    /// Wrapper attributes supplied by the layout system
    #[serde(default)]
    pub wrapper: WrapperAttributes,
}

/// Render a block placement to an HTML fragment
///
/// A block with no registered template yields an empty 200 body; only a
/// store failure surfaces as an error.
pub async fn render_block(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Html<String>, StatusCode> {
    let markup = state
        .platform
        .blocks
        .render(&request.block, &request.attributes, &request.wrapper)
        .await
        .map_err(|e| {
            tracing::error!("Block render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Html(markup))
}
