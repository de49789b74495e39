//! Public read API for book entries

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use readinglist_core::{BookEntry, EntryStore, BOOK_TYPE};
use serde_json::{json, Value};
use uuid::Uuid;

/// Serialize an entry and apply every read-API field registered for books
async fn serialize_entry(state: &AppState, entry: &BookEntry) -> Value {
    let mut map = match serde_json::to_value(entry) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    state
        .platform
        .rest_fields
        .extend(BOOK_TYPE, entry, &mut map)
        .await;
    Value::Object(map)
}

/// List all book entries
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let entries = state
        .platform
        .store
        .list_entries(BOOK_TYPE)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut books = Vec::with_capacity(entries.len());
    for entry in &entries {
        books.push(serialize_entry(&state, entry).await);
    }

    Ok(Json(json!({
        "books": books,
        "total": entries.len(),
    })))
}

/// Get a single book entry
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    // Validate UUID
    let id = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let entry = state
        .platform
        .store
        .get_entry(BOOK_TYPE, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(serialize_entry(&state, &entry).await))
}
