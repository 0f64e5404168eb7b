//! Item HTTP handlers

use super::{model::Item, store::ItemRepository};
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, RecordIdPath};
use crate::core::service::Repository;
use axum::{extract::State, http::StatusCode, response::Json};

/// Item-specific AppState
#[derive(Clone)]
pub struct ItemAppState {
    pub repository: ItemRepository,
}

pub async fn list_items(State(state): State<ItemAppState>) -> ApiResult<Json<Vec<Item>>> {
    state
        .repository
        .list()
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error fetching items"))
}

pub async fn get_item(
    State(state): State<ItemAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<Json<Item>> {
    state
        .repository
        .get(id)
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error fetching item"))
}

pub async fn create_item(
    State(state): State<ItemAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state
        .repository
        .create(&payload)
        .await
        .map_err(|e| e.for_endpoint("Server error creating item"))?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<ItemAppState>,
    RecordIdPath(id): RecordIdPath,
    JsonBody(payload): JsonBody,
) -> ApiResult<Json<Item>> {
    state
        .repository
        .update(id, &payload)
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error updating item"))
}

pub async fn delete_item(
    State(state): State<ItemAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<StatusCode> {
    state
        .repository
        .delete(id)
        .await
        .map_err(|e| e.for_endpoint("Server error deleting item"))?;
    Ok(StatusCode::NO_CONTENT)
}
