//! Purchase order HTTP handlers

use super::{
    model::{PurchaseOrder, PurchaseOrderDeleted},
    store::PurchaseOrderRepository,
};
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, RecordIdPath};
use crate::core::service::Repository;
use axum::{extract::State, http::StatusCode, response::Json};

/// PurchaseOrder-specific AppState
#[derive(Clone)]
pub struct PurchaseOrderAppState {
    pub repository: PurchaseOrderRepository,
}

pub async fn list_purchase_orders(
    State(state): State<PurchaseOrderAppState>,
) -> ApiResult<Json<Vec<PurchaseOrder>>> {
    state
        .repository
        .list()
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error fetching purchase orders"))
}

pub async fn get_purchase_order(
    State(state): State<PurchaseOrderAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<Json<PurchaseOrder>> {
    state
        .repository
        .get(id)
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error fetching purchase order"))
}

pub async fn create_purchase_order(
    State(state): State<PurchaseOrderAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<(StatusCode, Json<PurchaseOrder>)> {
    let po = state
        .repository
        .create(&payload)
        .await
        .map_err(|e| e.for_endpoint("Server error creating purchase order"))?;
    Ok((StatusCode::CREATED, Json(po)))
}

pub async fn delete_purchase_order(
    State(state): State<PurchaseOrderAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<Json<PurchaseOrderDeleted>> {
    state
        .repository
        .delete(id)
        .await
        .map(|po| Json(PurchaseOrderDeleted::new(po)))
        .map_err(|e| e.for_endpoint("Server error deleting purchase order"))
}
