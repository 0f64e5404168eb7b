//! Order HTTP handlers

use super::{
    model::{Order, OrderDeleted},
    store::OrderRepository,
};
use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::{JsonBody, RecordIdPath};
use crate::core::query::ListQuery;
use crate::core::service::Repository;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use std::collections::HashMap;

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub repository: OrderRepository,
}

/// `GET /orders`, optionally filtered with `filter`, `sort` or `field=value`
pub async fn list_orders(
    State(state): State<OrderAppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Order>>> {
    let query = ListQuery::from_params(&params).map_err(|e| {
        tracing::warn!(error = %e, "rejected order filter");
        ApiError::from(e)
    })?;

    state
        .repository
        .list_filtered(&query)
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error finding all orders"))
}

pub async fn get_order(
    State(state): State<OrderAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<Json<Order>> {
    state
        .repository
        .get(id)
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error finding order"))
}

pub async fn create_order(
    State(state): State<OrderAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state
        .repository
        .create(&payload)
        .await
        .map_err(|e| e.for_endpoint("Server error creating order"))?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn delete_order(
    State(state): State<OrderAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<Json<OrderDeleted>> {
    state
        .repository
        .delete(id)
        .await
        .map(|order| Json(OrderDeleted::new(order)))
        .map_err(|e| e.for_endpoint("Server error deleting order"))
}
