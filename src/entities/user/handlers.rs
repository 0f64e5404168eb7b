//! User HTTP handlers

use super::{
    model::{User, UserPayload},
    store::UserRepository,
};
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, RecordIdPath};
use crate::core::service::Repository;
use axum::{extract::State, http::StatusCode, response::Json};

/// User-specific AppState
#[derive(Clone)]
pub struct UserAppState {
    pub repository: UserRepository,
}

pub async fn list_users(State(state): State<UserAppState>) -> ApiResult<Json<Vec<User>>> {
    state
        .repository
        .list()
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error fetching users"))
}

pub async fn create_user(
    State(state): State<UserAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .repository
        .create(UserPayload::from_payload(&payload))
        .await
        .map_err(|e| e.for_endpoint("Server error creating user"))?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<UserAppState>,
    RecordIdPath(id): RecordIdPath,
    JsonBody(payload): JsonBody,
) -> ApiResult<Json<User>> {
    state
        .repository
        .update(id, UserPayload::from_payload(&payload))
        .await
        .map(Json)
        .map_err(|e| e.for_endpoint("Server error updating user"))
}

pub async fn delete_user(
    State(state): State<UserAppState>,
    RecordIdPath(id): RecordIdPath,
) -> ApiResult<StatusCode> {
    state
        .repository
        .delete(id)
        .await
        .map_err(|e| e.for_endpoint("Server error deleting user"))?;
    Ok(StatusCode::NO_CONTENT)
}
