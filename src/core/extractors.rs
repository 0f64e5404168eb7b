//! Axum extractors shared by the entity handlers

use crate::core::entity::RecordId;
use crate::core::error::{ApiError, RequestError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;

/// JSON request body, rejected with `{ "error": "Invalid JSON body" }`
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_item(JsonBody(payload): JsonBody) -> ApiResult<...> {
///     // payload is any JSON value; validation happens in the repository
/// }
/// ```
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(JsonBody(payload)),
            Err(e) => {
                tracing::warn!(error = %e.body_text(), "rejected request body");
                Err(RequestError::InvalidBody {
                    message: e.body_text(),
                }
                .into())
            }
        }
    }
}

/// Integer record id taken from the `{id}` path segment
pub struct RecordIdPath(pub RecordId);

impl<S> FromRequestParts<S> for RecordIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidId {
                value: e.body_text(),
            })?;

        raw.trim()
            .parse::<RecordId>()
            .map(RecordIdPath)
            .map_err(|_| RequestError::InvalidId { value: raw }.into())
    }
}
