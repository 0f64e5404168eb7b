//! Core module containing fundamental traits and types shared by all entities

pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod id;
pub mod query;
pub mod service;
pub mod validation;

pub use entity::{Record, RecordId};
pub use error::{ApiError, ApiResult};
pub use id::IdGenerator;
pub use query::ListQuery;
pub use service::Repository;
