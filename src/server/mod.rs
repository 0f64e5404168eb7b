//! Server module for building the HTTP server
//!
//! `ServerBuilder` registers the CRUD routes of every entity under `/api`,
//! adds health checks and wraps everything in tracing and CORS layers.

pub mod builder;
pub mod entity_registry;
pub mod exposure;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
