//! Persistence for the point-of-sale document

pub mod json_file;

pub use json_file::{Document, DocumentGuard, JsonStore};
