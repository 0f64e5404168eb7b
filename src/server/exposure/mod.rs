//! API exposure modules
//!
//! Only REST is served; the exposure consumes the entity registry and
//! produces a Router.

pub mod rest;

pub use rest::RestExposure;
