//! Item entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod store;

pub use descriptor::ItemDescriptor;
pub use handlers::*;
pub use model::{Item, ItemPatch, NewItem};
pub use store::ItemRepository;
