//! Order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod store;

pub use descriptor::OrderDescriptor;
pub use handlers::*;
pub use model::{NewOrder, Order, OrderDeleted};
pub use store::OrderRepository;
