//! Purchase order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod store;

pub use descriptor::PurchaseOrderDescriptor;
pub use handlers::*;
pub use model::{
    NewPurchaseOrder, NewPurchaseOrderLine, PurchaseOrder, PurchaseOrderDeleted, PurchaseOrderLine,
};
pub use store::PurchaseOrderRepository;
