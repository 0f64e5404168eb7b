//! # Petal POS
//!
//! Point-of-sale and inventory administration API. Items, orders, purchase
//! orders and users are kept in a single JSON document that is loaded at
//! startup and written back after every change.
//!
//! ## Features
//!
//! - **Validated CRUD**: ordered, fail-fast field rules with stable messages
//! - **Single-writer store**: every operation runs under one lock, flush included
//! - **Atomic writes**: the document is replaced through a temporary sibling file
//! - **Order queries**: `filter`, `sort` and `field=value` on `GET /api/orders`
//! - **Typed client**: `reqwest` client mirroring every endpoint (feature `client`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use petal::prelude::*;
//!
//! let store = Arc::new(JsonStore::open("db.json").await?);
//! ServerBuilder::new()
//!     .with_store(store)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Record, RecordId},
        error::{ApiError, ApiResult, StorageError},
        query::ListQuery,
        service::Repository,
    };

    // === Entities ===
    pub use crate::entities::{
        item::{Item, ItemPatch, ItemRepository, NewItem},
        order::{NewOrder, Order, OrderDeleted, OrderRepository},
        purchase_order::{
            NewPurchaseOrder, NewPurchaseOrderLine, PurchaseOrder, PurchaseOrderDeleted,
            PurchaseOrderLine, PurchaseOrderRepository,
        },
        user::{User, UserPayload, UserRepository},
    };

    // === Storage ===
    pub use crate::storage::{Document, JsonStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === Client ===
    #[cfg(feature = "client")]
    pub use crate::client::{ClientError, PetalClient};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
