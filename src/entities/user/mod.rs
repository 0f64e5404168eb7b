//! User entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod store;

pub use descriptor::UserDescriptor;
pub use handlers::*;
pub use model::{User, UserPayload};
pub use store::UserRepository;
