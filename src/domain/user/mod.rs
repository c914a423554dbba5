//! User aggregate
//!
//! Contains the signed-in user and the persisted-session interface.

pub mod model;
pub mod repository;

pub use model::{CurrentUser, UserRole};
pub use repository::SessionStore;
