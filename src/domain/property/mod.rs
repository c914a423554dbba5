//! Property aggregate (read-only from the booking side)

pub mod model;
pub mod repository;

pub use model::Property;
pub use repository::PropertyGateway;
