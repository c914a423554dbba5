//! Stay window aggregate

pub mod model;

pub use model::StayWindow;
