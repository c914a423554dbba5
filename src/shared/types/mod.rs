pub mod errors;
pub mod wire;

pub use errors::*;
