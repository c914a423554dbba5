pub mod telemetry;
pub mod time;
pub mod types;
pub mod validations;

pub use telemetry::*;
pub use time::*;
pub use types::*;
pub use validations::*;
