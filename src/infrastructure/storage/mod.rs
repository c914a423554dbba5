//! Storage implementations

mod memory;
mod session_file;

pub use memory::{InMemoryBackend, MemorySessionStore};
pub use session_file::FileSessionStore;
