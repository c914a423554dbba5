//! Infrastructure layer - external concerns

pub mod http;
pub mod storage;

pub use http::HttpBackend;
pub use storage::{FileSessionStore, InMemoryBackend, MemorySessionStore};
