//! HTTP adapters for the marketplace backend

mod client;

pub use client::HttpBackend;
