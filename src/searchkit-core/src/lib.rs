//! Searchkit Core Library
//!
//! This crate provides the wire-level building blocks for the searchkit
//! client, including:
//! - Connection configuration
//! - Typed error model
//! - Response decoding and search-hit normalization
//!
//! Nothing in this crate performs I/O; the HTTP layer lives in `searchkit-rs`.

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used types
pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use response::{Document, RawResponse};
