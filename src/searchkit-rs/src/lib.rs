//! Searchkit Client Library
//!
//! HTTP client for document-search engines speaking the Elasticsearch wire
//! conventions. A [`ConnectionRegistry`] maps logical connection names to
//! lazily constructed, cached [`Client`] handles; each client exposes the
//! index and document operations and raises the typed errors from
//! `searchkit-core`.

mod client;
mod registry;
mod reindex;
mod transport;

pub use client::{Client, SearchQuery};
pub use registry::{ConnectionRegistry, DEFAULT_CONNECTION};
pub use reindex::{reindex, reindex_all, ReindexOutcome, ReindexReport, Searchable};
pub use searchkit_core::{ConnectionConfig, Document, Error, RawResponse, Result};
