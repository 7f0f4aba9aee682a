//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend. Each entity type is stored in its own
//! index named `<prefix>-<entity type>`.

mod client;
mod index_config;
mod response;

pub use client::OpenSearchProvider;
pub use index_config::IndexConfig;
