//! Interface definitions for the external collaborators.
//!
//! `RecordStore` abstracts the host persistence layer and
//! `SearchIndexProvider` abstracts the search engine, both injected to allow
//! swappable implementations and easy testing.

mod record_store;
mod search_index_provider;

pub use record_store::RecordStore;
pub use search_index_provider::SearchIndexProvider;
