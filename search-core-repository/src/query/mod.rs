//! Query building.
//!
//! Search requests are translated into a nested query document by merging
//! small JSON fragments, one per concern (term, filters, facets).

mod document;
mod factory;

pub use document::{merge_fragments, QueryDocument};
pub use factory::QueryFactory;
