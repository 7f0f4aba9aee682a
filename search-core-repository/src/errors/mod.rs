//! Error types for the search core repository.

mod sink_error;

pub use sink_error::SinkError;
