//! Error types produced by the generation engine.

mod aggregate;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{FixtureError, SchemaError, SinkError};
