//! Library interface for the `cargo fixturegen` subcommand.
//!
//! The subcommand runs the same generation pass as
//! [`fixturegen::build::Builder`] but outside a build script, so generated
//! fixtures can be inspected, committed or checked for staleness in CI.

pub mod cache;
pub mod check;
pub mod cli;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod run;

pub use cli::Args;
pub use error::CliError;
pub use metadata::Settings;
pub use run::{Outcome, execute};
