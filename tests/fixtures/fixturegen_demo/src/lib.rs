//! Demonstration crate whose fixtures are generated by its build script.

pub mod datasets;
pub mod domain;
