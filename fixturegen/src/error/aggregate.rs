//! Failures collected over one generation pass.

use std::{error::Error, fmt};

use super::FixtureError;
use crate::index::QualifiedName;

/// Every failure recorded by a generation pass, in recording order.
#[derive(Debug, Default)]
pub struct AggregatedErrors {
    errors: Vec<FixtureError>,
}

impl AggregatedErrors {
    /// Collects `errors`.
    #[must_use]
    pub const fn new(errors: Vec<FixtureError>) -> Self {
        Self { errors }
    }

    /// Iterates over the failures.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &FixtureError> {
        self.errors.iter()
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Dataset definitions with at least one failure, each listed once in
    /// the order its first failure was recorded.
    ///
    /// Failures that belong to no definition, such as unreadable source
    /// files, contribute nothing.
    #[must_use]
    pub fn definitions(&self) -> Vec<&QualifiedName> {
        let mut failed: Vec<&QualifiedName> = Vec::new();
        for definition in self.errors.iter().filter_map(FixtureError::definition) {
            if !failed.contains(&definition) {
                failed.push(definition);
            }
        }
        failed
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        let definitions = self.definitions();
        if !definitions.is_empty() {
            let names: Vec<String> = definitions.iter().map(|name| format!("`{name}`")).collect();
            write!(f, "\nfailing definitions: {}", names.join(", "))?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
