//! Primary error enums for the generation pipeline.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::index::QualifiedName;

/// Failures reading the `#[dataset(...)]` annotation of a dataset definition.
///
/// Each variant names the offending definition so a report can point at it
/// without further context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// The type handed to the extractor carries no `#[dataset]` attribute.
    #[error("`{definition}` is not annotated with #[dataset(...)]")]
    MissingAnnotation {
        /// Definition that was processed.
        definition: QualifiedName,
    },

    /// A required attribute is absent or does not name a concrete type.
    #[error("#[dataset] on `{definition}` is missing a type for `{attribute}`")]
    MissingAttribute {
        /// Definition carrying the incomplete annotation.
        definition: QualifiedName,
        /// Name of the attribute that could not be resolved.
        attribute: &'static str,
    },

    /// The attribute arguments could not be parsed.
    #[error("#[dataset] on `{definition}` is malformed: {message}")]
    Malformed {
        /// Definition carrying the malformed annotation.
        definition: QualifiedName,
        /// Parser diagnostic.
        message: String,
    },
}

impl SchemaError {
    /// Returns the dataset definition this error refers to.
    #[must_use]
    pub const fn definition(&self) -> &QualifiedName {
        match self {
            Self::MissingAnnotation { definition }
            | Self::MissingAttribute { definition, .. }
            | Self::Malformed { definition, .. } => definition,
        }
    }
}

/// Failures persisting a synthesised artefact.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SinkError {
    /// The artefact name cannot be mapped to a storage location.
    #[error("artefact name `{0}` has no type segment")]
    InvalidName(QualifiedName),

    /// Filesystem failure while writing the artefact.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that was being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by a generation pass.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixtureError {
    /// The dataset annotation was absent or incomplete.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The generated text could not be persisted.
    #[error("failed to write fixture `{artifact}`: {source}")]
    Sink {
        /// Qualified name of the artefact being written.
        artifact: QualifiedName,
        /// Underlying sink failure.
        #[source]
        source: SinkError,
    },

    /// A source file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// Filesystem failure while reading sources.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Two definitions produce the same fixture name.
    #[error("`{definition}` generates `{artifact}`, which `{first}` already generated")]
    DuplicateArtifact {
        /// Definition that lost the collision.
        definition: QualifiedName,
        /// Colliding artefact name.
        artifact: QualifiedName,
        /// Definition that generated the artefact first.
        first: QualifiedName,
    },

    /// A build-script environment variable is not set.
    #[error("environment variable `{variable}` is not set; is this running from build.rs?")]
    Environment {
        /// Name of the missing variable.
        variable: &'static str,
    },

    /// Several failures from the same pass.
    #[error("multiple fixture generation errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl FixtureError {
    /// Returns the dataset definition the failure belongs to, if any.
    #[must_use]
    pub const fn definition(&self) -> Option<&QualifiedName> {
        match self {
            Self::Schema(err) => Some(err.definition()),
            Self::DuplicateArtifact { definition, .. } => Some(definition),
            Self::Sink { .. }
            | Self::Parse { .. }
            | Self::Io { .. }
            | Self::Environment { .. }
            | Self::Aggregate(_) => None,
        }
    }

    /// Combines `errors` into a single error.
    ///
    /// Returns `None` when `errors` is empty and the sole error unchanged when
    /// only one is supplied.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        if collected.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected))));
        }
        collected.pop()
    }
}
