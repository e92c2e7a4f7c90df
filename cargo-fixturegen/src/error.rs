//! Error types for `cargo-fixturegen`.

use camino::Utf8PathBuf;
use fixturegen::FixtureError;
use thiserror::Error;

/// Errors surfaced by the `cargo-fixturegen` pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// `cargo metadata` could not be run or parsed.
    #[error("cargo metadata failed: {0}")]
    Metadata(#[from] cargo_metadata::Error),

    /// `[package.metadata.fixturegen]` has an unexpected shape.
    #[error("invalid package.metadata.fixturegen in '{package}': {source}")]
    MetadataTable {
        /// Package declaring the table.
        package: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// `--package` names no workspace member.
    #[error("package '{0}' not found in workspace")]
    PackageNotFound(String),

    /// The workspace is virtual and no package was given.
    #[error("workspace root package was not available; pass --package")]
    WorkspaceRootMissing,

    /// Cargo reported a manifest path without a directory.
    #[error("package manifest {0} has no parent directory")]
    ManifestWithoutParent(Utf8PathBuf),

    /// One or more dataset definitions failed.
    #[error("fixture generation failed: {0}")]
    Generation(#[from] FixtureError),

    /// `--check` found output that differs from a fresh pass.
    #[error("{stale} stale and {missing} missing fixture(s); rerun without --check")]
    OutOfDate {
        /// Files whose content differs.
        stale: usize,
        /// Files that do not exist.
        missing: usize,
    },

    /// The cache manifest could not be encoded.
    #[error("failed to encode cache manifest {path}: {source}")]
    Manifest {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Serialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// The log subscriber could not be installed.
    #[error("failed to install log subscriber: {0}")]
    Logging(String),

    /// Report lines could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Wraps an I/O error with the path it concerns.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
