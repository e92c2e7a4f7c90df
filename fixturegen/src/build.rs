//! Build-script entry point.
//!
//! ```no_run
//! // build.rs
//! fn main() -> Result<(), fixturegen::FixtureError> {
//!     fixturegen::build::Builder::new().generate()?;
//!     Ok(())
//! }
//! ```
//!
//! The generated modules are then mounted next to their dataset definitions
//! with [`include_fixture!`](crate::include_fixture).

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::FixtureError;
use crate::generator::{GeneratedArtifact, GenerationReport, Generator};
use crate::index::load_crate_dir;
use crate::sink::DirSink;
use crate::synth::{NamingStyle, SynthOptions};

/// Directory below `OUT_DIR` that receives generated fixtures.
pub const OUT_SUBDIR: &str = "fixturegen";

/// Configures and runs fixture generation from a build script.
#[derive(Debug, Clone)]
pub struct Builder {
    src_dir: Option<Utf8PathBuf>,
    out_dir: Option<Utf8PathBuf>,
    options: SynthOptions,
    emit_rerun_directives: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Reads `$CARGO_MANIFEST_DIR/src` and writes `$OUT_DIR/fixturegen`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            src_dir: None,
            out_dir: None,
            options: SynthOptions::with_naming(NamingStyle::Snake),
            emit_rerun_directives: true,
        }
    }

    /// Overrides the source directory.
    #[must_use]
    pub fn src_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.src_dir = Some(dir.into());
        self
    }

    /// Overrides the output directory.
    #[must_use]
    pub fn out_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Selects the method naming style.
    #[must_use]
    pub const fn naming(mut self, naming: NamingStyle) -> Self {
        self.options.naming = naming;
        self
    }

    /// Controls whether `cargo:rerun-if-changed` lines are printed.
    #[must_use]
    pub const fn emit_rerun_directives(mut self, emit: bool) -> Self {
        self.emit_rerun_directives = emit;
        self
    }

    /// Generates every fixture and fails if any definition failed.
    ///
    /// # Errors
    ///
    /// Returns the first environment or I/O error, or every generation
    /// failure combined into one [`FixtureError`].
    pub fn generate(&self) -> Result<Vec<GeneratedArtifact>, FixtureError> {
        self.run()?.into_result()
    }

    /// Generates every fixture and returns the full report.
    ///
    /// # Errors
    ///
    /// Returns an error when the directories cannot be determined, read or
    /// created. Per-definition failures are recorded in the report.
    pub fn run(&self) -> Result<GenerationReport, FixtureError> {
        let src_dir = match &self.src_dir {
            Some(dir) => dir.clone(),
            None => env_dir("CARGO_MANIFEST_DIR")?.join("src"),
        };
        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => env_dir("OUT_DIR")?.join(OUT_SUBDIR),
        };

        let loaded = load_crate_dir(&src_dir)?;
        if self.emit_rerun_directives {
            write_rerun_directives(&mut io::stdout().lock(), &src_dir, &loaded.files).map_err(
                |source| FixtureError::Io {
                    path: src_dir.clone(),
                    source,
                },
            )?;
        }

        let sink = DirSink::create(&out_dir).map_err(|source| FixtureError::Io {
            path: out_dir.clone(),
            source,
        })?;
        let report = Generator::new(self.options).run(&loaded.index, &sink);
        tracing::debug!(
            src = %src_dir,
            out = %sink.root(),
            generated = report.generated.len(),
            failures = report.failures.len(),
            "fixture generation finished"
        );
        Ok(report.with_source_failures(loaded.failures))
    }
}

fn env_dir(variable: &'static str) -> Result<Utf8PathBuf, FixtureError> {
    std::env::var(variable)
        .map(Utf8PathBuf::from)
        .map_err(|_| FixtureError::Environment { variable })
}

/// Prints the directives that make cargo rerun the build script when any
/// indexed source changes.
///
/// # Errors
///
/// Returns the writer's error.
pub fn write_rerun_directives<W: Write + ?Sized>(
    out: &mut W,
    src_dir: &Utf8Path,
    files: &[Utf8PathBuf],
) -> io::Result<()> {
    writeln!(out, "cargo:rerun-if-changed={src_dir}")?;
    for file in files {
        writeln!(out, "cargo:rerun-if-changed={}", src_dir.join(file))?;
    }
    Ok(())
}
