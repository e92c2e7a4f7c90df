//! Top-level subcommand flow.

use std::io::Write;

use camino::Utf8PathBuf;
use fixturegen::{DirSink, GeneratedArtifact, GenerationReport, Generator, load_crate_dir};

use crate::cache::{self, CacheKey, Manifest};
use crate::check;
use crate::cli::Args;
use crate::error::CliError;
use crate::metadata::Settings;

/// What a successful invocation did.
#[derive(Debug)]
pub enum Outcome {
    /// Fixtures were generated and written.
    Generated(Vec<GeneratedArtifact>),
    /// `--cache` found the previous output still current.
    Cached,
    /// `--check` found every fixture current.
    UpToDate {
        /// Number of fixtures compared.
        checked: usize,
    },
}

/// Runs check, cached or full generation according to `args`.
///
/// One line per artefact is written to `out`; failures are logged through
/// `tracing` before being returned. Artefacts the previous manifest lists
/// that the sources no longer generate are removed.
///
/// # Errors
///
/// Returns [`CliError::Generation`] when any dataset definition fails,
/// [`CliError::OutOfDate`] when `--check` finds differences, or an I/O error.
pub fn execute<W>(args: &Args, settings: &Settings, out: &mut W) -> Result<Outcome, CliError>
where
    W: Write + ?Sized,
{
    if args.should_check {
        return run_check(settings, out);
    }

    let key = CacheKey::new(
        cache::fingerprint_sources(&settings.src_dir)?,
        env!("CARGO_PKG_VERSION").to_owned(),
        settings.naming,
    )
    .hash();
    let previous = cache::read_manifest(&settings.out_dir);
    if args.should_cache
        && previous
            .as_ref()
            .is_some_and(|manifest| manifest.is_fresh(&key, &settings.out_dir))
    {
        tracing::info!(out = %settings.out_dir, "sources unchanged; skipping generation");
        writeln!(out, "fixtures up to date in {}", settings.out_dir).map_err(CliError::Output)?;
        return Ok(Outcome::Cached);
    }

    let generated = generate(settings, out)?;
    let artifacts: Vec<Utf8PathBuf> = generated.iter().map(|item| item.path.clone()).collect();
    if let Some(manifest) = &previous {
        let orphans = manifest.orphans(&artifacts);
        for path in cache::remove_artifacts(&settings.out_dir, &orphans)? {
            tracing::info!(path = %path, "removed fixture that is no longer generated");
            writeln!(out, "removed {}", settings.out_dir.join(&path)).map_err(CliError::Output)?;
        }
    }
    cache::write_manifest(&settings.out_dir, &Manifest { key, artifacts })?;
    Ok(Outcome::Generated(generated))
}

fn generate<W>(settings: &Settings, out: &mut W) -> Result<Vec<GeneratedArtifact>, CliError>
where
    W: Write + ?Sized,
{
    let loaded = load_crate_dir(&settings.src_dir)?;
    let sink = DirSink::create(&settings.out_dir)
        .map_err(|err| CliError::io(&settings.out_dir, err))?;
    let report = Generator::new(settings.options())
        .run(&loaded.index, &sink)
        .with_source_failures(loaded.failures);

    for item in &report.generated {
        writeln!(
            out,
            "generated {} -> {}",
            item.artifact,
            sink.root().join(&item.path)
        )
        .map_err(CliError::Output)?;
    }
    log_failures(&report);
    Ok(report.into_result()?)
}

fn run_check<W>(settings: &Settings, out: &mut W) -> Result<Outcome, CliError>
where
    W: Write + ?Sized,
{
    let report = check::run(settings)?;
    for path in &report.stale {
        writeln!(out, "stale {}", settings.out_dir.join(path)).map_err(CliError::Output)?;
    }
    for path in &report.missing {
        writeln!(out, "missing {}", settings.out_dir.join(path)).map_err(CliError::Output)?;
    }
    if report.is_clean() {
        writeln!(out, "{} fixture(s) up to date", report.checked).map_err(CliError::Output)?;
        Ok(Outcome::UpToDate {
            checked: report.checked,
        })
    } else {
        Err(CliError::OutOfDate {
            stale: report.stale.len(),
            missing: report.missing.len(),
        })
    }
}

pub(crate) fn log_failures(report: &GenerationReport) {
    for failure in &report.failures {
        tracing::error!(error = %failure, "dataset definition failed");
    }
}
