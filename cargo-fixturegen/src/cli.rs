//! Command-line interface definitions for `cargo-fixturegen`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::Parser;
use fixturegen::NamingStyle;

/// Name cargo passes as the first argument when invoked as `cargo fixturegen`.
pub const SUBCOMMAND: &str = "fixturegen";

/// Parsed CLI arguments for `cargo-fixturegen`.
#[derive(Debug, Parser)]
#[command(name = "cargo-fixturegen", bin_name = "cargo fixturegen")]
#[command(about = "Generate fluent fixtures for #[dataset] definitions")]
#[command(version)]
pub struct Args {
    /// Cargo package whose sources are scanned.
    #[arg(long)]
    pub package: Option<String>,
    /// Source directory to scan (defaults to the package's `src`).
    #[arg(long, value_name = "path")]
    pub src_dir: Option<Utf8PathBuf>,
    /// Output directory for generated fixtures.
    #[arg(long, value_name = "path")]
    pub out_dir: Option<Utf8PathBuf>,
    /// Method naming style: `snake` or `camel`.
    #[arg(long, value_name = "style")]
    pub naming: Option<NamingStyle>,
    /// Compare generated output with the files on disk without writing.
    #[arg(long = "check")]
    pub should_check: bool,
    /// Skip generation when the sources have not changed since the last run.
    #[arg(long = "cache")]
    pub should_cache: bool,
    /// Log filter, for example `debug` or `fixturegen=trace`.
    #[arg(long, value_name = "level")]
    pub log_level: Option<String>,
}

/// Drops the subcommand name cargo inserts after the binary name.
///
/// ```
/// use std::ffi::OsString;
///
/// let args = cargo_fixturegen::cli::normalise_args(
///     ["cargo-fixturegen", "fixturegen", "--check"].map(OsString::from),
/// );
/// assert_eq!(args, ["cargo-fixturegen", "--check"].map(OsString::from));
/// ```
#[must_use]
pub fn normalise_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut collected: Vec<OsString> = args.into_iter().collect();
    if collected.get(1).is_some_and(|arg| arg == SUBCOMMAND) {
        collected.remove(1);
    }
    collected
}
