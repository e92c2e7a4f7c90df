//! Cargo metadata discovery and settings resolution for `cargo-fixturegen`.

use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::{Metadata, MetadataCommand, Package};
use fixturegen::{NamingStyle, SynthOptions};
use serde::Deserialize;

use crate::cli::Args;
use crate::error::CliError;

/// Key of the package metadata table read by the subcommand.
pub const METADATA_KEY: &str = "fixturegen";

/// Deserialised `package.metadata.fixturegen` defaults.
///
/// Relative paths are resolved against the package root.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixturegenMetadata {
    /// Source directory to scan.
    pub src_dir: Option<Utf8PathBuf>,
    /// Output directory for generated fixtures.
    pub out_dir: Option<Utf8PathBuf>,
    /// Method naming style.
    pub naming: Option<NamingStyle>,
}

/// Summary of the selected package.
#[derive(Debug, Clone)]
pub struct PackageSelection {
    /// Selected Cargo package name.
    pub package_name: String,
    /// Root directory containing the package manifest.
    pub package_root: Utf8PathBuf,
    /// Cargo target directory for build artefacts.
    pub target_directory: Utf8PathBuf,
    /// Defaults declared in the package manifest.
    pub defaults: FixturegenMetadata,
}

/// Effective settings after layering CLI flags over package metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Source directory to scan.
    pub src_dir: Utf8PathBuf,
    /// Output directory for generated fixtures.
    pub out_dir: Utf8PathBuf,
    /// Method naming style.
    pub naming: NamingStyle,
}

impl Settings {
    /// Applies the precedence CLI flag, then package metadata, then defaults.
    ///
    /// The default source directory is `<package>/src`; the default output
    /// directory is `<target>/fixturegen/<package>`.
    #[must_use]
    pub fn resolve(args: &Args, selection: &PackageSelection) -> Self {
        let root = &selection.package_root;
        let defaults = &selection.defaults;
        let src_dir = args
            .src_dir
            .clone()
            .or_else(|| defaults.src_dir.as_deref().map(|dir| root.join(dir)))
            .unwrap_or_else(|| root.join("src"));
        let out_dir = args
            .out_dir
            .clone()
            .or_else(|| defaults.out_dir.as_deref().map(|dir| root.join(dir)))
            .unwrap_or_else(|| {
                selection
                    .target_directory
                    .join(METADATA_KEY)
                    .join(&selection.package_name)
            });
        let naming = args.naming.or(defaults.naming).unwrap_or_default();
        Self {
            src_dir,
            out_dir,
            naming,
        }
    }

    /// Synthesis options for these settings.
    #[must_use]
    pub const fn options(&self) -> SynthOptions {
        SynthOptions::with_naming(self.naming)
    }
}

/// Loads Cargo metadata for the current workspace.
///
/// # Errors
///
/// Returns [`CliError::Metadata`] when `cargo metadata` fails.
pub fn load_metadata() -> Result<Metadata, CliError> {
    let mut command = MetadataCommand::new();
    command.no_deps();
    Ok(command.exec()?)
}

/// Selects the named package, or the workspace root package when `name` is
/// `None`.
///
/// # Errors
///
/// Returns an error when the package cannot be found or its
/// `package.metadata.fixturegen` table is malformed.
pub fn select_package(
    metadata: &Metadata,
    name: Option<&str>,
) -> Result<PackageSelection, CliError> {
    let package = match name {
        Some(wanted) => find_package(metadata, wanted)?,
        None => metadata
            .root_package()
            .ok_or(CliError::WorkspaceRootMissing)?,
    };

    let package_root = package
        .manifest_path
        .parent()
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| CliError::ManifestWithoutParent(package.manifest_path.clone()))?;

    Ok(PackageSelection {
        package_name: package.name.clone(),
        package_root,
        target_directory: metadata.target_directory.clone(),
        defaults: parse_fixturegen_metadata(package)?,
    })
}

fn find_package<'a>(metadata: &'a Metadata, name: &str) -> Result<&'a Package, CliError> {
    metadata
        .packages
        .iter()
        .find(|package| package.name == name)
        .ok_or_else(|| CliError::PackageNotFound(name.to_owned()))
}

fn parse_fixturegen_metadata(package: &Package) -> Result<FixturegenMetadata, CliError> {
    let Some(value) = package.metadata.get(METADATA_KEY) else {
        return Ok(FixturegenMetadata::default());
    };
    serde_json::from_value(value.clone()).map_err(|source| CliError::MetadataTable {
        package: package.name.clone(),
        source,
    })
}
