//! Source fingerprinting and the generation manifest.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use fixturegen::NamingStyle;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io::{ErrorKind, Read, Write};

use crate::error::CliError;

/// Manifest file written into the output directory after each pass.
pub const MANIFEST_FILE: &str = "fixturegen-manifest.json";

/// Inputs that determine the generated output.
#[derive(Debug, Clone)]
pub struct CacheKey {
    fingerprint: String,
    tool_version: String,
    naming: NamingStyle,
}

impl CacheKey {
    /// Creates a new cache key input set.
    #[must_use]
    pub const fn new(fingerprint: String, tool_version: String, naming: NamingStyle) -> Self {
        Self {
            fingerprint,
            tool_version,
            naming,
        }
    }

    /// Hashes the cache inputs into a stable identifier.
    #[must_use]
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.fingerprint.as_bytes());
        hasher.update(self.tool_version.as_bytes());
        hasher.update(self.naming.as_str().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Record of the last successful write pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// [`CacheKey::hash`] of the pass.
    pub key: String,
    /// Artefacts written, relative to the output directory.
    pub artifacts: Vec<Utf8PathBuf>,
}

impl Manifest {
    /// Returns `true` when `key` matches and every listed artefact still exists.
    #[must_use]
    pub fn is_fresh(&self, key: &str, out_dir: &Utf8Path) -> bool {
        self.key == key && self.artifacts.iter().all(|path| out_dir.join(path).is_file())
    }

    /// Artefacts this pass wrote that are absent from `current`.
    #[must_use]
    pub fn orphans<'a, I>(&self, current: I) -> Vec<Utf8PathBuf>
    where
        I: IntoIterator<Item = &'a Utf8PathBuf>,
    {
        let current: BTreeSet<&Utf8PathBuf> = current.into_iter().collect();
        self.artifacts
            .iter()
            .filter(|path| !current.contains(path))
            .cloned()
            .collect()
    }
}

/// Reads the manifest from `out_dir`, treating an absent or unreadable one as
/// missing.
#[must_use]
pub fn read_manifest(out_dir: &Utf8Path) -> Option<Manifest> {
    let path = out_dir.join(MANIFEST_FILE);
    let dir = Dir::open_ambient_dir(out_dir, ambient_authority()).ok()?;
    let text = dir.read_to_string(MANIFEST_FILE).ok()?;
    match serde_json::from_str(&text) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "ignoring unreadable manifest");
            None
        }
    }
}

/// Writes `manifest` into `out_dir`.
///
/// # Errors
///
/// Returns an error when the directory cannot be opened or the file written.
pub fn write_manifest(out_dir: &Utf8Path, manifest: &Manifest) -> Result<(), CliError> {
    let path = out_dir.join(MANIFEST_FILE);
    let content = serde_json::to_string_pretty(manifest).map_err(|source| CliError::Manifest {
        path: path.clone(),
        source,
    })?;
    let dir = Dir::open_ambient_dir(out_dir, ambient_authority())
        .map_err(|err| CliError::io(out_dir, err))?;
    let mut file = dir
        .open_with(
            MANIFEST_FILE,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|err| CliError::io(&path, err))?;
    file.write_all(content.as_bytes())
        .map_err(|err| CliError::io(&path, err))
}

/// Removes `paths` from `out_dir`, skipping any that are already gone.
///
/// Returns the paths that were removed.
///
/// # Errors
///
/// Returns an error when the directory cannot be opened or a file removed.
pub fn remove_artifacts(
    out_dir: &Utf8Path,
    paths: &[Utf8PathBuf],
) -> Result<Vec<Utf8PathBuf>, CliError> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }
    let dir = Dir::open_ambient_dir(out_dir, ambient_authority())
        .map_err(|err| CliError::io(out_dir, err))?;
    let mut removed = Vec::new();
    for path in paths {
        match dir.remove_file(path) {
            Ok(()) => removed.push(path.clone()),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(CliError::io(out_dir.join(path), err)),
        }
    }
    Ok(removed)
}

/// Computes a fingerprint over every file below `src_dir`.
///
/// Files are visited in sorted order and each contributes its relative path
/// and contents, so the result is independent of directory iteration order.
///
/// # Errors
///
/// Returns an error when a directory or file cannot be read.
pub fn fingerprint_sources(src_dir: &Utf8Path) -> Result<String, CliError> {
    let dir = Dir::open_ambient_dir(src_dir, ambient_authority())
        .map_err(|err| CliError::io(src_dir, err))?;
    let mut hasher = Sha256::new();
    hash_directory_recursive(&dir, Utf8Path::new(""), src_dir, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn hash_directory_recursive(
    dir: &Dir,
    base: &Utf8Path,
    src_dir: &Utf8Path,
    hasher: &mut Sha256,
) -> Result<(), CliError> {
    let here = src_dir.join(base);
    let mut entries = Vec::new();
    for entry_result in dir.read_dir(".").map_err(|err| CliError::io(&here, err))? {
        let entry = entry_result.map_err(|err| CliError::io(&here, err))?;
        let file_name = Utf8PathBuf::from(entry.file_name().map_err(|err| CliError::io(&here, err))?);
        let file_type = entry.file_type().map_err(|err| CliError::io(&here, err))?;
        entries.push((file_name, file_type));
    }

    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let rel = base.join(&name);
        if file_type.is_dir() {
            let subdir = dir
                .open_dir(&name)
                .map_err(|err| CliError::io(src_dir.join(&rel), err))?;
            hash_directory_recursive(&subdir, &rel, src_dir, hasher)?;
        } else if file_type.is_file() {
            hash_file(dir, &name, &rel, src_dir, hasher)?;
        }
    }
    Ok(())
}

fn hash_file(
    dir: &Dir,
    name: &Utf8Path,
    rel: &Utf8Path,
    src_dir: &Utf8Path,
    hasher: &mut Sha256,
) -> Result<(), CliError> {
    let mut file = dir
        .open(name)
        .map_err(|err| CliError::io(src_dir.join(rel), err))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|err| CliError::io(src_dir.join(rel), err))?;
    hasher.update(rel.as_str().as_bytes());
    hasher.update(&buffer);
    Ok(())
}
