//! Builds a [`SourceIndex`] from a crate's `src/` directory.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::Read;

use super::{QualifiedName, SourceIndex};
use crate::error::FixtureError;

/// Result of indexing a source directory.
#[derive(Debug, Default)]
pub struct LoadedIndex {
    /// Symbol table for every file that parsed.
    pub index: SourceIndex,
    /// Files that were indexed, relative to the source directory, in visit order.
    pub files: Vec<Utf8PathBuf>,
    /// Per-file parse failures. The remaining files are still indexed.
    pub failures: Vec<FixtureError>,
}

/// Maps a file path relative to `src/` onto its module path.
///
/// Returns `None` for files that are not Rust sources.
///
/// ```
/// use camino::Utf8Path;
/// use fixturegen::module_path_for;
///
/// let module = module_path_for(Utf8Path::new("datasets/mod.rs"));
/// assert_eq!(module.map(|m| m.to_string()).as_deref(), Some("crate::datasets"));
/// ```
#[must_use]
pub fn module_path_for(relative: &Utf8Path) -> Option<QualifiedName> {
    if relative.extension() != Some("rs") {
        return None;
    }
    let mut module = QualifiedName::crate_root();
    if let Some(parent) = relative.parent() {
        module = module.join(parent.components().map(|component| component.as_str()));
    }
    let stem = relative.file_stem()?;
    let is_root_file = relative.parent().is_none_or(|parent| parent.as_str().is_empty())
        && matches!(stem, "lib" | "main");
    if stem == "mod" || is_root_file {
        return Some(module);
    }
    Some(module.child(stem))
}

/// Parses every Rust file under `src_dir` into one index.
///
/// Files are visited in sorted order so the resulting index, and everything
/// generated from it, is stable between runs. `src/bin/` is skipped, as is
/// `main.rs` when the crate also has a `lib.rs`.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] when the directory cannot be read. Files that
/// fail to parse are reported through [`LoadedIndex::failures`] instead.
pub fn load_crate_dir(src_dir: &Utf8Path) -> Result<LoadedIndex, FixtureError> {
    let dir = Dir::open_ambient_dir(src_dir, ambient_authority()).map_err(|err| {
        FixtureError::Io {
            path: src_dir.to_path_buf(),
            source: err,
        }
    })?;
    let mut files = Vec::new();
    collect_rust_files(&dir, src_dir, Utf8Path::new(""), &mut files)?;

    let has_lib = files.iter().any(|file| file.as_str() == "lib.rs");
    files.retain(|file| !(has_lib && file.as_str() == "main.rs"));

    let mut loaded = LoadedIndex::default();
    for relative in files {
        let Some(module) = module_path_for(&relative) else {
            continue;
        };
        let source = read_source(&dir, src_dir, &relative)?;
        match syn::parse_file(&source) {
            Ok(file) => loaded.index.add_file(&module, &file),
            Err(err) => {
                tracing::warn!(path = %src_dir.join(&relative), "skipping unparsable source file");
                loaded.failures.push(FixtureError::Parse {
                    path: src_dir.join(&relative),
                    message: err.to_string(),
                });
            }
        }
        loaded.files.push(relative);
    }
    Ok(loaded)
}

fn collect_rust_files(
    dir: &Dir,
    root: &Utf8Path,
    base: &Utf8Path,
    files: &mut Vec<Utf8PathBuf>,
) -> Result<(), FixtureError> {
    let io_error = |source| FixtureError::Io {
        path: root.join(base),
        source,
    };
    let mut entries = Vec::new();
    for entry_result in dir.read_dir(".").map_err(io_error)? {
        let entry = entry_result.map_err(io_error)?;
        let name = Utf8PathBuf::from(entry.file_name().map_err(io_error)?);
        let file_type = entry.file_type().map_err(io_error)?;
        entries.push((name, file_type));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let rel = base.join(&name);
        if file_type.is_dir() {
            if base.as_str().is_empty() && name.as_str() == "bin" {
                continue;
            }
            let subdir = dir.open_dir(&name).map_err(|source| FixtureError::Io {
                path: root.join(&rel),
                source,
            })?;
            collect_rust_files(&subdir, root, &rel, files)?;
        } else if file_type.is_file() && name.extension() == Some("rs") {
            files.push(rel);
        }
    }
    Ok(())
}

fn read_source(dir: &Dir, root: &Utf8Path, relative: &Utf8Path) -> Result<String, FixtureError> {
    let io_error = |source| FixtureError::Io {
        path: root.join(relative),
        source,
    };
    let mut file = dir.open(relative).map_err(io_error)?;
    let mut buffer = String::new();
    file.read_to_string(&mut buffer).map_err(io_error)?;
    Ok(buffer)
}
