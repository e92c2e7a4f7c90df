//! Destinations for synthesised fixture text.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use heck::ToSnakeCase;

use crate::error::SinkError;
use crate::index::{CRATE_ROOT, QualifiedName};

/// Persists generated artefacts.
///
/// Implementations must accept concurrent writes to distinct names.
pub trait ArtifactSink {
    /// Stores `content` as the artefact `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the artefact cannot be stored.
    fn write(&self, name: &QualifiedName, content: &str) -> Result<(), SinkError>;
}

/// Output path of a fixture type declared in `namespace`.
///
/// Module segments below `crate` become directories and the file is the
/// snake-cased type name.
///
/// ```
/// use fixturegen::{QualifiedName, mount_path};
///
/// let path = mount_path(&QualifiedName::parse("crate::datasets"), "PurchaseContractFixture");
/// assert_eq!(path, "datasets/purchase_contract_fixture.rs");
/// ```
#[must_use]
pub fn mount_path(namespace: &QualifiedName, class_name: &str) -> Utf8PathBuf {
    let mut path = Utf8PathBuf::new();
    let segments = namespace.segments();
    let below_root = match segments.split_first() {
        Some((first, rest)) if first == CRATE_ROOT => rest,
        _ => segments,
    };
    for segment in below_root {
        path.push(segment);
    }
    path.push(format!("{}.rs", class_name.to_snake_case()));
    path
}

/// Output path of the artefact `name`, relative to a sink's root.
///
/// # Errors
///
/// Returns [`SinkError::InvalidName`] when `name` has no type segment.
pub fn artifact_relative_path(name: &QualifiedName) -> Result<Utf8PathBuf, SinkError> {
    let class_name = name.simple_name();
    if class_name.is_empty() || class_name == CRATE_ROOT {
        return Err(SinkError::InvalidName(name.clone()));
    }
    Ok(mount_path(&name.namespace(), class_name))
}

/// Writes artefacts as files beneath a root directory.
///
/// A file is only rewritten when its content changes, so repeated runs leave
/// modification times alone and do not retrigger dependent builds.
#[derive(Debug)]
pub struct DirSink {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirSink {
    /// Opens `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created or opened.
    pub fn create(root: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let root_path = root.into();
        Dir::create_ambient_dir_all(&root_path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root_path, ambient_authority())?;
        Ok(Self {
            root: root_path,
            dir,
        })
    }

    /// Root directory of the sink.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn current_content(&self, relative: &Utf8Path) -> Option<String> {
        let mut file = self.dir.open(relative).ok()?;
        let mut buffer = String::new();
        file.read_to_string(&mut buffer).ok()?;
        Some(buffer)
    }
}

impl ArtifactSink for DirSink {
    fn write(&self, name: &QualifiedName, content: &str) -> Result<(), SinkError> {
        let relative = artifact_relative_path(name)?;
        if self.current_content(&relative).as_deref() == Some(content) {
            tracing::debug!(path = %self.root.join(&relative), "fixture unchanged");
            return Ok(());
        }
        let io_error = |source| SinkError::Io {
            path: self.root.join(&relative),
            source,
        };
        if let Some(parent) = relative.parent().filter(|parent| !parent.as_str().is_empty()) {
            self.dir.create_dir_all(parent).map_err(io_error)?;
        }
        let mut file = self.dir.create(&relative).map_err(io_error)?;
        file.write_all(content.as_bytes()).map_err(io_error)?;
        tracing::debug!(path = %self.root.join(&relative), "fixture written");
        Ok(())
    }
}

/// Keeps artefacts in memory, keyed by relative path.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<BTreeMap<Utf8PathBuf, String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content stored at `relative`, if any.
    #[must_use]
    pub fn get(&self, relative: &Utf8Path) -> Option<String> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(relative)
            .cloned()
    }

    /// Drains every stored artefact in path order.
    #[must_use]
    pub fn into_artifacts(self) -> BTreeMap<Utf8PathBuf, String> {
        self.artifacts
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ArtifactSink for MemorySink {
    fn write(&self, name: &QualifiedName, content: &str) -> Result<(), SinkError> {
        let relative = artifact_relative_path(name)?;
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(relative, content.to_owned());
        Ok(())
    }
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for &S {
    fn write(&self, name: &QualifiedName, content: &str) -> Result<(), SinkError> {
        (**self).write(name, content)
    }
}
