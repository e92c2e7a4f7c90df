//! Qualified names and module-relative path resolution.

use std::fmt;

/// Root segment of every crate-local path.
pub const CRATE_ROOT: &str = "crate";

/// A `::`-separated Rust path such as `crate::domain::PurchaseContract`.
///
/// Crate-local names always start with [`CRATE_ROOT`]. Paths into other
/// crates keep their original first segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Builds a name from its segments.
    #[must_use]
    pub const fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The crate root module, `crate`.
    #[must_use]
    pub fn crate_root() -> Self {
        Self::new(vec![CRATE_ROOT.to_owned()])
    }

    /// Parses a `::`-separated path. Empty segments are dropped.
    ///
    /// ```
    /// use fixturegen::QualifiedName;
    ///
    /// let name = QualifiedName::parse("crate::domain::PurchaseContract");
    /// assert_eq!(name.simple_name(), "PurchaseContract");
    /// assert_eq!(name.namespace().to_string(), "crate::domain");
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self::new(
            path.split("::")
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    /// Path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment, or an empty string for an empty path.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Everything but the final segment.
    #[must_use]
    pub fn namespace(&self) -> Self {
        self.parent().unwrap_or_else(|| Self::new(Vec::new()))
    }

    /// Parent path, or `None` for single-segment and empty paths.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.segments.split_last()?;
        if parent.is_empty() {
            return None;
        }
        Some(Self::new(parent.to_vec()))
    }

    /// Appends one segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        Self::new(segments)
    }

    /// Appends every segment of `tail`.
    #[must_use]
    pub fn join<I, S>(&self, tail: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = self.segments.clone();
        segments.extend(tail.into_iter().map(|segment| segment.as_ref().to_owned()));
        Self::new(segments)
    }

    /// Returns `true` when the path is rooted at `crate`.
    #[must_use]
    pub fn is_crate_local(&self) -> bool {
        self.segments.first().is_some_and(|first| first == CRATE_ROOT)
    }

    /// Returns `true` when the path has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Segments of a `syn::Path` with generic arguments dropped.
pub(crate) fn path_segments(path: &syn::Path) -> Vec<String> {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect()
}
