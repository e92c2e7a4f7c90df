//! Rewrites field types so they name the same items from the fixture module.
//!
//! The fixture is mounted beneath the owner module, while the data model may
//! live in a module nested further down with its own declarations and `use`
//! items. Paths that the index can place are therefore spelt absolutely.

use syn::visit_mut::{self, VisitMut};
use syn::{Path, PathArguments, Type, TypePath};

use crate::index::{QualifiedName, SourceIndex, path_segments};

/// Qualifies the paths in `ty` as written inside `module`.
///
/// A path resolving to a type declared in the index becomes a `crate::`
/// path, and one whose first segment is bound by a `use` of another crate
/// becomes a `::` path. Prelude types and anything else the index cannot
/// place are left as written.
pub(crate) fn qualify(index: &SourceIndex, module: &QualifiedName, ty: &Type) -> Type {
    let mut qualified = ty.clone();
    Qualifier { index, module }.visit_type_mut(&mut qualified);
    qualified
}

struct Qualifier<'a> {
    index: &'a SourceIndex,
    module: &'a QualifiedName,
}

impl Qualifier<'_> {
    fn absolute(&self, path: &Path) -> Option<String> {
        if path.leading_colon.is_some() {
            return None;
        }
        let segments = path_segments(path);
        let first = segments.first()?;
        let resolved = self.index.resolve_path(self.module, &segments);
        if self.index.lookup_type(&resolved).is_some() {
            return Some(resolved.to_string());
        }
        let imported = self
            .index
            .module(self.module)
            .is_some_and(|entry| entry.imports.contains_key(first));
        if imported && !resolved.is_crate_local() {
            return Some(format!("::{resolved}"));
        }
        matches!(first.as_str(), "self" | "super").then(|| resolved.to_string())
    }
}

impl VisitMut for Qualifier<'_> {
    fn visit_type_path_mut(&mut self, node: &mut TypePath) {
        visit_mut::visit_type_path_mut(self, node);
        if node.qself.is_some() {
            return;
        }
        let Some(text) = self.absolute(&node.path) else {
            return;
        };
        let Ok(mut path) = syn::parse_str::<Path>(&text) else {
            return;
        };
        let arguments = node
            .path
            .segments
            .last()
            .map_or(PathArguments::None, |segment| segment.arguments.clone());
        if let Some(last) = path.segments.last_mut() {
            last.arguments = arguments;
        }
        node.path = path;
    }
}
