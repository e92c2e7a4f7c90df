//! Detects the optional factory functions of a dataset definition.

use crate::index::{FnDecl, SourceIndex};
use crate::metadata::DatasetDefinition;

/// Mandatory function turning a data model into an entity.
pub const BUILD_FN: &str = "build";
/// Optional factory returning a valid data model.
pub const VALID_FACTORY_FN: &str = "build_valid";
/// Optional factory returning an invalid data model.
pub const INVALID_FACTORY_FN: &str = "build_invalid";

/// Optional construction entry points found on a definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    /// `build_valid()` exists.
    pub has_valid_factory: bool,
    /// `build_invalid()` exists.
    pub has_invalid_factory: bool,
}

/// Probes the base type of `definition` for `build_valid` and `build_invalid`.
///
/// Every inherent `impl` block in the index whose self type resolves to the
/// base type is consulted. Only the name and the absence of parameters are
/// checked. When the base type is not in the index both capabilities are
/// reported absent.
#[must_use]
pub fn probe(index: &SourceIndex, definition: &DatasetDefinition) -> CapabilitySet {
    if index.lookup_type(&definition.base).is_none() {
        tracing::warn!(
            definition = %definition.base,
            "base type not found in the source index; optional factories disabled"
        );
        return CapabilitySet::default();
    }

    let functions = base_functions(index, definition);
    if !functions.iter().any(|f| f.name == BUILD_FN) {
        tracing::warn!(
            definition = %definition.base,
            "no `{BUILD_FN}` function found on the dataset definition"
        );
    }

    let has_nullary = |name: &str| functions.iter().any(|f| f.name == name && f.is_nullary());
    CapabilitySet {
        has_valid_factory: has_nullary(VALID_FACTORY_FN),
        has_invalid_factory: has_nullary(INVALID_FACTORY_FN),
    }
}

fn base_functions<'a>(index: &'a SourceIndex, definition: &DatasetDefinition) -> Vec<&'a FnDecl> {
    index
        .modules()
        .flat_map(|(module, entry)| {
            entry
                .impls
                .iter()
                .filter(move |block| index.resolve_path(module, &block.self_path) == definition.base)
        })
        .flat_map(|block| block.functions.iter())
        .collect()
}
