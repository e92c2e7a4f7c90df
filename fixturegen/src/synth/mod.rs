//! Fixture synthesis.
//!
//! Synthesis runs in two steps. [`plan`] decides what the fixture contains
//! and returns a [`FixtureArtifact`]; [`render`] turns that value into
//! source text. Both are pure, so identical inputs always produce identical
//! bytes.

mod artifact;
mod naming;
mod render;


use serde::{Deserialize, Serialize};

use crate::fields::FieldDescriptor;
use crate::metadata::DatasetDefinition;
use crate::probe::CapabilitySet;

pub use artifact::{DefaultModel, FixtureArtifact, FixtureMethod, MethodKind};
pub use naming::{NamingStyle, UnknownNamingStyle, capitalize};
pub use render::render;

/// Options that shape the generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthOptions {
    /// Method naming style.
    pub naming: NamingStyle,
}

impl SynthOptions {
    /// Options with the given naming style.
    #[must_use]
    pub const fn with_naming(naming: NamingStyle) -> Self {
        Self { naming }
    }
}

/// Decides the content of the fixture for `definition`.
#[must_use]
pub fn plan(
    definition: &DatasetDefinition,
    capabilities: CapabilitySet,
    fields: &[FieldDescriptor],
    options: SynthOptions,
) -> FixtureArtifact {
    let naming = options.naming;
    let fixed = |prefix: &str, suffix: &str, kind: MethodKind| FixtureMethod {
        name: naming.method_name(prefix, suffix),
        kind,
    };

    let mut methods = vec![
        fixed("default", "fixture", MethodKind::DefaultFixture),
        fixed("with", "model", MethodKind::WithModel),
    ];
    if capabilities.has_invalid_factory {
        methods.push(fixed("invalid", "fixture", MethodKind::InvalidFixture));
    }
    methods.extend([
        fixed("use", "model", MethodKind::UseModel),
        fixed("get", "model", MethodKind::GetModel),
        fixed("build", "default", MethodKind::BuildDefault),
    ]);
    for field in fields {
        methods.push(fixed("with", &field.name, MethodKind::WithField(field.clone())));
        if !field.primitive_like {
            methods.push(fixed(
                "without",
                &field.name,
                MethodKind::WithoutField(field.clone()),
            ));
        }
        methods.push(fixed("get", &field.name, MethodKind::GetField(field.clone())));
    }
    methods.push(FixtureMethod {
        name: "build".to_owned(),
        kind: MethodKind::Build,
    });

    let mut imports = vec![definition.entity.clone(), definition.data_model.clone()];
    if definition.base.namespace() != definition.owner_namespace {
        imports.push(definition.base.clone());
    }
    let mut seen = Vec::with_capacity(imports.len());
    imports.retain(|import| {
        if seen.contains(import) {
            return false;
        }
        seen.push(import.clone());
        true
    });

    FixtureArtifact {
        name: definition.artifact_name(),
        namespace: definition.owner_namespace.clone(),
        class_name: definition.fixture_name(),
        source: definition.base.clone(),
        imports,
        entity_type: definition.entity.simple_name().to_owned(),
        model_type: definition.data_model.simple_name().to_owned(),
        base_type: definition.base_simple_name.clone(),
        default_model: if capabilities.has_valid_factory {
            DefaultModel::ValidFactory
        } else {
            DefaultModel::ModelDefault
        },
        methods,
        naming,
    }
}

/// Plans and renders the fixture for `definition`.
#[must_use]
pub fn synthesize(
    definition: &DatasetDefinition,
    capabilities: CapabilitySet,
    fields: &[FieldDescriptor],
    options: SynthOptions,
) -> String {
    render(&plan(definition, capabilities, fields, options))
}
