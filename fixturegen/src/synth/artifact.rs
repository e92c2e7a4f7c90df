//! Structured description of a generated fixture, prior to rendering.

use camino::Utf8PathBuf;
use heck::ToSnakeCase;

use super::NamingStyle;
use crate::fields::FieldDescriptor;
use crate::index::QualifiedName;

/// Expression used to initialise the wrapped model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultModel {
    /// `Base::build_valid()`.
    ValidFactory,
    /// `<Model as Default>::default()`.
    ModelDefault,
}

/// What a generated method does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// Fresh fixture over the default model.
    DefaultFixture,
    /// Fresh fixture over a caller-supplied model.
    WithModel,
    /// Fresh fixture over `Base::build_invalid()`.
    InvalidFixture,
    /// Replaces the whole model.
    UseModel,
    /// Borrows the model.
    GetModel,
    /// Builds the entity from a default fixture.
    BuildDefault,
    /// Sets one field.
    WithField(FieldDescriptor),
    /// Resets one field to its `Default` value.
    WithoutField(FieldDescriptor),
    /// Reads one field.
    GetField(FieldDescriptor),
    /// Delegates to `Base::build`.
    Build,
}

/// A named method of the generated fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureMethod {
    /// Method identifier.
    pub name: String,
    /// Method behaviour.
    pub kind: MethodKind,
}

/// Everything needed to render one fixture module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureArtifact {
    /// Qualified name of the fixture type.
    pub name: QualifiedName,
    /// Module the fixture belongs to; the dataset definition's module.
    pub namespace: QualifiedName,
    /// Fixture type identifier, `<Entity>Fixture`.
    pub class_name: String,
    /// Dataset definition the fixture was generated from.
    pub source: QualifiedName,
    /// Types imported by the fixture module.
    pub imports: Vec<QualifiedName>,
    /// Simple name of the entity type.
    pub entity_type: String,
    /// Simple name of the data model type.
    pub model_type: String,
    /// Simple name of the dataset definition type.
    pub base_type: String,
    /// Initialiser of the wrapped model.
    pub default_model: DefaultModel,
    /// Methods in emission order.
    pub methods: Vec<FixtureMethod>,
    /// Naming style the method names were derived with.
    pub naming: NamingStyle,
}

impl FixtureArtifact {
    /// Identifier of the module the artefact should be mounted as.
    #[must_use]
    pub fn module_name(&self) -> String {
        self.class_name.to_snake_case()
    }

    /// Path of the artefact relative to the output directory.
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        crate::sink::mount_path(&self.namespace, &self.class_name)
    }

    /// Method names in emission order.
    #[must_use]
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|method| method.name.as_str()).collect()
    }

    /// Finds a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&FixtureMethod> {
        self.methods.iter().find(|method| method.name == name)
    }
}
