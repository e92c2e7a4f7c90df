//! Reads `#[dataset(...)]` annotations into [`DatasetDefinition`]s.

use syn::{Attribute, Meta, Type};

use crate::error::SchemaError;
use crate::index::{QualifiedName, SourceIndex, TypeDecl, path_segments};

/// Identifier of the schema annotation.
pub const ANNOTATION: &str = "dataset";
/// Attribute naming the entity the fixture builds.
pub const ENTITY_ATTRIBUTE: &str = "entity";
/// Attribute naming the data carrier the fixture wraps.
pub const DATA_MODEL_ATTRIBUTE: &str = "data_model";

/// Resolved metadata for one annotated dataset definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDefinition {
    /// Entity produced by the definition's `build` function.
    pub entity: QualifiedName,
    /// Data carrier consumed by `build`.
    pub data_model: QualifiedName,
    /// Identifier of the annotated type.
    pub base_simple_name: String,
    /// Qualified name of the annotated type.
    pub base: QualifiedName,
    /// Module declaring the annotated type.
    pub owner_namespace: QualifiedName,
}

impl DatasetDefinition {
    /// Name of the generated fixture type, `<Entity>Fixture`.
    #[must_use]
    pub fn fixture_name(&self) -> String {
        format!("{}Fixture", self.entity.simple_name())
    }

    /// Qualified name of the generated fixture.
    #[must_use]
    pub fn artifact_name(&self) -> QualifiedName {
        self.owner_namespace.child(&self.fixture_name())
    }
}

/// A type declaration together with the module that declares it.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedType<'a> {
    /// Declaring module.
    pub module: &'a QualifiedName,
    /// The declaration itself.
    pub decl: &'a TypeDecl,
}

impl AnnotatedType<'_> {
    /// Qualified name of the declaration.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        self.module.child(&self.decl.name)
    }
}

/// Returns `true` for `#[dataset]` and `#[fixturegen::dataset]`.
#[must_use]
pub fn is_dataset_attribute(attr: &Attribute) -> bool {
    let segments = path_segments(attr.path());
    match segments.as_slice() {
        [only] => only == ANNOTATION,
        [.., krate, last] => krate == "fixturegen" && last == ANNOTATION,
        [] => false,
    }
}

/// Lists every annotated type in index order.
#[must_use]
pub fn discover(index: &SourceIndex) -> Vec<AnnotatedType<'_>> {
    index
        .modules()
        .flat_map(|(module, entry)| {
            entry
                .types
                .iter()
                .filter(|decl| decl.attrs.iter().any(is_dataset_attribute))
                .map(move |decl| AnnotatedType { module, decl })
        })
        .collect()
}

/// Extracts the dataset definition carried by `annotated`.
///
/// Both attribute values are resolved relative to the declaring module.
///
/// # Errors
///
/// Returns [`SchemaError::MissingAnnotation`] when the type is not annotated,
/// [`SchemaError::MissingAttribute`] when `entity` or `data_model` is absent
/// or not a type path, and [`SchemaError::Malformed`] when the arguments do
/// not parse.
pub fn extract(
    index: &SourceIndex,
    annotated: AnnotatedType<'_>,
) -> Result<DatasetDefinition, SchemaError> {
    let definition = annotated.qualified_name();
    let attr = annotated
        .decl
        .attrs
        .iter()
        .find(|attr| is_dataset_attribute(attr))
        .ok_or_else(|| SchemaError::MissingAnnotation {
            definition: definition.clone(),
        })?;

    let (entity, data_model) = parse_arguments(attr).map_err(|err| SchemaError::Malformed {
        definition: definition.clone(),
        message: err.to_string(),
    })?;
    let entity_path = require_path(entity.as_ref(), &definition, ENTITY_ATTRIBUTE)?;
    let model_path = require_path(data_model.as_ref(), &definition, DATA_MODEL_ATTRIBUTE)?;

    Ok(DatasetDefinition {
        entity: index.resolve_path(annotated.module, &path_segments(entity_path)),
        data_model: index.resolve_path(annotated.module, &path_segments(model_path)),
        base_simple_name: annotated.decl.name.clone(),
        base: definition,
        owner_namespace: annotated.module.clone(),
    })
}

fn parse_arguments(attr: &Attribute) -> syn::Result<(Option<Type>, Option<Type>)> {
    let mut entity = None;
    let mut data_model = None;
    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(_) => attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(ENTITY_ATTRIBUTE) {
                entity = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else if meta.path.is_ident(DATA_MODEL_ATTRIBUTE) {
                data_model = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error("unknown key; expected `entity` or `data_model`"))
            }
        })?,
        Meta::NameValue(name_value) => {
            return Err(syn::Error::new_spanned(
                name_value,
                "expected #[dataset(entity = ..., data_model = ...)]",
            ));
        }
    }
    Ok((entity, data_model))
}

fn require_path<'a>(
    ty: Option<&'a Type>,
    definition: &QualifiedName,
    attribute: &'static str,
) -> Result<&'a syn::Path, SchemaError> {
    ty.and_then(type_path)
        .ok_or_else(|| SchemaError::MissingAttribute {
            definition: definition.clone(),
            attribute,
        })
}

fn type_path(ty: &Type) -> Option<&syn::Path> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => Some(&type_path.path),
        Type::Group(group) => type_path(&group.elem),
        Type::Paren(paren) => type_path(&paren.elem),
        _ => None,
    }
}
