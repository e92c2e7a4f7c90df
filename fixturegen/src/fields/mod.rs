//! Enumerates the fields of a dataset definition's data model.

mod qualify;
mod type_text;


use syn::ext::IdentExt;
use syn::{Fields, Type};

use crate::index::{QualifiedName, SourceIndex, TypeShape};
use crate::metadata::DatasetDefinition;
use qualify::qualify;

pub use type_text::render as render_type;

/// Scalar types that have no empty representation worth a `without_` method.
const PRIMITIVE_LIKE: [&str; 16] = [
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// One named field of a data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name with any `r#` prefix removed; used to derive method names.
    pub name: String,
    /// Field identifier as written; used for member access.
    pub member: String,
    /// Declared type rendered as Rust source.
    pub declared_type: String,
    /// Whether the type is a scalar without an empty form.
    pub primitive_like: bool,
}

impl FieldDescriptor {
    /// Describes a named field. Returns `None` for tuple fields.
    #[must_use]
    pub fn from_field(field: &syn::Field) -> Option<Self> {
        let ident = field.ident.as_ref()?;
        Some(Self {
            name: ident.unraw().to_string(),
            member: ident.to_string(),
            declared_type: render_type(&field.ty),
            primitive_like: is_primitive_like(&field.ty),
        })
    }
}

/// Returns `true` for the unqualified built-in scalar types.
#[must_use]
pub fn is_primitive_like(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let path = &type_path.path;
            path.leading_colon.is_none()
                && path.segments.len() == 1
                && path.segments.first().is_some_and(|segment| {
                    segment.arguments.is_none()
                        && PRIMITIVE_LIKE.iter().any(|name| segment.ident == name)
                })
        }
        Type::Group(group) => is_primitive_like(&group.elem),
        Type::Paren(paren) => is_primitive_like(&paren.elem),
        _ => false,
    }
}

/// Lists the data model's fields in declaration order.
///
/// The data model is first looked up by its qualified name. When that does
/// not find a struct, the owner module and the modules nested beneath it are
/// searched depth-first, in declaration order, for a struct with the data
/// model's simple name. An unresolved data model yields no fields.
#[must_use]
pub fn introspect(index: &SourceIndex, definition: &DatasetDefinition) -> Vec<FieldDescriptor> {
    let resolved = declared_fields(index, &definition.data_model).or_else(|| {
        nested_fields(
            index,
            &definition.owner_namespace,
            definition.data_model.simple_name(),
        )
    });
    resolved.unwrap_or_else(|| {
        tracing::debug!(
            definition = %definition.base,
            data_model = %definition.data_model,
            "data model not found; no per-field methods will be generated"
        );
        Vec::new()
    })
}

/// Resolves the data model directly by qualified name.
fn declared_fields(index: &SourceIndex, data_model: &QualifiedName) -> Option<Vec<FieldDescriptor>> {
    match &index.lookup_type(data_model)?.shape {
        TypeShape::Struct(fields) => Some(describe(index, &data_model.namespace(), fields)),
        TypeShape::Enum | TypeShape::Union | TypeShape::Alias => None,
    }
}

/// Searches `module` and its descendants for a struct named `simple_name`.
fn nested_fields(
    index: &SourceIndex,
    module: &QualifiedName,
    simple_name: &str,
) -> Option<Vec<FieldDescriptor>> {
    let entry = index.module(module)?;
    let local = entry
        .types
        .iter()
        .filter(|decl| decl.name == simple_name)
        .find_map(|decl| match &decl.shape {
            TypeShape::Struct(fields) => Some(describe(index, module, fields)),
            TypeShape::Enum | TypeShape::Union | TypeShape::Alias => None,
        });
    local.or_else(|| {
        entry
            .children
            .iter()
            .find_map(|child| nested_fields(index, &module.child(child), simple_name))
    })
}

/// Describes named fields, qualifying their types as seen from `module`.
fn describe(index: &SourceIndex, module: &QualifiedName, fields: &Fields) -> Vec<FieldDescriptor> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                let mut descriptor = FieldDescriptor::from_field(field)?;
                descriptor.declared_type = render_type(&qualify(index, module, &field.ty));
                Some(descriptor)
            })
            .collect(),
        Fields::Unnamed(_) | Fields::Unit => Vec::new(),
    }
}
