//! Renders a [`FixtureArtifact`] to Rust source.
//!
//! The output is meant to be mounted with `include!` as a child module of the
//! dataset definition's module, so it carries no inner attributes and reaches
//! the definition through `use super::*`.

use super::{DefaultModel, FixtureArtifact, FixtureMethod, MethodKind, NamingStyle};
use crate::fields::FieldDescriptor;

const INDENT: &str = "    ";

/// Line-oriented text buffer with indentation tracking.
#[derive(Default)]
struct Emitter {
    out: String,
    depth: usize,
}

impl Emitter {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn indented(&mut self, text: &str) {
        self.depth += 1;
        self.line(text);
        self.depth = self.depth.saturating_sub(1);
    }

    fn blank(&mut self) {
        self.line("");
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }
}

/// Renders `artifact` as the body of its fixture module.
#[must_use]
pub fn render(artifact: &FixtureArtifact) -> String {
    let mut emitter = Emitter::default();
    header(&mut emitter, artifact);
    imports(&mut emitter, artifact);
    declaration(&mut emitter, artifact);
    default_impl(&mut emitter, artifact);
    inherent_impl(&mut emitter, artifact);
    emitter.out
}

fn header(emitter: &mut Emitter, artifact: &FixtureArtifact) {
    emitter.line(&format!(
        "// @generated by fixturegen from `{}`. Do not edit.",
        artifact.source
    ));
    emitter.line(&format!("// Fixture `{}`.", artifact.name));
    emitter.line(&format!(
        "// Mount inside `{}` with `fixturegen::include_fixture!({}, \"{}\");`.",
        artifact.namespace,
        artifact.module_name(),
        artifact.relative_path()
    ));
    emitter.blank();
}

fn imports(emitter: &mut Emitter, artifact: &FixtureArtifact) {
    emitter.line("use super::*;");
    for import in &artifact.imports {
        emitter.line(&format!("use {import};"));
    }
    emitter.blank();
}

fn declaration(emitter: &mut Emitter, artifact: &FixtureArtifact) {
    emitter.line(&format!(
        "/// Fluent builder of [`{}`] test instances.",
        artifact.entity_type
    ));
    emitter.open(&format!("pub struct {} {{", artifact.class_name));
    emitter.line(&format!("model: {},", artifact.model_type));
    emitter.close("}");
    emitter.blank();
}

fn default_impl(emitter: &mut Emitter, artifact: &FixtureArtifact) {
    let initialiser = match artifact.default_model {
        DefaultModel::ValidFactory => format!("{}::build_valid()", artifact.base_type),
        DefaultModel::ModelDefault => format!(
            "<{} as ::core::default::Default>::default()",
            artifact.model_type
        ),
    };
    emitter.open(&format!(
        "impl ::core::default::Default for {} {{",
        artifact.class_name
    ));
    emitter.open("fn default() -> Self {");
    emitter.open("Self {");
    emitter.line(&format!("model: {initialiser},"));
    emitter.close("}");
    emitter.close("}");
    emitter.close("}");
    emitter.blank();
}

fn inherent_impl(emitter: &mut Emitter, artifact: &FixtureArtifact) {
    if artifact.naming == NamingStyle::Camel {
        emitter.line("#[expect(non_snake_case, reason = \"camel-case fixture methods\")]");
    }
    emitter.open(&format!("impl {} {{", artifact.class_name));
    for (position, method) in artifact.methods.iter().enumerate() {
        if position > 0 {
            emitter.blank();
        }
        method_item(emitter, artifact, method);
    }
    emitter.close("}");
}

fn method_item(emitter: &mut Emitter, artifact: &FixtureArtifact, method: &FixtureMethod) {
    let name = &method.name;
    let model = &artifact.model_type;
    let entity = &artifact.entity_type;
    let base = &artifact.base_type;
    match &method.kind {
        MethodKind::DefaultFixture => {
            doc_and_must_use(emitter, "Creates a fixture over the default model.");
            emitter.open(&format!("pub fn {name}() -> Self {{"));
            emitter.line("<Self as ::core::default::Default>::default()");
        }
        MethodKind::WithModel => {
            doc_and_must_use(emitter, "Creates a fixture over `model`.");
            emitter.open(&format!("pub const fn {name}(model: {model}) -> Self {{"));
            emitter.line("Self { model }");
        }
        MethodKind::InvalidFixture => {
            doc_and_must_use(emitter, "Creates a fixture over the invalid model.");
            emitter.open(&format!("pub fn {name}() -> Self {{"));
            emitter.open("Self {");
            emitter.line(&format!("model: {base}::build_invalid(),"));
            emitter.close("}");
        }
        MethodKind::UseModel => {
            doc_and_must_use(emitter, "Replaces the whole model.");
            emitter.open(&format!("pub fn {name}(mut self, model: {model}) -> Self {{"));
            emitter.line("self.model = model;");
            emitter.line("self");
        }
        MethodKind::GetModel => {
            doc_and_must_use(emitter, "Returns the current model.");
            emitter.open(&format!("pub const fn {name}(&self) -> &{model} {{"));
            emitter.line("&self.model");
        }
        MethodKind::BuildDefault => {
            let default_fixture = artifact.naming.method_name("default", "fixture");
            doc_and_must_use(emitter, &format!("Builds [`{entity}`] from the default model."));
            emitter.open(&format!("pub fn {name}() -> {entity} {{"));
            emitter.line(&format!("Self::{default_fixture}().build()"));
        }
        MethodKind::WithField(field) => with_field(emitter, name, field),
        MethodKind::WithoutField(field) => without_field(emitter, name, field),
        MethodKind::GetField(field) => get_field(emitter, name, field),
        MethodKind::Build => {
            doc_and_must_use(emitter, &format!("Builds [`{entity}`] from the current model."));
            emitter.open(&format!("pub fn {name}(self) -> {entity} {{"));
            emitter.line(&format!("{base}::build(self.model)"));
        }
    }
    emitter.close("}");
}

fn with_field(emitter: &mut Emitter, name: &str, field: &FieldDescriptor) {
    doc_and_must_use(emitter, &format!("Sets `{}`.", field.name));
    emitter.open(&format!(
        "pub fn {name}(mut self, value: {}) -> Self {{",
        field.declared_type
    ));
    emitter.line(&format!("self.model.{} = value;", field.member));
    emitter.line("self");
}

/// The `for<'a>` bound is checked at call sites, not at the definition.
fn without_field(emitter: &mut Emitter, name: &str, field: &FieldDescriptor) {
    doc_and_must_use(emitter, &format!("Resets `{}` to its default value.", field.name));
    emitter.line(&format!("pub fn {name}(mut self) -> Self"));
    emitter.line("where");
    emitter.indented(&format!(
        "for<'a> {}: ::core::default::Default,",
        field.declared_type
    ));
    emitter.open("{");
    emitter.line(&format!(
        "self.model.{} = ::core::default::Default::default();",
        field.member
    ));
    emitter.line("self");
}

fn get_field(emitter: &mut Emitter, name: &str, field: &FieldDescriptor) {
    doc_and_must_use(emitter, &format!("Returns `{}`.", field.name));
    if field.primitive_like {
        emitter.open(&format!(
            "pub const fn {name}(&self) -> {} {{",
            field.declared_type
        ));
        emitter.line(&format!("self.model.{}", field.member));
    } else {
        emitter.open(&format!(
            "pub const fn {name}(&self) -> &{} {{",
            field.declared_type
        ));
        emitter.line(&format!("&self.model.{}", field.member));
    }
}

fn doc_and_must_use(emitter: &mut Emitter, doc: &str) {
    emitter.line(&format!("/// {doc}"));
    emitter.line("#[must_use]");
}
