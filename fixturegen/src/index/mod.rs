//! Per-module symbol table built from parsed Rust sources.
//!
//! The index records what every module declares: types with their attributes
//! and fields, inherent `impl` blocks, `use` bindings and child modules. The
//! extractor, prober and introspector answer all of their questions from this
//! table, so no component ever needs to load or run user code.

mod loader;
mod path;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use syn::{FnArg, ImplItem, Item, UseTree};

pub use loader::{LoadedIndex, load_crate_dir, module_path_for};
pub use path::{CRATE_ROOT, QualifiedName};
pub(crate) use path::path_segments;

/// Guards against `use` cycles while expanding imports.
const MAX_IMPORT_DEPTH: usize = 16;

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A `struct` with its fields as declared.
    Struct(syn::Fields),
    /// An `enum`.
    Enum,
    /// A `union`.
    Union,
    /// A `type` alias.
    Alias,
}

/// A type declared directly in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Identifier of the type.
    pub name: String,
    /// Outer attributes in source order.
    pub attrs: Vec<syn::Attribute>,
    /// Structural shape of the declaration.
    pub shape: TypeShape,
}

/// An associated function declared in an inherent `impl` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
    /// Function identifier.
    pub name: String,
    /// Number of parameters, excluding any `self` receiver.
    pub params: usize,
    /// Whether the function takes `self` in any form.
    pub has_receiver: bool,
}

impl FnDecl {
    /// Returns `true` for functions callable as `Type::name()`.
    #[must_use]
    pub const fn is_nullary(&self) -> bool {
        self.params == 0 && !self.has_receiver
    }
}

/// An inherent `impl` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplDecl {
    /// Self type path as written, generic arguments dropped.
    pub self_path: Vec<String>,
    /// Functions in declaration order.
    pub functions: Vec<FnDecl>,
}

/// Everything a single module declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleIndex {
    /// Declared types in source order.
    pub types: Vec<TypeDecl>,
    /// Inherent `impl` blocks in source order.
    pub impls: Vec<ImplDecl>,
    /// Local name to imported path, as written in the `use` item.
    pub imports: BTreeMap<String, QualifiedName>,
    /// Targets of glob imports, as written.
    pub globs: Vec<QualifiedName>,
    /// Child module names in declaration order.
    pub children: Vec<String>,
}

impl ModuleIndex {
    /// Finds a declared type by identifier.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| decl.name == name)
    }
}

/// Symbol table for a whole crate, keyed by module path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIndex {
    modules: BTreeMap<QualifiedName, ModuleIndex>,
}

impl SourceIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every item of `file` as belonging to `module`.
    pub fn add_file(&mut self, module: &QualifiedName, file: &syn::File) {
        self.add_items(module, &file.items);
    }

    /// Parses `source` and indexes it as `module`.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `source` is not a valid Rust file.
    pub fn parse_str(&mut self, module: &QualifiedName, source: &str) -> syn::Result<()> {
        let file = syn::parse_file(source)?;
        self.add_file(module, &file);
        Ok(())
    }

    /// Iterates modules in path order.
    pub fn modules(&self) -> impl Iterator<Item = (&QualifiedName, &ModuleIndex)> {
        self.modules.iter()
    }

    /// Looks up a module by path.
    #[must_use]
    pub fn module(&self, path: &QualifiedName) -> Option<&ModuleIndex> {
        self.modules.get(path)
    }

    /// Looks up a type by its fully qualified name.
    #[must_use]
    pub fn lookup_type(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.module(&name.namespace())?.find_type(name.simple_name())
    }

    /// Resolves a path written inside `module` to a qualified name.
    ///
    /// `crate::` paths are absolute, `self::` and `super::` are relative, a
    /// first segment bound by a `use` expands to the bound path, and a first
    /// segment naming a child module stays relative to `module`. A bare
    /// identifier is looked up in `module`, then through its glob imports,
    /// and otherwise assumed to be declared in `module`. Any other
    /// multi-segment path is returned verbatim as an external path.
    #[must_use]
    pub fn resolve_path(&self, module: &QualifiedName, segments: &[String]) -> QualifiedName {
        self.resolve_at_depth(module, segments, 0)
    }

    fn resolve_at_depth(
        &self,
        module: &QualifiedName,
        segments: &[String],
        depth: usize,
    ) -> QualifiedName {
        let Some((first, rest)) = segments.split_first() else {
            return module.clone();
        };
        match first.as_str() {
            CRATE_ROOT => QualifiedName::new(segments.to_vec()),
            "self" => self.resolve_at_depth(module, rest, depth),
            "super" => {
                let parent = module.parent().unwrap_or_else(|| module.clone());
                self.resolve_at_depth(&parent, rest, depth)
            }
            _ => self.resolve_named(module, first, rest, depth),
        }
    }

    fn resolve_named(
        &self,
        module: &QualifiedName,
        first: &str,
        rest: &[String],
        depth: usize,
    ) -> QualifiedName {
        let entry = self.module(module);
        if let Some(bound) = entry.and_then(|m| m.imports.get(first)) {
            if bound.segments() == [first] || depth >= MAX_IMPORT_DEPTH {
                return QualifiedName::new(bound.segments().to_vec()).join(rest);
            }
            let expanded = bound.join(rest);
            return self.resolve_at_depth(module, expanded.segments(), depth + 1);
        }
        if entry.is_some_and(|m| m.children.iter().any(|child| child == first)) {
            return module.child(first).join(rest);
        }
        if !rest.is_empty() {
            let mut segments = vec![first.to_owned()];
            segments.extend(rest.iter().cloned());
            return QualifiedName::new(segments);
        }
        if entry.is_some_and(|m| m.find_type(first).is_some()) {
            return module.child(first);
        }
        let via_glob = entry.into_iter().flat_map(|m| m.globs.iter()).find_map(|glob| {
            if depth >= MAX_IMPORT_DEPTH {
                return None;
            }
            let target = self.resolve_at_depth(module, glob.segments(), depth + 1);
            let candidate = target.child(first);
            self.lookup_type(&candidate).map(|_| candidate)
        });
        via_glob.unwrap_or_else(|| module.child(first))
    }

    fn add_items(&mut self, module: &QualifiedName, items: &[Item]) {
        let mut nested = Vec::new();
        let entry = self.modules.entry(module.clone()).or_default();
        for item in items {
            match item {
                Item::Struct(decl) => entry.types.push(TypeDecl {
                    name: decl.ident.to_string(),
                    attrs: decl.attrs.clone(),
                    shape: TypeShape::Struct(decl.fields.clone()),
                }),
                Item::Enum(decl) => entry.types.push(TypeDecl {
                    name: decl.ident.to_string(),
                    attrs: decl.attrs.clone(),
                    shape: TypeShape::Enum,
                }),
                Item::Union(decl) => entry.types.push(TypeDecl {
                    name: decl.ident.to_string(),
                    attrs: decl.attrs.clone(),
                    shape: TypeShape::Union,
                }),
                Item::Type(decl) => entry.types.push(TypeDecl {
                    name: decl.ident.to_string(),
                    attrs: decl.attrs.clone(),
                    shape: TypeShape::Alias,
                }),
                Item::Impl(block) if block.trait_.is_none() => {
                    if let Some(decl) = inherent_impl(block) {
                        entry.impls.push(decl);
                    }
                }
                Item::Use(item_use) => {
                    collect_use_tree(&item_use.tree, &mut Vec::new(), entry);
                }
                Item::Mod(item_mod) => {
                    let name = item_mod.ident.to_string();
                    entry.children.push(name.clone());
                    if let Some((_, content)) = &item_mod.content {
                        nested.push((name, content));
                    }
                }
                _ => {}
            }
        }
        for (name, content) in nested {
            self.add_items(&module.child(&name), content);
        }
    }
}

fn inherent_impl(block: &syn::ItemImpl) -> Option<ImplDecl> {
    let syn::Type::Path(type_path) = block.self_ty.as_ref() else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let functions = block
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) => Some(fn_decl(&method.sig)),
            _ => None,
        })
        .collect();
    Some(ImplDecl {
        self_path: path_segments(&type_path.path),
        functions,
    })
}

fn fn_decl(sig: &syn::Signature) -> FnDecl {
    let has_receiver = sig
        .inputs
        .iter()
        .any(|input| matches!(input, FnArg::Receiver(_)));
    let params = sig
        .inputs
        .iter()
        .filter(|input| matches!(input, FnArg::Typed(_)))
        .count();
    FnDecl {
        name: sig.ident.to_string(),
        params,
        has_receiver,
    }
}

fn collect_use_tree(tree: &UseTree, prefix: &mut Vec<String>, module: &mut ModuleIndex) {
    match tree {
        UseTree::Path(use_path) => {
            prefix.push(use_path.ident.to_string());
            collect_use_tree(&use_path.tree, prefix, module);
            prefix.pop();
        }
        UseTree::Name(use_name) => {
            let ident = use_name.ident.to_string();
            if ident == "self" {
                if let Some(last) = prefix.last() {
                    module
                        .imports
                        .insert(last.clone(), QualifiedName::new(prefix.clone()));
                }
            } else {
                let target = QualifiedName::new(prefix.clone()).child(&ident);
                module.imports.insert(ident, target);
            }
        }
        UseTree::Rename(rename) => {
            let alias = rename.rename.to_string();
            if alias == "_" {
                return;
            }
            let ident = rename.ident.to_string();
            let base = QualifiedName::new(prefix.clone());
            let target = if ident == "self" { base } else { base.child(&ident) };
            module.imports.insert(alias, target);
        }
        UseTree::Glob(_) => module.globs.push(QualifiedName::new(prefix.clone())),
        UseTree::Group(group) => {
            for item in &group.items {
                collect_use_tree(item, prefix, module);
            }
        }
    }
}
