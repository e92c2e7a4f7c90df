//! Expansion of `#[dataset(...)]`.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{Generics, Ident, Item, Type, TypePath};

/// Parsed `entity = ..., data_model = ...` arguments.
#[derive(Debug)]
pub(crate) struct DatasetArgs {
    pub(crate) entity: TypePath,
    pub(crate) data_model: TypePath,
}

pub(crate) fn parse_args(attr: TokenStream) -> syn::Result<DatasetArgs> {
    let span = attr.span();
    let mut entity = None;
    let mut data_model = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("entity") {
            entity = Some(type_path(meta.value()?.parse()?, "entity")?);
            Ok(())
        } else if meta.path.is_ident("data_model") {
            data_model = Some(type_path(meta.value()?.parse()?, "data_model")?);
            Ok(())
        } else {
            Err(meta.error("unknown key; expected `entity` or `data_model`"))
        }
    });
    parser.parse2(attr)?;

    let missing = |key: &str| {
        syn::Error::new(
            span,
            format!("#[dataset] requires `{key} = <type>`"),
        )
    };
    Ok(DatasetArgs {
        entity: entity.ok_or_else(|| missing("entity"))?,
        data_model: data_model.ok_or_else(|| missing("data_model"))?,
    })
}

fn type_path(ty: Type, key: &str) -> syn::Result<TypePath> {
    match ty {
        Type::Path(path) if path.qself.is_none() => Ok(path),
        Type::Group(group) => type_path(*group.elem, key),
        Type::Paren(paren) => type_path(*paren.elem, key),
        other => Err(syn::Error::new_spanned(
            other,
            format!("`{key}` must name a concrete type"),
        )),
    }
}

fn annotated_type(item: &Item) -> syn::Result<(&Ident, &Generics)> {
    match item {
        Item::Struct(decl) => Ok((&decl.ident, &decl.generics)),
        Item::Enum(decl) => Ok((&decl.ident, &decl.generics)),
        Item::Union(decl) => Ok((&decl.ident, &decl.generics)),
        other => Err(syn::Error::new_spanned(
            other,
            "#[dataset] can only be applied to a struct, enum or union",
        )),
    }
}

pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args = parse_args(attr)?;
    let parsed: Item = syn::parse2(item)?;
    let (ident, generics) = annotated_type(&parsed)?;

    let DatasetArgs { entity, data_model } = &args;
    let contract = if generics.params.is_empty() {
        quote_spanned! {ident.span()=>
            const _: fn(#data_model) -> #entity = #ident::build;
        }
    } else {
        TokenStream::new()
    };
    Ok(quote! {
        #parsed
        #contract
    })
}
