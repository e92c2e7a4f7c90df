//! Compact rendering of declared types back to Rust source text.
//!
//! `quote` spaces every token apart (`Option < Vec < String > >`), which reads
//! poorly in generated code. The renderer below walks the common type shapes
//! and prints them the way `rustfmt` would. Anything else goes through `quote`
//! and has its whitespace tightened.

use quote::ToTokens;
use syn::{
    GenericArgument, Path, PathArguments, ReturnType, Type, TypeParamBound, punctuated::Punctuated,
};

/// Renders `ty` as compact Rust source.
#[must_use]
pub fn render(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => render_path(&type_path.path),
        Type::Reference(reference) => {
            let mut text = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                text.push_str(&lifetime.to_string());
                text.push(' ');
            }
            if reference.mutability.is_some() {
                text.push_str("mut ");
            }
            text.push_str(&render(&reference.elem));
            text
        }
        Type::Ptr(pointer) => {
            let qualifier = if pointer.mutability.is_some() { "mut" } else { "const" };
            format!("*{qualifier} {}", render(&pointer.elem))
        }
        Type::Tuple(tuple) => match tuple.elems.len() {
            0 => "()".to_owned(),
            1 => format!("({},)", join_types(&tuple.elems)),
            _ => format!("({})", join_types(&tuple.elems)),
        },
        Type::Array(array) => format!("[{}; {}]", render(&array.elem), tokens(&array.len)),
        Type::Slice(slice) => format!("[{}]", render(&slice.elem)),
        Type::Paren(paren) => format!("({})", render(&paren.elem)),
        Type::Group(group) => render(&group.elem),
        Type::Never(_) => "!".to_owned(),
        Type::Infer(_) => "_".to_owned(),
        Type::TraitObject(object) => format!("dyn {}", render_bounds(&object.bounds)),
        Type::ImplTrait(opaque) => format!("impl {}", render_bounds(&opaque.bounds)),
        Type::BareFn(function)
            if function.lifetimes.is_none()
                && function.unsafety.is_none()
                && function.abi.is_none()
                && function.variadic.is_none() =>
        {
            let inputs: Vec<String> = function
                .inputs
                .iter()
                .map(|input| match &input.name {
                    Some((name, _)) => format!("{name}: {}", render(&input.ty)),
                    None => render(&input.ty),
                })
                .collect();
            format!("fn({}){}", inputs.join(", "), render_return(&function.output))
        }
        other => tokens(other),
    }
}

fn render_path(path: &Path) -> String {
    let mut text = String::new();
    if path.leading_colon.is_some() {
        text.push_str("::");
    }
    for (position, segment) in path.segments.iter().enumerate() {
        if position > 0 {
            text.push_str("::");
        }
        text.push_str(&segment.ident.to_string());
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(angle) => {
                if angle.colon2_token.is_some() {
                    text.push_str("::");
                }
                let args: Vec<String> = angle.args.iter().map(render_argument).collect();
                text.push('<');
                text.push_str(&args.join(", "));
                text.push('>');
            }
            PathArguments::Parenthesized(parens) => {
                text.push('(');
                text.push_str(&join_types(&parens.inputs));
                text.push(')');
                text.push_str(&render_return(&parens.output));
            }
        }
    }
    text
}

fn render_return(output: &ReturnType) -> String {
    match output {
        ReturnType::Default => String::new(),
        ReturnType::Type(_, ty) => format!(" -> {}", render(ty)),
    }
}

fn render_argument(argument: &GenericArgument) -> String {
    match argument {
        GenericArgument::Lifetime(lifetime) => lifetime.to_string(),
        GenericArgument::Type(ty) => render(ty),
        GenericArgument::AssocType(assoc) => format!("{} = {}", assoc.ident, render(&assoc.ty)),
        other => tokens(other),
    }
}

fn render_bounds<P>(bounds: &Punctuated<TypeParamBound, P>) -> String {
    bounds
        .iter()
        .map(|bound| match bound {
            TypeParamBound::Trait(trait_bound) if trait_bound.lifetimes.is_none() => {
                let prefix = if matches!(trait_bound.modifier, syn::TraitBoundModifier::Maybe(_))
                {
                    "?"
                } else {
                    ""
                };
                format!("{prefix}{}", render_path(&trait_bound.path))
            }
            TypeParamBound::Lifetime(lifetime) => lifetime.to_string(),
            other => tokens(other),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

fn join_types<P>(types: &Punctuated<Type, P>) -> String {
    types.iter().map(render).collect::<Vec<_>>().join(", ")
}

fn tokens<T: ToTokens>(node: &T) -> String {
    tighten(&node.to_token_stream().to_string())
}

/// Removes the spaces `quote` places around delimiters and path separators.
fn tighten(raw: &str) -> String {
    const RULES: [(&str, &str); 11] = [
        (" :: ", "::"),
        (":: ", "::"),
        (" <", "<"),
        ("< ", "<"),
        (" >", ">"),
        (" ,", ","),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        (" ;", ";"),
    ];
    RULES
        .iter()
        .fold(raw.to_owned(), |text, (from, to)| text.replace(from, to))
}
