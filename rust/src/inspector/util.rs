use proc_macro2::Span;
use quote::ToTokens;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use syn::{
    Attribute, Expr, ExprLit, FnArg, ImplItemFn, ItemImpl, Lit, Meta, ReturnType, Signature, Stmt,
    Type, Visibility,
};

pub fn sha256_id(repo_id: &str, rel_path: &str, symbol: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(repo_id.as_bytes());
    hasher.update([0x1f_u8]);
    hasher.update(rel_path.as_bytes());
    hasher.update([0x1f_u8]);
    hasher.update(symbol.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn merge_doc_comments(attrs: &[Attribute]) -> String {
    let mut out = String::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) = &nv.value
            {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(s.value().trim());
            }
        }
    }
    out
}

/// True when `#[derive(...)]` on the item lists `Default`.
pub fn derives_default(attrs: &[Attribute]) -> bool {
    let mut found = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        // A malformed derive list counts only the paths parsed before the error.
        let _ = attr.parse_nested_meta(|meta| {
            if meta
                .path
                .segments
                .last()
                .map(|s| s.ident == "Default")
                .unwrap_or(false)
            {
                found = true;
            }
            Ok(())
        });
    }
    found
}

pub fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

fn strip_ref(ty: &Type) -> &Type {
    match ty {
        Type::Reference(r) => strip_ref(&r.elem),
        Type::Paren(p) => strip_ref(&p.elem),
        other => other,
    }
}

/// Whether `ty` (optionally behind references) names `type_name`.
/// `Self` counts only when `allow_self` is set.
pub fn names_type(ty: &Type, type_name: &str, allow_self: bool) -> bool {
    match strip_ref(ty) {
        Type::Path(p) if p.qself.is_none() => p
            .path
            .segments
            .last()
            .map(|s| s.ident == type_name || (allow_self && s.ident == "Self"))
            .unwrap_or(false),
        _ => false,
    }
}

pub fn is_unit_return(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(t) if t.elems.is_empty()),
    }
}

pub fn returns_type(output: &ReturnType, type_name: &str, allow_self: bool) -> bool {
    match output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => {
            !matches!(&**ty, Type::Reference(_)) && names_type(ty, type_name, allow_self)
        }
    }
}

/// `&self` -> Some(false), `&mut self` -> Some(true), anything else -> None.
pub fn borrowed_receiver(sig: &Signature) -> Option<bool> {
    let recv = sig.receiver()?;
    if recv.reference.is_some() {
        Some(recv.mutability.is_some())
    } else {
        None
    }
}

pub fn impl_targets(item: &ItemImpl, type_name: &str) -> bool {
    names_type(&item.self_ty, type_name, false)
}

pub fn impl_trait_name(item: &ItemImpl) -> Option<String> {
    match &item.trait_ {
        Some((None, path, _)) => path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Method name of a binary `std::ops` trait.
pub fn binary_op_method(trait_name: &str) -> Option<&'static str> {
    let method = match trait_name {
        "Add" => "add",
        "Sub" => "sub",
        "Mul" => "mul",
        "Div" => "div",
        "Rem" => "rem",
        "BitAnd" => "bitand",
        "BitOr" => "bitor",
        "BitXor" => "bitxor",
        "Shl" => "shl",
        "Shr" => "shr",
        _ => return None,
    };
    Some(method)
}

/// Name of the function called when the body is nothing but `f(...)`.
pub fn forwarded_call(item: &ImplItemFn) -> Option<String> {
    if item.block.stmts.len() != 1 {
        return None;
    }
    let expr = match &item.block.stmts[0] {
        Stmt::Expr(e, None) => e,
        _ => return None,
    };
    match expr {
        Expr::Call(call) => match &*call.func {
            Expr::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
            _ => None,
        },
        _ => None,
    }
}

pub fn typed_inputs<'a>(sig: &'a Signature) -> impl Iterator<Item = &'a Type> {
    sig.inputs.iter().filter_map(|arg| match arg {
        FnArg::Typed(pt) => Some(&*pt.ty),
        FnArg::Receiver(_) => None,
    })
}

pub fn format_signature(sig: &Signature) -> String {
    sig.to_token_stream().to_string()
}

pub fn format_impl_signature(item: &ItemImpl) -> String {
    // Only the "impl ... for ..." header
    let mut tokens = String::from("impl ");
    if let Some((bang, path, _for_token)) = &item.trait_ {
        if bang.is_some() {
            tokens.push('!');
        }
        tokens.push_str(&path.to_token_stream().to_string());
        tokens.push_str(" for ");
    }
    tokens.push_str(&item.self_ty.to_token_stream().to_string());
    tokens
}

pub fn span_lines(span: Span) -> (usize, usize) {
    (span.start().line, span.end().line)
}

pub fn rel_path(root: &Path, file: &Path) -> String {
    pathdiff::diff_paths(file, root)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| file.file_name().map(PathBuf::from))
        .unwrap_or_else(|| file.to_path_buf())
        .to_string_lossy()
        .to_string()
}
