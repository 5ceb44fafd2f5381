use crate::inspector::model::{ApiKind, ApiRecord, ApiShape};
use crate::inspector::util::*;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use syn::spanned::Spanned;
use syn::{ImplItem, Item, ItemFn, ItemImpl};
use walkdir::WalkDir;

#[derive(Clone, Debug)]
pub struct InspectConfig {
    pub path: PathBuf,
    pub type_name: String,
    pub repo_id: String,
}

fn is_excluded(root: &Path, p: &Path) -> bool {
    let rel = p.strip_prefix(root).unwrap_or(p);
    rel.components().any(|c| c.as_os_str() == "target")
        || p.to_string_lossy().ends_with(".generated.rs")
}

/// Inspect a single source file, or every `.rs` file under a directory.
pub fn inspect_path(cfg: &InspectConfig) -> Result<ApiShape> {
    if !cfg.path.exists() {
        bail!("No such file or directory: {}", cfg.path.display());
    }
    let mut records = Vec::new();
    if cfg.path.is_file() {
        let content = fs::read_to_string(&cfg.path)
            .with_context(|| format!("Failed to read {}", cfg.path.display()))?;
        let rel = rel_path(&cfg.path, &cfg.path);
        records = inspect_source(&content, &rel, cfg)?;
    } else {
        let walker = WalkDir::new(&cfg.path).follow_links(true).sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let at = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    eprintln!("[inspector] Skipping {}: {}", at, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() || is_excluded(&cfg.path, path) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            match inspect_file(&cfg.path, path, cfg) {
                Ok(mut v) => records.append(&mut v),
                Err(e) => {
                    eprintln!("[inspector] Skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }
    Ok(ApiShape {
        type_name: cfg.type_name.clone(),
        records,
    })
}

fn inspect_file(root: &Path, file: &Path, cfg: &InspectConfig) -> Result<Vec<ApiRecord>> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    inspect_source(&content, &rel_path(root, file), cfg)
}

struct Collector<'a> {
    cfg: &'a InspectConfig,
    rel_path: &'a str,
    records: Vec<ApiRecord>,
}

impl Collector<'_> {
    fn push(
        &mut self,
        kind: ApiKind,
        symbol: String,
        signature: String,
        doc_comment: String,
        lines: (usize, usize),
    ) {
        self.records.push(ApiRecord {
            id: sha256_id(&self.cfg.repo_id, self.rel_path, &symbol),
            kind,
            type_name: self.cfg.type_name.clone(),
            symbol,
            signature,
            doc_comment,
            sugar_for: Vec::new(),
            path: self.rel_path.to_string(),
            start_line: lines.0,
            end_line: lines.1,
        });
    }
}

fn is_free_operator(f: &ItemFn, type_name: &str) -> bool {
    is_public(&f.vis)
        && f.sig.inputs.len() == 2
        && typed_inputs(&f.sig).count() == 2
        && typed_inputs(&f.sig).all(|ty| names_type(ty, type_name, false))
        && returns_type(&f.sig.output, type_name, false)
}

/// Free function an operator impl forwards to, if its body is only that call.
fn operator_forward(
    im: &ItemImpl,
    free_ops: &HashSet<String>,
) -> Option<(String, Option<String>)> {
    let trait_name = impl_trait_name(im)?;
    let method = binary_op_method(&trait_name)?;
    let target = im
        .items
        .iter()
        .find_map(|it| match it {
            ImplItem::Fn(f) if f.sig.ident == method => Some(f),
            _ => None,
        })
        .and_then(forwarded_call)
        .filter(|t| free_ops.contains(t));
    Some((trait_name, target))
}

/// Operator traits whose every impl on `ty` forwards to a free operator,
/// paired with that operator, in file order.
fn sugar_traits(
    parsed: &syn::File,
    ty: &str,
    free_ops: &HashSet<String>,
) -> Vec<(String, String)> {
    let impls: Vec<(String, Option<String>)> = parsed
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(im) if impl_targets(im, ty) => operator_forward(im, free_ops),
            _ => None,
        })
        .collect();

    let mut sugar: Vec<(String, String)> = Vec::new();
    for (trait_name, target) in &impls {
        let Some(target) = target else {
            continue;
        };
        if sugar.iter().any(|(name, _)| name == trait_name) {
            continue;
        }
        let all_forward = impls
            .iter()
            .filter(|(name, _)| name == trait_name)
            .all(|(_, t)| t.is_some());
        if all_forward {
            sugar.push((trait_name.clone(), target.clone()));
        }
    }
    sugar
}

/// Classify the public API of `cfg.type_name` declared in one source file.
pub fn inspect_source(
    content: &str,
    rel_path: &str,
    cfg: &InspectConfig,
) -> Result<Vec<ApiRecord>> {
    let parsed: syn::File =
        syn::parse_file(content).with_context(|| format!("Failed to parse {}", rel_path))?;
    let ty = cfg.type_name.as_str();

    let free_ops: HashSet<String> = parsed
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Fn(f) if is_free_operator(f, ty) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect();

    let mut out = Collector {
        cfg,
        rel_path,
        records: Vec::new(),
    };
    let sugar = sugar_traits(&parsed, ty, &free_ops);
    let mut seen_traits: HashSet<String> = HashSet::new();

    for item in parsed.items.iter() {
        match item {
            Item::Struct(s) if s.ident == ty && is_public(&s.vis) => {
                if derives_default(&s.attrs) {
                    out.push(
                        ApiKind::Constructor,
                        format!("{}::default", ty),
                        format!("fn default () -> {}", ty),
                        String::new(),
                        span_lines(s.span()),
                    );
                }
            }
            Item::Impl(im) if impl_targets(im, ty) => match impl_trait_name(im) {
                None if im.trait_.is_none() => inspect_inherent(im, &mut out),
                None => {}
                Some(trait_name) if trait_name == "Default" => {
                    if seen_traits.insert(trait_name) {
                        out.push(
                            ApiKind::Constructor,
                            format!("{}::default", ty),
                            format_impl_signature(im),
                            merge_doc_comments(&im.attrs),
                            span_lines(im.span()),
                        );
                    }
                }
                Some(trait_name) => {
                    let Some(method) = binary_op_method(&trait_name) else {
                        continue;
                    };
                    if sugar.iter().any(|(name, _)| *name == trait_name) {
                        continue;
                    }
                    if seen_traits.insert(trait_name) {
                        out.push(
                            ApiKind::MemberOperator,
                            format!("{}::{}", ty, method),
                            format_impl_signature(im),
                            merge_doc_comments(&im.attrs),
                            span_lines(im.span()),
                        );
                    }
                }
            },
            Item::Fn(f) if free_ops.contains(&f.sig.ident.to_string()) => {
                out.push(
                    ApiKind::FreeOperator,
                    f.sig.ident.to_string(),
                    format_signature(&f.sig),
                    merge_doc_comments(&f.attrs),
                    span_lines(f.span()),
                );
            }
            _ => {}
        }
    }

    let mut records = out.records;
    for rec in records.iter_mut().filter(|r| r.kind == ApiKind::FreeOperator) {
        rec.sugar_for = sugar
            .iter()
            .filter(|(_, target)| *target == rec.symbol)
            .map(|(name, _)| name.clone())
            .collect();
    }
    Ok(records)
}

fn inspect_inherent(im: &ItemImpl, out: &mut Collector<'_>) {
    let ty = out.cfg.type_name.clone();
    for it in im.items.iter() {
        let ImplItem::Fn(m) = it else {
            continue;
        };
        if !is_public(&m.vis) {
            continue;
        }
        let sig = &m.sig;
        let arity = typed_inputs(sig).count();
        let kind = match (sig.receiver().is_some(), borrowed_receiver(sig)) {
            (false, _) if returns_type(&sig.output, &ty, true) => ApiKind::Constructor,
            (true, Some(false)) if arity == 0 && !is_unit_return(&sig.output) => {
                ApiKind::Accessor
            }
            (true, Some(true)) if arity == 1 && is_unit_return(&sig.output) => ApiKind::Mutator,
            _ => continue,
        };
        out.push(
            kind,
            format!("{}::{}", ty, sig.ident),
            format_signature(sig),
            merge_doc_comments(&m.attrs),
            span_lines(m.span()),
        );
    }
}

pub fn write_json(shape: &ApiShape, out: &mut dyn Write) -> Result<()> {
    let mut buf = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut buf, shape)?;
    buf.write_all(b"\n")?;
    buf.flush()?;
    Ok(())
}
