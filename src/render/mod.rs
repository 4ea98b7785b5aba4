//! Renderer module — trait-based format dispatch.
//!
//! Output is plumbing around the engine: renderers consume the finished
//! record sequence and never feed anything back into a scan.

pub mod json;
pub mod markdown;
pub mod text;

use crate::model::{AssociationRecord, DeclarationKind, Diagnostic, ScopeKind};
use anyhow::{anyhow, Result};

/// Scan output for one file, ready to render.
#[derive(Debug)]
pub struct FileReport {
    /// Display name of the source ("-" for stdin).
    pub file: String,
    pub records: Vec<AssociationRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Trait for rendering a FileReport into a specific output format.
pub trait Renderer {
    fn render(&self, report: &FileReport) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" => Ok(Box::new(text::TextRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, markdown, or json",
            format
        )),
    }
}

pub(crate) fn declaration_kind_str(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Class => "class",
        DeclarationKind::Function => "function",
        DeclarationKind::Method => "method",
        DeclarationKind::AnonymousFunction => "anonymous function",
    }
}

pub(crate) fn scope_kind_str(kind: ScopeKind) -> &'static str {
    match kind {
        ScopeKind::File => "file",
        ScopeKind::Class => "class",
        ScopeKind::Function => "function",
        ScopeKind::Method => "method",
        ScopeKind::AnonymousFunction => "anonymous function",
        ScopeKind::Block => "block",
    }
}

/// `file > Hello > constructor` breadcrumb for a scope path.
pub(crate) fn scope_path_str(record: &AssociationRecord) -> String {
    match &record.target {
        Some(site) => site
            .scope_path
            .iter()
            .map(|frame| match &frame.name {
                Some(name) => name.clone(),
                None => format!("({})", scope_kind_str(frame.kind)),
            })
            .collect::<Vec<_>>()
            .join(" > "),
        None => String::new(),
    }
}
