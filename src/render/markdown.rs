//! Markdown renderer — one section per documented declaration.

use crate::render::{declaration_kind_str, scope_path_str, FileReport, Renderer};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, report: &FileReport) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", report.file));

        for record in &report.records {
            out.push('\n');
            match &record.target {
                Some(site) => {
                    out.push_str(&format!(
                        "## {} `{}`\n\n",
                        declaration_kind_str(site.kind),
                        site.name.as_deref().unwrap_or("<anonymous>"),
                    ));
                    out.push_str(&format!("*{}*\n\n", scope_path_str(record)));
                }
                None => {
                    out.push_str("## (unattached)\n\n");
                }
            }
            out.push_str(record.comment.text.trim());
            out.push('\n');
        }

        if !report.diagnostics.is_empty() {
            out.push_str("\n## Warnings\n\n");
            for diag in &report.diagnostics {
                out.push_str(&format!("- {} (offset {})\n", diag.message, diag.offset));
            }
        }

        out
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}
