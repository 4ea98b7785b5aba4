//! Text renderer — compact per-record summary lines for terminal use.

use crate::render::{declaration_kind_str, scope_path_str, FileReport, Renderer};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &FileReport) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", report.file));

        if report.records.is_empty() {
            out.push_str("  (no doc comments)\n");
        }

        for record in &report.records {
            match &record.target {
                Some(site) => {
                    out.push_str(&format!(
                        "  [depth {}] {} {} @ {}\n",
                        site.depth(),
                        declaration_kind_str(site.kind),
                        site.name.as_deref().unwrap_or("<anonymous>"),
                        site.offset,
                    ));
                    let path = scope_path_str(record);
                    if !path.is_empty() {
                        out.push_str(&format!("    in: {path}\n"));
                    }
                }
                None => {
                    out.push_str(&format!("  [orphan] @ {}\n", record.comment.start));
                }
            }
            for line in record.comment.text.lines() {
                out.push_str(&format!("    | {line}\n"));
            }
        }

        for diag in &report.diagnostics {
            out.push_str(&format!("  warning: {} @ {}\n", diag.message, diag.offset));
        }

        out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
