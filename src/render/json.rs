//! JSON renderer — structured output for tooling integration.
//!
//! Emits the record shape directly; the model is small enough that escaping
//! by hand beats pulling in a serialization stack.

use crate::model::AssociationRecord;
use crate::render::{declaration_kind_str, scope_kind_str, FileReport, Renderer};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &FileReport) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str(&format!("  \"file\": \"{}\",\n", json_escape(&report.file)));

        out.push_str("  \"records\": [\n");
        for (i, record) in report.records.iter().enumerate() {
            out.push_str(&render_record(record));
            if i + 1 < report.records.len() {
                out.push_str(",\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str("  ],\n");

        out.push_str("  \"diagnostics\": [\n");
        for (i, diag) in report.diagnostics.iter().enumerate() {
            out.push_str(&format!(
                "    {{ \"message\": \"{}\", \"offset\": {} }}",
                json_escape(&diag.message),
                diag.offset
            ));
            if i + 1 < report.diagnostics.len() {
                out.push_str(",\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str("  ]\n");
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn render_record(record: &AssociationRecord) -> String {
    let mut out = String::new();
    out.push_str("    {\n");
    out.push_str(&format!(
        "      \"commentText\": \"{}\",\n",
        json_escape(&record.comment.text)
    ));
    out.push_str(&format!(
        "      \"location\": {{ \"startOffset\": {}, \"endOffset\": {} }},\n",
        record.comment.start, record.comment.end
    ));

    match &record.target {
        Some(site) => {
            out.push_str("      \"target\": {\n");
            out.push_str(&format!(
                "        \"declarationKind\": \"{}\",\n",
                declaration_kind_str(site.kind)
            ));
            match &site.name {
                Some(name) => out.push_str(&format!(
                    "        \"name\": \"{}\",\n",
                    json_escape(name)
                )),
                None => out.push_str("        \"name\": null,\n"),
            }
            out.push_str(&format!("        \"offset\": {},\n", site.offset));
            out.push_str("        \"scopePath\": [");
            for (i, frame) in site.scope_path.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let name = match &frame.name {
                    Some(name) => format!("\"{}\"", json_escape(name)),
                    None => "null".to_string(),
                };
                out.push_str(&format!(
                    "{{ \"kind\": \"{}\", \"name\": {} }}",
                    scope_kind_str(frame.kind),
                    name
                ));
            }
            out.push_str("]\n");
            out.push_str("      }\n");
        }
        None => out.push_str("      \"target\": null\n"),
    }

    out.push_str("    }");
    out
}

fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
