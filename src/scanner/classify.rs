//! Comment classifier — doc vs. plain vs. ignored.
//!
//! Dialect rules are data (marker char + counts), not branching objects:
//! a block comment opened with exactly `/**` is a doc comment, one or three+
//! asterisks make it plain; a line comment with exactly three markers (`///`)
//! is doc, two or four+ are plain. A comment sharing its line with preceding
//! code ("trailing") is ignored regardless of marker.
//!
//! Adjacent doc line comments with no blank line and no code between them
//! merge into one logical record. Marker sequences inside an already isolated
//! comment body are prose and are never re-tokenized.

use crate::dialect::{Dialect, DialectRules};
use crate::model::{CommentRecord, CommentStyle, SourceSpan, SpanKind};

/// Classify every comment span into a [`CommentRecord`], merging adjacent doc
/// line comments. Records come out in source order.
pub fn classify(source: &str, spans: &[SourceSpan], dialect: Dialect) -> Vec<CommentRecord> {
    let rules = dialect.rules();
    let mut records: Vec<CommentRecord> = Vec::new();

    for span in spans {
        let style = match span.kind {
            SpanKind::LineComment => line_style(source, span, &rules),
            SpanKind::BlockComment => block_style(source, span, &rules),
            _ => continue,
        };

        if rules.merge_doc_lines
            && style == CommentStyle::Doc
            && span.kind == SpanKind::LineComment
        {
            if let Some(prev) = records.last_mut() {
                let prev_is_line = !source[prev.start..prev.end].starts_with(rules.block_open);
                if prev.style == CommentStyle::Doc
                    && prev_is_line
                    && mergeable(source, prev.end, span.start)
                {
                    prev.text.push('\n');
                    prev.text.push_str(&line_text(source, span, &rules));
                    prev.end = span.end;
                    continue;
                }
            }
        }

        let text = match span.kind {
            SpanKind::LineComment => line_text(source, span, &rules),
            _ => block_text(source, span, &rules),
        };
        records.push(CommentRecord {
            text,
            style,
            start: span.start,
            end: span.end,
            dialect,
        });
    }

    records
}

/// A trailing comment shares its line with earlier non-whitespace input.
fn is_trailing(source: &str, start: usize) -> bool {
    source[..start]
        .bytes()
        .rev()
        .take_while(|&b| b != b'\n')
        .any(|b| b != b' ' && b != b'\t' && b != b'\r')
}

fn line_style(source: &str, span: &SourceSpan, rules: &DialectRules) -> CommentStyle {
    if is_trailing(source, span.start) {
        return CommentStyle::Ignored;
    }
    let text = &source[span.start..span.end];
    let markers = text.chars().take_while(|&c| c == '/').count();
    if markers == rules.line_marker.len() + 1 {
        CommentStyle::Doc
    } else {
        CommentStyle::Plain
    }
}

fn block_style(source: &str, span: &SourceSpan, rules: &DialectRules) -> CommentStyle {
    if is_trailing(source, span.start) {
        return CommentStyle::Ignored;
    }
    let inner = block_inner(source, span, rules);
    // Exactly one extra marker char after the opener; `/**/` has none and
    // `/***` has two, both plain. The lone-star `/***/` reads as a `/***`
    // opener, not an empty doc comment.
    let extra = inner.chars().take_while(|&c| c == rules.doc_char).count();
    if extra == 1 && inner.len() > 1 {
        CommentStyle::Doc
    } else {
        CommentStyle::Plain
    }
}

/// Comment body between `/*` and `*/` (closer absent on unterminated input).
fn block_inner<'a>(source: &'a str, span: &SourceSpan, rules: &DialectRules) -> &'a str {
    let text = &source[span.start..span.end];
    let text = text.strip_prefix(rules.block_open).unwrap_or(text);
    text.strip_suffix(rules.block_close).unwrap_or(text)
}

/// Line comment body with markers and one leading space stripped.
fn line_text(source: &str, span: &SourceSpan, rules: &DialectRules) -> String {
    let text = &source[span.start..span.end];
    let marker = rules.line_marker.chars().next().unwrap_or('/');
    let stripped = text.trim_start_matches(marker);
    stripped.strip_prefix(' ').unwrap_or(stripped).to_string()
}

/// Block comment body: doc marker, per-line `*` decoration, and surrounding
/// whitespace stripped.
fn block_text(source: &str, span: &SourceSpan, rules: &DialectRules) -> String {
    let inner = block_inner(source, span, rules);
    let inner = inner.strip_prefix(rules.doc_char).unwrap_or(inner);
    let mut lines: Vec<&str> = Vec::new();
    for line in inner.lines() {
        let line = line.trim_start();
        let line = line.strip_prefix('*').unwrap_or(line);
        lines.push(line.strip_prefix(' ').unwrap_or(line).trim_end());
    }
    // Drop blank edges left behind by the marker lines.
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Two doc line comments merge when only one newline (plus indentation)
/// separates them: a blank line or any code in between breaks the run.
fn mergeable(source: &str, prev_end: usize, next_start: usize) -> bool {
    let between = &source[prev_end..next_start];
    between.chars().filter(|&c| c == '\n').count() == 1
        && between.chars().all(|c| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::tokenize::tokenize;

    fn classify_src(source: &str) -> Vec<CommentRecord> {
        let dialect = Dialect::TypeScript;
        let (spans, _) = tokenize(source, &dialect.rules());
        classify(source, &spans, dialect)
    }

    #[test]
    fn two_asterisks_is_doc() {
        let records = classify_src("/** hi */");
        assert_eq!(records[0].style, CommentStyle::Doc);
        assert_eq!(records[0].text, "hi");
    }

    #[test]
    fn one_or_three_asterisks_is_plain() {
        assert_eq!(classify_src("/* hi */")[0].style, CommentStyle::Plain);
        assert_eq!(classify_src("/*** hi */")[0].style, CommentStyle::Plain);
    }

    #[test]
    fn empty_block_is_plain() {
        assert_eq!(classify_src("/**/")[0].style, CommentStyle::Plain);
        assert_eq!(classify_src("/***/")[0].style, CommentStyle::Plain);
    }

    #[test]
    fn triple_slash_is_doc_double_and_quadruple_are_plain() {
        assert_eq!(classify_src("/// hi\n")[0].style, CommentStyle::Doc);
        assert_eq!(classify_src("// hi\n")[0].style, CommentStyle::Plain);
        assert_eq!(classify_src("//// hi\n")[0].style, CommentStyle::Plain);
    }

    #[test]
    fn trailing_comment_is_ignored() {
        let records = classify_src("call(); /** not docs */\n");
        assert_eq!(records[0].style, CommentStyle::Ignored);
        let records = classify_src("call(); /// nor this\n");
        assert_eq!(records[0].style, CommentStyle::Ignored);
    }

    #[test]
    fn indentation_is_not_trailing() {
        let records = classify_src("    /// docs\n");
        assert_eq!(records[0].style, CommentStyle::Doc);
    }

    #[test]
    fn three_doc_lines_merge_into_one_record() {
        let src = "/// a\n/// b\n/// c\nfn();\n";
        let records = classify_src(src);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].style, CommentStyle::Doc);
        assert_eq!(records[0].text, "a\nb\nc");
        assert_eq!(records[0].start, 0);
        assert_eq!(records[0].end, src.find("\nfn").unwrap());
    }

    #[test]
    fn blank_line_breaks_a_doc_run() {
        let records = classify_src("/// a\n\n/// b\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn code_between_breaks_a_doc_run() {
        let records = classify_src("/// a\nx();\n/// b\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn plain_lines_do_not_merge() {
        let records = classify_src("// a\n// b\n");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.style == CommentStyle::Plain));
    }

    #[test]
    fn markers_in_prose_are_not_retokenized() {
        let records = classify_src("/** mentions /* and // and /// in prose */");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].style, CommentStyle::Doc);
        assert!(records[0].text.contains("// and ///"));
    }

    #[test]
    fn block_text_strips_star_decoration() {
        let records = classify_src("/**\n * ES6 class\n */");
        assert_eq!(records[0].text, "ES6 class");
    }

    #[test]
    fn multiline_block_text_keeps_inner_lines() {
        let records = classify_src("/**\n * Main method\n * @param args Command line arguments\n */");
        assert_eq!(records[0].text, "Main method\n@param args Command line arguments");
    }
}
