//! Lexical tokenizer — splits source text into classified spans.
//!
//! One pass over the bytes, producing an ordered, gap-free sequence of
//! [`SourceSpan`]. Comment markers inside string and char literals are
//! skipped, including escaped quote characters. Line and block comments are
//! recognized simultaneously; which quote syntax applies comes from the
//! dialect rule table.
//!
//! Fail-soft: an unterminated block comment or literal turns the remainder of
//! the file into a single span of that kind plus a diagnostic. Scanning never
//! fails outright.

use crate::dialect::{DialectRules, QuoteStyle};
use crate::model::{Diagnostic, SourceSpan, SpanKind};

/// Tokenize `source` under the given dialect rules.
///
/// The returned spans cover every byte of the input exactly once, in order.
pub fn tokenize(source: &str, rules: &DialectRules) -> (Vec<SourceSpan>, Vec<Diagnostic>) {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut spans: Vec<SourceSpan> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut code_start = 0;
    let mut i = 0;

    // Close out the pending Code span, if non-empty.
    let flush_code = |spans: &mut Vec<SourceSpan>, code_start: usize, at: usize| {
        if at > code_start {
            spans.push(SourceSpan {
                kind: SpanKind::Code,
                start: code_start,
                end: at,
            });
        }
    };

    while i < len {
        let rest = &source[i..];

        if rest.starts_with(rules.block_open) {
            flush_code(&mut spans, code_start, i);
            let body_from = i + rules.block_open.len();
            let end = match source[body_from..].find(rules.block_close) {
                Some(pos) => body_from + pos + rules.block_close.len(),
                None => {
                    diagnostics.push(Diagnostic::unterminated("block comment", i));
                    len
                }
            };
            spans.push(SourceSpan {
                kind: SpanKind::BlockComment,
                start: i,
                end,
            });
            i = end;
            code_start = i;
        } else if rest.starts_with(rules.line_marker) {
            flush_code(&mut spans, code_start, i);
            // The newline stays outside the comment, in the next Code span.
            let end = match rest.find('\n') {
                Some(pos) => i + pos,
                None => len,
            };
            spans.push(SourceSpan {
                kind: SpanKind::LineComment,
                start: i,
                end,
            });
            i = end;
            code_start = i;
        } else if bytes[i] == b'"' {
            flush_code(&mut spans, code_start, i);
            i = scan_quoted(source, i, b'"', SpanKind::StringLiteral, &mut spans, &mut diagnostics);
            code_start = i;
        } else if bytes[i] == b'\'' {
            let kind = match rules.single_quote {
                QuoteStyle::CharLiteral => SpanKind::CharLiteral,
                QuoteStyle::StringLiteral => SpanKind::StringLiteral,
            };
            flush_code(&mut spans, code_start, i);
            i = scan_quoted(source, i, b'\'', kind, &mut spans, &mut diagnostics);
            code_start = i;
        } else if bytes[i] == b'`' && rules.template_literals {
            flush_code(&mut spans, code_start, i);
            i = scan_quoted(source, i, b'`', SpanKind::StringLiteral, &mut spans, &mut diagnostics);
            code_start = i;
        } else {
            // Non-ASCII bytes never match a delimiter, so bytewise advance is
            // safe; spans only ever split at ASCII positions.
            i += 1;
        }
    }

    flush_code(&mut spans, code_start, len);
    (spans, diagnostics)
}

/// Scan a quoted literal starting at the opening quote. Returns the offset
/// past the closing quote, honoring backslash escapes. Unterminated literals
/// run to end of file with a diagnostic.
fn scan_quoted(
    source: &str,
    start: usize,
    quote: u8,
    kind: SpanKind,
    spans: &mut Vec<SourceSpan>,
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut i = start + 1;
    let mut end = None;

    while i < len {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                end = Some(i + 1);
                break;
            }
            _ => i += 1,
        }
    }

    let end = match end {
        Some(end) => end,
        None => {
            let what = match kind {
                SpanKind::CharLiteral => "char literal",
                _ => "string literal",
            };
            diagnostics.push(Diagnostic::unterminated(what, start));
            len
        }
    };

    spans.push(SourceSpan { kind, start, end });
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn kinds(source: &str, dialect: Dialect) -> Vec<(SpanKind, usize, usize)> {
        let (spans, _) = tokenize(source, &dialect.rules());
        spans.iter().map(|s| (s.kind, s.start, s.end)).collect()
    }

    fn assert_gap_free(source: &str, dialect: Dialect) {
        let (spans, _) = tokenize(source, &dialect.rules());
        let mut at = 0;
        for span in &spans {
            assert_eq!(span.start, at, "gap before span at {}", span.start);
            assert!(span.end > span.start, "empty span at {}", span.start);
            at = span.end;
        }
        assert_eq!(at, source.len(), "spans do not cover the input");
    }

    #[test]
    fn plain_code_is_one_span() {
        let spans = kinds("let x = 1;\n", Dialect::JavaScript);
        assert_eq!(spans, vec![(SpanKind::Code, 0, 11)]);
    }

    #[test]
    fn line_comment_excludes_newline() {
        let spans = kinds("x // hi\ny", Dialect::JavaScript);
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, 0, 2),
                (SpanKind::LineComment, 2, 7),
                (SpanKind::Code, 7, 9),
            ]
        );
    }

    #[test]
    fn block_comment_includes_markers() {
        let spans = kinds("a/* b */c", Dialect::C);
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, 0, 1),
                (SpanKind::BlockComment, 1, 8),
                (SpanKind::Code, 8, 9),
            ]
        );
    }

    #[test]
    fn comment_markers_inside_string_are_ignored() {
        let spans = kinds(r#"x = "// not a comment /* either";"#, Dialect::JavaScript);
        assert_eq!(spans[1].0, SpanKind::StringLiteral);
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let src = r#""a\"b // c""#;
        let spans = kinds(src, Dialect::JavaScript);
        assert_eq!(spans, vec![(SpanKind::StringLiteral, 0, src.len())]);
    }

    #[test]
    fn single_quote_is_char_in_c_string_in_js() {
        let spans = kinds("'x'", Dialect::C);
        assert_eq!(spans[0].0, SpanKind::CharLiteral);
        let spans = kinds("'x'", Dialect::TypeScript);
        assert_eq!(spans[0].0, SpanKind::StringLiteral);
    }

    #[test]
    fn template_literal_swallows_comment_markers() {
        let spans = kinds("`a ${x} // b`", Dialect::TypeScript);
        assert_eq!(spans, vec![(SpanKind::StringLiteral, 0, 13)]);
        // Backticks mean nothing to Java.
        let spans = kinds("`a`", Dialect::Java);
        assert_eq!(spans, vec![(SpanKind::Code, 0, 3)]);
    }

    #[test]
    fn unterminated_block_comment_runs_to_eof() {
        let (spans, diags) = tokenize("x /* open", &Dialect::C.rules());
        assert_eq!(spans[1].kind, SpanKind::BlockComment);
        assert_eq!(spans[1].end, 9);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].offset, 2);
    }

    #[test]
    fn unterminated_string_runs_to_eof() {
        let (spans, diags) = tokenize("x = \"open", &Dialect::Java.rules());
        assert_eq!(spans.last().unwrap().kind, SpanKind::StringLiteral);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn gap_free_on_mixed_input() {
        let src = "/** doc */ class A { // c\n  m() { s = \"/*\"; }\n}\n";
        assert_gap_free(src, Dialect::TypeScript);
        assert_gap_free("", Dialect::TypeScript);
        assert_gap_free("unterminated: \"...", Dialect::TypeScript);
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let src = "s = \"héllo\"; // ü\n";
        assert_gap_free(src, Dialect::JavaScript);
        let (spans, _) = tokenize(src, &Dialect::JavaScript.rules());
        assert_eq!(spans[1].kind, SpanKind::StringLiteral);
    }
}
