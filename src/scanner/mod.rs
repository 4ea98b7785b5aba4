//! Scan pipeline — tokenize, classify, track scope, bind declarations.
//!
//! [`Scan`] is a one-shot forward iterator: records come out lazily in source
//! order, the scope stack advances as the iterator does, and nothing is
//! cached across calls to [`scan`]. Restarting means scanning again.

pub mod classify;
pub mod matcher;
pub mod scope;
pub mod tokenize;

use crate::dialect::Dialect;
use crate::model::{
    AssociationRecord, CommentRecord, CommentStyle, DeclarationSite, Diagnostic, SourceSpan,
    SpanKind,
};
use matcher::ForwardMatch;
use scope::ScopeTracker;

/// Forward-scan ceiling: a doc comment never binds to anything farther than
/// this many bytes past its end. Guards against pathological input.
const WINDOW_BYTES: usize = 4096;

/// Scan `source` and get the lazy association record sequence.
///
/// Diagnostics accumulate on the returned value and are complete once the
/// iterator is exhausted.
pub fn scan(source: &str, dialect: Dialect) -> Scan<'_> {
    Scan::new(source, dialect)
}

/// Eager convenience: run the scan to completion.
pub fn scan_all(source: &str, dialect: Dialect) -> (Vec<AssociationRecord>, Vec<Diagnostic>) {
    let mut scan = Scan::new(source, dialect);
    let records: Vec<AssociationRecord> = scan.by_ref().collect();
    (records, scan.into_diagnostics())
}

/// One in-progress scan over a single file's text.
pub struct Scan<'a> {
    source: &'a str,
    spans: Vec<SourceSpan>,
    comments: Vec<CommentRecord>,
    tracker: ScopeTracker,
    diagnostics: Vec<Diagnostic>,
    /// Next span not yet fed to the scope tracker.
    feed_idx: usize,
    /// Next comment to consider.
    comment_idx: usize,
    finished: bool,
}

impl<'a> Scan<'a> {
    fn new(source: &'a str, dialect: Dialect) -> Self {
        let rules = dialect.rules();
        let (spans, diagnostics) = tokenize::tokenize(source, &rules);
        let comments = classify::classify(source, &spans, dialect);
        Scan {
            source,
            spans,
            comments,
            tracker: ScopeTracker::new(),
            diagnostics,
            feed_idx: 0,
            comment_idx: 0,
            finished: false,
        }
    }

    /// Diagnostics gathered so far (all of them once iteration has ended).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Advance the scope tracker over every Code span that ends at or before
    /// `pos`.
    fn feed_code_until(&mut self, pos: usize) {
        while self.feed_idx < self.spans.len() && self.spans[self.feed_idx].end <= pos {
            let span = self.spans[self.feed_idx];
            if span.kind == SpanKind::Code {
                self.tracker
                    .feed(&self.source[span.start..span.end], span.start);
            }
            self.feed_idx += 1;
        }
        self.diagnostics.extend(self.tracker.take_diagnostics());
    }

    /// Style of the classified comment whose span starts at `start`.
    fn comment_style_at(&self, start: usize) -> Option<CommentStyle> {
        // Merged runs cover multiple spans, so look for containment.
        self.comments
            .iter()
            .find(|c| c.start <= start && start < c.end)
            .map(|c| c.style)
    }

    /// Scan forward from a doc comment and bind it, or orphan it.
    ///
    /// The window ends at the first blank line (a whitespace run with two or
    /// more newlines), at a non-skippable token, at the next doc comment
    /// (back-to-back doc comments: only the last one binds), or after
    /// [`WINDOW_BYTES`].
    fn bind(&self, comment: &CommentRecord) -> Option<DeclarationSite> {
        let limit = (comment.end + WINDOW_BYTES).min(self.source.len());

        // First span starting at or after the comment's end.
        let mut idx = self.spans.partition_point(|s| s.start < comment.end);

        // Walk to the first real token, skipping whitespace and plain
        // comments. A literal before any code means a data context, not a
        // declaration.
        let mut at_base = None;
        while idx < self.spans.len() {
            let span = self.spans[idx];
            if span.start >= limit {
                return None;
            }
            match span.kind {
                SpanKind::LineComment | SpanKind::BlockComment => {
                    if self.comment_style_at(span.start) == Some(CommentStyle::Doc) {
                        return None;
                    }
                    idx += 1;
                }
                SpanKind::StringLiteral | SpanKind::CharLiteral => return None,
                SpanKind::Code => {
                    let text = &self.source[span.start..span.end.min(limit)];
                    let trimmed = text.trim_start();
                    let skipped = &text[..text.len() - trimmed.len()];
                    if skipped.bytes().filter(|&b| b == b'\n').count() >= 2 {
                        // Blank line: the comment's block ended without a
                        // declaration.
                        return None;
                    }
                    if trimmed.is_empty() {
                        idx += 1;
                        continue;
                    }
                    at_base = Some(span.start + skipped.len());
                    break;
                }
            }
        }
        let at_base = at_base?;

        // The tokenizer splits code at every literal, so a single span can
        // stop mid-parameter-list. Assemble the window across spans, masking
        // literal and comment bodies with spaces to keep byte offsets intact.
        let mut window = String::new();
        while idx < self.spans.len() {
            let span = self.spans[idx];
            let start = span.start.max(at_base);
            let end = span.end.min(limit);
            if start >= end {
                break;
            }
            match span.kind {
                SpanKind::Code => window.push_str(&self.source[start..end]),
                _ => window.extend(std::iter::repeat(' ').take(end - start)),
            }
            idx += 1;
        }

        match matcher::match_forward(&window, self.tracker.enclosing()) {
            ForwardMatch::Declaration { kind, name, at } => Some(DeclarationSite {
                kind,
                name,
                offset: at_base + at,
                scope_path: self.tracker.path().to_vec(),
            }),
            ForwardMatch::Other => None,
        }
    }

    /// Drain the rest of the input into the scope tracker so end-of-file
    /// balance diagnostics surface even when no comments remain.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.feed_code_until(self.source.len());
        self.tracker.finish(self.source.len());
        self.diagnostics.extend(self.tracker.take_diagnostics());
        self.finished = true;
    }
}

impl Iterator for Scan<'_> {
    type Item = AssociationRecord;

    fn next(&mut self) -> Option<AssociationRecord> {
        while self.comment_idx < self.comments.len() {
            let comment = self.comments[self.comment_idx].clone();
            self.comment_idx += 1;
            self.feed_code_until(comment.start);
            if comment.style != CommentStyle::Doc {
                continue;
            }
            let target = self.bind(&comment);
            return Some(AssociationRecord { comment, target });
        }
        self.finish();
        None
    }
}
