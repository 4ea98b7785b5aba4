//! Scope tracker — brace-balance stack over Code spans.
//!
//! Walks code text character by character (string and comment content never
//! reaches it), keeping an explicit growable stack of frames. Depth is
//! unbounded and handled iteratively; pathological nesting grows the vector,
//! not the call stack. A synthetic File frame sits at the base and is never
//! popped: an extra `}` or an unclosed `{` degrades to a diagnostic instead
//! of corrupting the stack.

use crate::model::{DeclarationKind, Diagnostic, ScopeFrame, ScopeKind};
use crate::scanner::matcher;

/// Statement text retained for frame classification. Longer statements keep
/// their tail, which is where the signature pattern sits.
const STATEMENT_KEEP: usize = 512;

#[derive(Debug)]
pub struct ScopeTracker {
    stack: Vec<ScopeFrame>,
    /// Code accumulated since the last `{`, `}`, or `;`.
    statement: String,
    diagnostics: Vec<Diagnostic>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        ScopeTracker {
            stack: vec![ScopeFrame::file()],
            statement: String::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Current frame path, File base first.
    pub fn path(&self) -> &[ScopeFrame] {
        &self.stack
    }

    /// Innermost scope kind.
    pub fn enclosing(&self) -> ScopeKind {
        self.stack.last().map(|f| f.kind).unwrap_or(ScopeKind::File)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Feed one Code span's text. `offset` is the span's byte offset in the
    /// source, used for frame start positions and diagnostics.
    pub fn feed(&mut self, text: &str, offset: usize) {
        for (i, c) in text.char_indices() {
            match c {
                '{' => {
                    let frame = self.open_frame(offset + i);
                    self.stack.push(frame);
                    self.statement.clear();
                }
                '}' => {
                    if self.stack.len() > 1 {
                        self.stack.pop();
                    } else {
                        self.diagnostics.push(Diagnostic::unbalanced(
                            "closing brace with no open scope",
                            offset + i,
                        ));
                    }
                    self.statement.clear();
                }
                ';' => self.statement.clear(),
                _ => {
                    self.statement.push(c);
                    if self.statement.len() > STATEMENT_KEEP {
                        let cut = self.statement.len() - STATEMENT_KEEP;
                        // Keep the tail; split on a char boundary.
                        let cut = (cut..self.statement.len())
                            .find(|&b| self.statement.is_char_boundary(b))
                            .unwrap_or(0);
                        self.statement.drain(..cut);
                    }
                }
            }
        }
    }

    /// End of input: any frames still open are implicitly closed, best-effort.
    pub fn finish(&mut self, eof_offset: usize) {
        if self.stack.len() > 1 {
            self.diagnostics.push(Diagnostic::unbalanced(
                &format!(
                    "{} scope(s) still open at end of file",
                    self.stack.len() - 1
                ),
                eof_offset,
            ));
            self.stack.truncate(1);
        }
    }

    /// Name the frame a `{` at `at` opens, from the statement before it.
    fn open_frame(&self, at: usize) -> ScopeFrame {
        match matcher::classify_statement(&self.statement, self.enclosing()) {
            Some((kind, name)) => ScopeFrame {
                kind: match kind {
                    DeclarationKind::Class => ScopeKind::Class,
                    DeclarationKind::Function => ScopeKind::Function,
                    DeclarationKind::Method => ScopeKind::Method,
                    DeclarationKind::AnonymousFunction => ScopeKind::AnonymousFunction,
                },
                name,
                start: at,
            },
            None => ScopeFrame {
                kind: ScopeKind::Block,
                name: None,
                start: at,
            },
        }
    }
}

impl Default for ScopeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(tracker: &mut ScopeTracker, text: &str) {
        tracker.feed(text, 0);
    }

    #[test]
    fn base_frame_is_permanent() {
        let mut t = ScopeTracker::new();
        feed_all(&mut t, "}}}");
        assert_eq!(t.path().len(), 1);
        assert_eq!(t.path()[0].kind, ScopeKind::File);
        assert_eq!(t.take_diagnostics().len(), 3);
    }

    #[test]
    fn class_then_method_then_nested_function() {
        let mut t = ScopeTracker::new();
        feed_all(&mut t, "export class Hello {\n  constructor(name) {\n    function hello() {");
        let kinds: Vec<ScopeKind> = t.path().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScopeKind::File,
                ScopeKind::Class,
                ScopeKind::Method,
                ScopeKind::AnonymousFunction,
            ]
        );
        assert_eq!(t.path()[1].name.as_deref(), Some("Hello"));
        assert_eq!(t.path()[2].name.as_deref(), Some("constructor"));
        assert_eq!(t.path()[3].name.as_deref(), Some("hello"));
    }

    #[test]
    fn control_flow_opens_block_frames() {
        let mut t = ScopeTracker::new();
        feed_all(&mut t, "function f() { for (let i = 0; i < 3; i++) {");
        assert_eq!(t.enclosing(), ScopeKind::Block);
        feed_all(&mut t, "}}");
        assert_eq!(t.enclosing(), ScopeKind::File);
    }

    #[test]
    fn semicolon_resets_statement() {
        let mut t = ScopeTracker::new();
        // The call statement before the brace must not read as a signature.
        feed_all(&mut t, "ready(); {");
        assert_eq!(t.enclosing(), ScopeKind::Block);
    }

    #[test]
    fn unclosed_scopes_flagged_at_eof() {
        let mut t = ScopeTracker::new();
        feed_all(&mut t, "class A { f() {");
        t.finish(15);
        assert_eq!(t.path().len(), 1);
        let diags = t.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("2 scope(s)"));
    }

    #[test]
    fn deep_nesting_is_iterative() {
        let mut t = ScopeTracker::new();
        for _ in 0..10_000 {
            feed_all(&mut t, "{");
        }
        assert_eq!(t.path().len(), 10_001);
        for _ in 0..10_000 {
            feed_all(&mut t, "}");
        }
        assert_eq!(t.path().len(), 1);
        assert!(t.take_diagnostics().is_empty());
    }
}
