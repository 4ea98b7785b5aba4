//! Data model for scan results — format-agnostic.
//!
//! Everything here is an immutable value record: produced once by the scan
//! pipeline, consumed read-only by renderers and library callers. Offsets are
//! byte offsets into the scanned source text.

use crate::dialect::Dialect;

/// Classification of a contiguous region of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Code,
    StringLiteral,
    CharLiteral,
    LineComment,
    BlockComment,
}

/// A contiguous region of the input with a single classification.
///
/// The tokenizer produces these ordered, non-overlapping, and gap-free:
/// every byte of the input belongs to exactly one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub kind: SpanKind,
    /// Byte offset of the first character (inclusive).
    pub start: usize,
    /// Byte offset past the last character (exclusive).
    pub end: usize,
}

impl SourceSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Documentation significance of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Carries an extra doc marker (`/**`, `///`) and documents what follows.
    Doc,
    /// Ordinary comment with no documentation significance.
    Plain,
    /// Trailing comment on the same line as code; never documents anything.
    Ignored,
}

/// A classified comment.
///
/// `text` excludes the comment markers and per-line `*` decoration. A run of
/// adjacent `///` lines is merged into a single record whose offsets span the
/// whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub text: String,
    pub style: CommentStyle,
    pub start: usize,
    pub end: usize,
    pub dialect: Dialect,
}

/// Kind of lexical scope a brace pair introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Synthetic base frame; never popped.
    File,
    Class,
    Function,
    /// A function declared directly inside a class body.
    Method,
    /// A function nested inside another function's body (named or not),
    /// or a literal anonymous/arrow function.
    AnonymousFunction,
    /// Control-flow body or bare brace block.
    Block,
}

/// One entry on the scope tracker's stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub kind: ScopeKind,
    /// Empty-name frames (anonymous functions, blocks) carry `None`.
    pub name: Option<String>,
    /// Offset of the `{` that opened the frame (0 for the File base).
    pub start: usize,
}

impl ScopeFrame {
    pub fn file() -> Self {
        ScopeFrame {
            kind: ScopeKind::File,
            name: None,
            start: 0,
        }
    }
}

/// What a doc comment was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Function,
    Method,
    AnonymousFunction,
}

/// A syntactic point where a declaration begins.
///
/// `scope_path` is the enclosing frame sequence from the File base down to the
/// immediate parent; its length is the declaration's nesting depth. The path
/// is the location, not a single owning pointer: the same name can recur at
/// different depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    pub kind: DeclarationKind,
    pub name: Option<String>,
    /// Offset where the declaration pattern starts.
    pub offset: usize,
    pub scope_path: Vec<ScopeFrame>,
}

impl DeclarationSite {
    /// Nesting depth of the declaration (1 = directly at file level).
    pub fn depth(&self) -> usize {
        self.scope_path.len()
    }
}

/// One doc comment joined with the declaration it documents, if any.
///
/// Orphaned doc comments (no declaration inside the matching window) keep
/// their record with `target: None` — file-level and section comments are
/// still valid output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRecord {
    pub comment: CommentRecord,
    pub target: Option<DeclarationSite>,
}

/// A non-fatal problem encountered while scanning.
///
/// Scans never abort; malformed input degrades to best-effort output plus one
/// of these per problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub offset: usize,
}

impl Diagnostic {
    pub fn unterminated(what: &str, offset: usize) -> Self {
        Diagnostic {
            message: format!("unterminated {what}; treating rest of file as its body"),
            offset,
        }
    }

    pub fn unbalanced(message: &str, offset: usize) -> Self {
        Diagnostic {
            message: format!("unbalanced braces: {message}"),
            offset,
        }
    }
}
