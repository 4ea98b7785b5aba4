//! # docbind
//!
//! Extract documentation comments from C-family source text and bind each one
//! to the declaration it documents — class, function, method, or a function
//! nested arbitrarily deep inside other declarations.
//!
//! The engine takes fully materialized source text plus a [`Dialect`] and
//! produces a lazy, source-ordered sequence of [`AssociationRecord`]s, with
//! non-fatal [`Diagnostic`]s on the side. Malformed input (unterminated
//! comments or literals, unbalanced braces) degrades to best-effort output;
//! a scan always terminates and never aborts.
//!
//! One scan is self-contained: no state crosses calls, so scanning many files
//! in parallel needs no coordination beyond collecting results.
//!
//! ```
//! use docbind::{scan_all, Dialect};
//!
//! let src = "/** Greets. */\nfunction greet(name) {\n}\n";
//! let (records, diagnostics) = scan_all(src, Dialect::JavaScript);
//! assert!(diagnostics.is_empty());
//! let target = records[0].target.as_ref().unwrap();
//! assert_eq!(target.name.as_deref(), Some("greet"));
//! ```

pub mod dialect;
pub mod model;
pub mod render;
pub mod scanner;

pub use dialect::{Dialect, DialectRules};
pub use model::{
    AssociationRecord, CommentRecord, CommentStyle, DeclarationKind, DeclarationSite, Diagnostic,
    ScopeFrame, ScopeKind, SourceSpan, SpanKind,
};
pub use scanner::{scan, scan_all, Scan};
