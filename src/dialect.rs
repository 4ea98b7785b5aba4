//! Language dialects and their comment marker rules.
//!
//! Classification is driven by an immutable rule descriptor looked up from
//! the dialect value at runtime. Distinct dialects may share identical
//! tables; today the whole C family does, differing only in how quote
//! characters are read.

use clap::ValueEnum;

/// Source language dialect.
///
/// Selects the marker rule table and the literal syntax the tokenizer honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    C,
    Cpp,
    Java,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    #[value(name = "csharp", alias = "cs")]
    CSharp,
}

/// How single quotes read in a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `'x'` is a character literal (C, C++, Java, C#).
    CharLiteral,
    /// `'...'` is an ordinary string (JavaScript, TypeScript).
    StringLiteral,
}

/// Immutable marker rule descriptor for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectRules {
    /// Line comment opener (`//`). A third marker char makes it a doc comment.
    pub line_marker: &'static str,
    /// Block comment opener (`/*`) and closer (`*/`).
    pub block_open: &'static str,
    pub block_close: &'static str,
    /// The marker character whose repetition count distinguishes doc from
    /// plain (`*` for blocks, `/` for lines).
    pub doc_char: char,
    /// How single quotes tokenize.
    pub single_quote: QuoteStyle,
    /// Whether backtick template literals exist (JS/TS).
    pub template_literals: bool,
    /// Whether adjacent doc line comments merge into one logical comment.
    pub merge_doc_lines: bool,
}

const C_FAMILY: DialectRules = DialectRules {
    line_marker: "//",
    block_open: "/*",
    block_close: "*/",
    doc_char: '*',
    single_quote: QuoteStyle::CharLiteral,
    template_literals: false,
    merge_doc_lines: true,
};

const ECMA: DialectRules = DialectRules {
    line_marker: "//",
    block_open: "/*",
    block_close: "*/",
    doc_char: '*',
    single_quote: QuoteStyle::StringLiteral,
    template_literals: true,
    merge_doc_lines: true,
};

impl Dialect {
    /// Rule table lookup. Pure data, no behavior attached to the variants.
    pub fn rules(&self) -> DialectRules {
        match self {
            Dialect::C | Dialect::Cpp | Dialect::Java | Dialect::CSharp => C_FAMILY,
            Dialect::JavaScript | Dialect::TypeScript => ECMA,
        }
    }

    /// Infer a dialect from a file extension, if recognized.
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext {
            "c" | "h" => Some(Dialect::C),
            "cc" | "cpp" | "cxx" | "hpp" | "hh" => Some(Dialect::Cpp),
            "java" => Some(Dialect::Java),
            "js" | "mjs" | "cjs" | "jsx" => Some(Dialect::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(Dialect::TypeScript),
            "cs" => Some(Dialect::CSharp),
            _ => None,
        }
    }
}
