//! Declaration matcher — regex patterns shared by the scope tracker and the
//! forward doc-comment binder.
//!
//! Two views of the same patterns:
//! - [`classify_statement`] looks *backward* at the statement text accumulated
//!   before a `{` and names the frame it opens.
//! - [`match_forward`] looks *ahead* from a doc comment, skipping visibility
//!   keywords and decorators, and decides what the comment binds to.

use crate::model::{DeclarationKind, ScopeKind};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap());

static RE_CLASS_ANON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bclass\s*$").unwrap());

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(").unwrap());

// `ident = function ...` / `ident = (...) =>` / `const ident = async x =>`
static RE_ASSIGN_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([A-Za-z_$][\w$.]*)\s*=\s*(?:async\s+)?(?:function\b|\([^()]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
    )
    .unwrap()
});

// Arrow body opening directly: `... ) => {` or `x => {`
static RE_ARROW_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=>\s*$").unwrap());

// Method-style signature ending just before the `{`: name, parameter list,
// optional TS return type / Java throws clause.
static RE_SIGNATURE_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_$][\w$]*)\s*\(([^()]*(?:\([^()]*\)[^()]*)*)\)\s*(?::[^{};]*|throws\s[\w\s,.]*)?$")
        .unwrap()
});

// Forward-anchored variants used when scanning ahead of a doc comment.
static RE_FWD_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\b\s*([A-Za-z_$][\w$]*)?").unwrap());

static RE_FWD_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(").unwrap());

static RE_FWD_ASSIGN_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:const\s+|let\s+|var\s+)?([A-Za-z_$][\w$.]*)\s*=\s*(?:async\s+)?(?:function\b|\([^()]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
    )
    .unwrap()
});

// Optional return-type tokens (`void`, `List<String>`, `int[]`) may precede
// the name in Java/C-style signatures.
static RE_FWD_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z_$][\w$<>\[\].]*\s+)*([A-Za-z_$][\w$]*)\s*\(([^()]*(?:\([^()]*\)[^()]*)*)\)\s*(?::[^{};]*|throws\s[\w\s,.]*)?\{",
    )
    .unwrap()
});

// Visibility / storage / decorator-ish words that may precede a declaration
// and carry no binding significance of their own.
static RE_SKIP_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:export|default|public|private|protected|internal|static|abstract|final|async|declare|override|sealed|virtual|extern|inline|constexpr)\b\s*",
    )
    .unwrap()
});

// `@Decorator` or `@Decorator(...)` on its own, before the declaration.
static RE_DECORATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z_$][\w$.]*(?:\([^()]*\))?\s*").unwrap());

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "try", "catch", "finally", "return",
    "new", "throw", "typeof", "in", "of",
];

fn is_control_keyword(word: &str) -> bool {
    CONTROL_KEYWORDS.contains(&word)
}

fn function_like(kind: ScopeKind) -> bool {
    matches!(
        kind,
        ScopeKind::Function | ScopeKind::Method | ScopeKind::AnonymousFunction
    )
}

/// Resolve a raw pattern hit into a declaration kind using the enclosing
/// scope: a signature directly inside a class is a method; any function form
/// nested inside a function body counts as an anonymous/local function.
fn resolve_function_kind(enclosing: ScopeKind) -> DeclarationKind {
    if function_like(enclosing) {
        DeclarationKind::AnonymousFunction
    } else {
        DeclarationKind::Function
    }
}

fn resolve_signature_kind(enclosing: ScopeKind) -> DeclarationKind {
    match enclosing {
        ScopeKind::Class => DeclarationKind::Method,
        k if function_like(k) => DeclarationKind::AnonymousFunction,
        _ => DeclarationKind::Function,
    }
}

/// Classify the statement text that precedes a `{`, naming the frame the
/// brace opens. `enclosing` is the scope the brace appears in. `None` means
/// an ordinary block.
pub fn classify_statement(
    statement: &str,
    enclosing: ScopeKind,
) -> Option<(DeclarationKind, Option<String>)> {
    let statement = statement.trim();

    if let Some(caps) = RE_CLASS.captures(statement) {
        return Some((DeclarationKind::Class, Some(caps[1].to_string())));
    }
    if RE_CLASS_ANON.is_match(statement) {
        return Some((DeclarationKind::Class, None));
    }
    if let Some(caps) = RE_FUNCTION.captures(statement) {
        let name = caps.get(1).map(|m| m.as_str().to_string());
        return Some((resolve_function_kind(enclosing), name));
    }
    if RE_ARROW_TAIL.is_match(statement) {
        // Arrow function body; pick up a name from `x = ... =>` if present.
        let name = RE_ASSIGN_FN
            .captures(statement)
            .map(|caps| caps[1].to_string());
        return Some((DeclarationKind::AnonymousFunction, name));
    }
    if let Some(caps) = RE_ASSIGN_FN.captures(statement) {
        return Some((resolve_function_kind(enclosing), Some(caps[1].to_string())));
    }
    if let Some(caps) = RE_SIGNATURE_TAIL.captures(statement) {
        let name = caps[1].to_string();
        if !is_control_keyword(&name) {
            return Some((resolve_signature_kind(enclosing), Some(name)));
        }
    }

    None
}

/// What a forward scan found right after a doc comment's skippable prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardMatch {
    /// A declaration starts here (kind resolved against `enclosing`).
    Declaration {
        kind: DeclarationKind,
        name: Option<String>,
        /// Bytes consumed from the scan position to the pattern start.
        at: usize,
    },
    /// The next token cannot introduce a declaration; the comment orphans.
    Other,
}

/// Try to read a declaration at the start of `code`, skipping visibility
/// keywords and decorators first. `enclosing` is the scope the code sits in.
pub fn match_forward(code: &str, enclosing: ScopeKind) -> ForwardMatch {
    let mut at = 0;

    loop {
        let rest = &code[at..];
        let trimmed = rest.trim_start();
        at += rest.len() - trimmed.len();
        let rest = &code[at..];

        if rest.is_empty() {
            return ForwardMatch::Other;
        }
        if let Some(m) = RE_DECORATOR.find(rest) {
            at += m.end();
            continue;
        }
        if let Some(m) = RE_SKIP_WORD.find(rest) {
            at += m.end();
            continue;
        }
        break;
    }

    let rest = &code[at..];

    // A control-flow keyword can never introduce a declaration; bail before
    // the signature pattern mistakes `return foo(x) {` for one.
    let first_word: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if is_control_keyword(&first_word) {
        return ForwardMatch::Other;
    }

    if let Some(caps) = RE_FWD_CLASS.captures(rest) {
        return ForwardMatch::Declaration {
            kind: DeclarationKind::Class,
            name: caps.get(1).map(|m| m.as_str().to_string()),
            at,
        };
    }
    if let Some(caps) = RE_FWD_FUNCTION.captures(rest) {
        return ForwardMatch::Declaration {
            kind: resolve_function_kind(enclosing),
            name: caps.get(1).map(|m| m.as_str().to_string()),
            at,
        };
    }
    if let Some(caps) = RE_FWD_ASSIGN_FN.captures(rest) {
        let name = caps[1].to_string();
        if !is_control_keyword(&name) {
            return ForwardMatch::Declaration {
                kind: DeclarationKind::AnonymousFunction,
                name: Some(name),
                at,
            };
        }
    }
    if let Some(caps) = RE_FWD_SIGNATURE.captures(rest) {
        let name = caps[1].to_string();
        if !is_control_keyword(&name) {
            return ForwardMatch::Declaration {
                kind: resolve_signature_kind(enclosing),
                name: Some(name),
                at,
            };
        }
    }

    ForwardMatch::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_exported_class() {
        let got = classify_statement("export class Hello ", ScopeKind::File);
        assert_eq!(got, Some((DeclarationKind::Class, Some("Hello".into()))));
    }

    #[test]
    fn classifies_top_level_function() {
        let got = classify_statement("function hello() ", ScopeKind::File);
        assert_eq!(got, Some((DeclarationKind::Function, Some("hello".into()))));
    }

    #[test]
    fn function_inside_method_is_anonymous() {
        let got = classify_statement("function hello() ", ScopeKind::Method);
        assert_eq!(
            got,
            Some((DeclarationKind::AnonymousFunction, Some("hello".into())))
        );
    }

    #[test]
    fn nameless_function_keeps_empty_name() {
        let got = classify_statement("return function () ", ScopeKind::Function);
        assert_eq!(got, Some((DeclarationKind::AnonymousFunction, None)));
    }

    #[test]
    fn constructor_inside_class_is_method() {
        let got = classify_statement("constructor(name: string) ", ScopeKind::Class);
        assert_eq!(got, Some((DeclarationKind::Method, Some("constructor".into()))));
    }

    #[test]
    fn java_main_signature_is_method() {
        let got = classify_statement("public static void main(String[] args) ", ScopeKind::Class);
        assert_eq!(got, Some((DeclarationKind::Method, Some("main".into()))));
    }

    #[test]
    fn arrow_assignment_is_anonymous_with_name() {
        let got = classify_statement("const greet = (name) => ", ScopeKind::File);
        assert_eq!(
            got,
            Some((DeclarationKind::AnonymousFunction, Some("greet".into())))
        );
    }

    #[test]
    fn control_flow_is_a_plain_block() {
        assert_eq!(classify_statement("i++) ", ScopeKind::Function), None);
        assert_eq!(classify_statement("if (ready) ", ScopeKind::Function), None);
        assert_eq!(classify_statement("", ScopeKind::File), None);
    }

    #[test]
    fn forward_skips_export_and_decorators() {
        let got = match_forward("@Component(selector)\nexport class Hello {", ScopeKind::File);
        match got {
            ForwardMatch::Declaration { kind, name, .. } => {
                assert_eq!(kind, DeclarationKind::Class);
                assert_eq!(name.as_deref(), Some("Hello"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn forward_java_signature_with_return_type() {
        let got = match_forward(
            "public static void main(String[] args) {",
            ScopeKind::Class,
        );
        match got {
            ForwardMatch::Declaration { kind, name, .. } => {
                assert_eq!(kind, DeclarationKind::Method);
                assert_eq!(name.as_deref(), Some("main"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn forward_rejects_return_statement() {
        assert_eq!(
            match_forward("return foo(x) {", ScopeKind::Function),
            ForwardMatch::Other
        );
    }

    #[test]
    fn forward_rejects_plain_statement() {
        assert_eq!(
            match_forward("console.log('hi');", ScopeKind::Function),
            ForwardMatch::Other
        );
        assert_eq!(
            match_forward("for (let i = 0; i < 3; i++) {", ScopeKind::Function),
            ForwardMatch::Other
        );
    }

    #[test]
    fn forward_signature_requires_body_brace() {
        // A call followed by `{` on a later statement must not bind.
        assert_eq!(
            match_forward("hello();", ScopeKind::Class),
            ForwardMatch::Other
        );
        match match_forward("main(args) {", ScopeKind::Class) {
            ForwardMatch::Declaration { kind, name, .. } => {
                assert_eq!(kind, DeclarationKind::Method);
                assert_eq!(name.as_deref(), Some("main"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
