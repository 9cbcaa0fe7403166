//! Swift string literals and identifiers.
use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Words that cannot appear bare as a Swift identifier.
static SWIFT_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Any", "Self", "as", "associatedtype", "break", "case", "catch", "class", "continue",
        "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough", "false",
        "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout", "internal",
        "is", "let", "nil", "operator", "private", "protocol", "public", "repeat", "rethrows",
        "return", "self", "static", "struct", "subscript", "super", "switch", "throw", "throws",
        "true", "try", "typealias", "var", "where", "while",
    ]
    .into_iter()
    .collect()
});

/// Backslash and double quote get a backslash, and a carriage return is
/// spelled `\r`. Apply to raw text only once.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap already-escaped contents, switching to `"""` when they span lines.
pub fn wrap(escaped: &str) -> String {
    if escaped.contains('\n') {
        format!("\"\"\"\n{escaped}\n\"\"\"")
    } else {
        format!("\"{escaped}\"")
    }
}

/// Raw text to a complete Swift string literal.
pub fn quote(raw: &str) -> String {
    wrap(&escape(raw))
}

/// A source identifier as Swift can spell it.
pub fn identifier(name: &str) -> String {
    if name == "undefined" {
        String::from("nil")
    } else if SWIFT_KEYWORDS.contains(name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}
