//! Target-language lexical helpers: literals and identifiers.

use std::{borrow::Cow, fmt::Write};

/// Reserved words and globals a Python name must not shadow in the output.
const RESERVED: &[&str] = &[
    "arguments",
    "await",
    "case",
    "catch",
    "const",
    "debugger",
    "default",
    "delete",
    "do",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "function",
    "implements",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "typeof",
    "undefined",
    "var",
    "void",
    "with",
    "yield",
];

/// Globals the generated code calls. Python bindings of these names would
/// shadow them inside a module scope.
const RUNTIME_GLOBALS: &[&str] = &[
    "Array",
    "Infinity",
    "Math",
    "NaN",
    "Object",
    "String",
    "TypeError",
    "console",
];

/// Maps a Python identifier to a safe target identifier.
///
/// Reserved words and runtime globals get a `$` suffix. Python identifiers never contain `$`, so
/// the result cannot collide with another source name or a generated temporary.
pub fn ident(name: &str) -> Cow<'_, str> {
    if RESERVED.contains(&name) || RUNTIME_GLOBALS.contains(&name) {
        Cow::Owned(format!("{name}$"))
    } else {
        Cow::Borrowed(name)
    }
}

/// The variable holding a module's namespace object; dots become `$`.
pub fn module_var(module: &str) -> String {
    module.split('.').map(ident).collect::<Vec<_>>().join("$")
}

/// Double-quoted string literal with full escaping.
pub fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Number literal for a Python float.
pub fn float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else {
        // `Debug` keeps a fractional part or exponent and round-trips exactly.
        format!("{value:?}")
    }
}
