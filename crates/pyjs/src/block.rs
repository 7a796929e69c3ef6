//! Assembly of hoisted, immediately-invoked scopes.
//!
//! Python binds names per function, not per block, so every scope the
//! translator opens declares all of its bound names once at the top. These
//! helpers are pure functions of their inputs.

use crate::js;

/// The `var a, b;` declaration for `names`, or `None` when there are none.
pub(crate) fn hoist<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Option<String> {
    let names: Vec<String> = names.into_iter().map(|n| js::ident(n.as_ref()).into_owned()).collect();
    if names.is_empty() {
        None
    } else {
        Some(format!("var {};", names.join(", ")))
    }
}

/// Wraps `segments` in an immediately-invoked function that re-declares `names`.
///
/// The result is an expression evaluating to whatever the segments `return`.
/// Empty segments are skipped.
pub(crate) fn wrap<S: AsRef<str>>(names: impl IntoIterator<Item = S>, segments: impl IntoIterator<Item = String>) -> String {
    wrap_call(&[], names, segments)
}

/// Like [`wrap`], with each `(parameter, argument)` pair bound on entry.
///
/// Arguments are evaluated left to right in the enclosing scope, before any
/// segment runs.
pub(crate) fn wrap_call<S: AsRef<str>>(
    bindings: &[(&str, String)],
    names: impl IntoIterator<Item = S>,
    segments: impl IntoIterator<Item = String>,
) -> String {
    let params: Vec<&str> = bindings.iter().map(|(param, _)| *param).collect();
    let args: Vec<&str> = bindings.iter().map(|(_, arg)| arg.as_str()).collect();
    let mut out = format!("(function ({}) {{\n", params.join(", "));
    for segment in hoist(names).into_iter().chain(segments) {
        if !segment.is_empty() {
            out.push_str(&segment);
            out.push('\n');
        }
    }
    out.push_str("})(");
    out.push_str(&args.join(", "));
    out.push(')');
    out
}

/// Joins statements one per line, skipping empty ones.
pub(crate) fn lines(statements: impl IntoIterator<Item = String>) -> String {
    statements
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_without_names_has_no_declaration() {
        let out = wrap(Vec::<&str>::new(), ["return 1;".to_owned()]);
        assert_eq!(out, "(function () {\nreturn 1;\n})()");
    }

    #[test]
    fn wrap_declares_names_first() {
        let out = wrap(["a", "new"], ["a = 1;".to_owned(), String::new(), "return a;".to_owned()]);
        assert_eq!(out, "(function () {\nvar a, new$;\na = 1;\nreturn a;\n})()");
    }

    #[test]
    fn wrap_call_binds_arguments_in_order() {
        let out = wrap_call(&[("$x", "a".to_owned()), ("$y", "f()".to_owned())], ["r"], ["return $x;".to_owned()]);
        assert_eq!(out, "(function ($x, $y) {\nvar r;\nreturn $x;\n})(a, f())");
    }

    #[test]
    fn hoist_skips_empty_sets() {
        assert_eq!(hoist(Vec::<String>::new()), None);
        assert_eq!(hoist(["x"]).as_deref(), Some("var x;"));
    }
}
