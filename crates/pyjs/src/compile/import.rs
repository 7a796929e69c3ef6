//! Import statements.
//!
//! The imported module's text is inlined at the import site, so the output of
//! a compile is one self-contained program. Compiled modules define their
//! namespace variable; target modules are trusted to define what they export.

use ruff_python_ast::name::Name;
use tracing::debug;

use super::{Imported, Translator};
use crate::{block, error::TranslateError, expressions::ImportAlias, js, parse::CodeRange};

impl Translator<'_> {
    /// `import a` and `import a.b as c`.
    pub(super) fn import(&mut self, aliases: &[ImportAlias]) -> Result<String, TranslateError> {
        let mut statements = Vec::new();
        for alias in aliases {
            let module = alias.name.as_str();
            if module.contains('.') && alias.asname.is_none() {
                return Err(TranslateError::not_yet("dotted `import` without an alias", alias.position));
            }
            let code = match self.compiler.import(module, alias.position)? {
                Imported::Target(code) => target_text(&code),
                Imported::Compiled(compiled) => compiled.code.clone(),
            };
            debug!(module, "inlining import");
            statements.push(code);
            if let Some(asname) = &alias.asname {
                statements.push(format!("{} = {};", js::ident(asname.as_str()), js::module_var(module)));
            }
        }
        Ok(block::lines(statements))
    }

    /// `from m import a, b as c` and `from m import *`.
    pub(super) fn import_from(
        &mut self,
        module: &Name,
        aliases: &[ImportAlias],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        let module = module.as_str();
        let imported = self.compiler.import(module, position)?;
        debug!(module, "inlining import");
        let mut statements = Vec::new();
        match imported {
            Imported::Target(code) => {
                statements.push(target_text(&code));
                // Target modules bind their names directly; a statement is needed
                // only when the Python binding maps to a different identifier.
                for alias in aliases.iter().filter(|alias| !alias.is_wildcard()) {
                    let binding = js::ident(alias.binding().as_str());
                    if binding != alias.name.as_str() {
                        statements.push(format!("{binding} = {};", alias.name));
                    }
                }
            }
            Imported::Compiled(compiled) => {
                statements.push(compiled.code.clone());
                let namespace = js::module_var(module);
                for alias in aliases {
                    if alias.is_wildcard() {
                        statements.extend(
                            compiled
                                .exports
                                .iter()
                                .map(|name| format!("{} = {namespace}.{name};", js::ident(name))),
                        );
                    } else if compiled.exports.iter().any(|name| name == alias.name.as_str()) {
                        statements.push(format!(
                            "{} = {namespace}.{};",
                            js::ident(alias.binding().as_str()),
                            alias.name
                        ));
                    } else {
                        return Err(TranslateError::import(
                            module,
                            format!("no name `{}` in module", alias.name),
                            alias.position,
                        ));
                    }
                }
            }
        }
        Ok(block::lines(statements))
    }
}

/// Target text as a statement list; a trailing `;` keeps a following
/// parenthesized statement from being read as a call.
fn target_text(code: &str) -> String {
    if code.trim_end().ends_with(';') {
        code.to_owned()
    } else {
        format!("{code}\n;")
    }
}
