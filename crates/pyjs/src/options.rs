use serde::Serialize;

/// How keyword arguments and defaults travel from a call site to the callee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CallConvention {
    /// Each call passes one call-local `{args, kwargs}` bundle. Re-entrant calls
    /// cannot observe each other's arguments.
    #[default]
    Bundle,
    /// Keyword arguments and a copy of the defaults are attached to the callee
    /// as `kwargs` and `defaults` properties for the duration of the call.
    ///
    /// A callee that is re-entered natively (for example as a callback) while
    /// such a call is pending reads the pending call's keyword arguments.
    SideChannel,
}

/// Options for a [`Compiler`](crate::Compiler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub call_convention: CallConvention,
    /// Extensions of source modules, probed in order after the target extension.
    pub source_extensions: Vec<String>,
    /// Extension of modules included verbatim.
    pub target_extension: String,
    /// Prepend `from <builtins_module> import *` to the main module.
    pub include_builtins: bool,
    pub builtins_module: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            call_convention: CallConvention::default(),
            source_extensions: vec!["py".to_owned(), "pyjs".to_owned()],
            target_extension: "js".to_owned(),
            include_builtins: false,
            builtins_module: "__builtin__".to_owned(),
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_call_convention(mut self, call_convention: CallConvention) -> Self {
        self.call_convention = call_convention;
        self
    }

    /// Enables the builtins prelude, importing everything from `module`.
    #[must_use]
    pub fn with_builtins(mut self, module: impl Into<String>) -> Self {
        self.include_builtins = true;
        self.builtins_module = module.into();
        self
    }

    #[must_use]
    pub fn with_source_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.source_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn call_convention_names_are_kebab_case() {
        assert_eq!(CallConvention::SideChannel.to_string(), "side-channel");
        assert_eq!(CallConvention::from_str("bundle"), Ok(CallConvention::Bundle));
    }
}
