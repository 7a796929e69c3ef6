use std::{borrow::Cow, fmt};

use serde::Serialize;

use crate::{dispatch::NodeKind, parse::CodeRange};

/// Line and column of a point in source code, both 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CodeLoc {
    pub line: u32,
    pub column: u32,
}

impl CodeLoc {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// How permanent an unsupported-construct rejection is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Support {
    /// Permanently excluded; the target runtime has no faithful equivalent.
    Never,
    /// Not covered by the translator yet.
    NotYet,
}

/// A position in a named source file, as reported to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    fn new(filename: &str, position: CodeRange) -> Self {
        let start = position.start();
        Self {
            filename: filename.to_owned(),
            line: start.line,
            column: start.column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A fatal error from compiling a module.
///
/// Compilation stops at the first error and produces no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileError {
    /// A construct that cannot be translated.
    UnsupportedConstruct {
        feature: String,
        support: Support,
        location: Location,
    },
    /// An imported module could not be located or loaded.
    ImportResolution {
        module: String,
        reason: String,
        location: Location,
    },
    /// The source text is not valid Python.
    Syntax { message: String, location: Location },
}

impl CompileError {
    /// Where in the source the error was raised.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::UnsupportedConstruct { location, .. }
            | Self::ImportResolution { location, .. }
            | Self::Syntax { location, .. } => location,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedConstruct {
                feature,
                support,
                location,
            } => match support {
                Support::Never => write!(f, "{location}: unsupported construct: {feature} (never supported)"),
                Support::NotYet => write!(f, "{location}: unsupported construct: {feature} (not supported yet)"),
            },
            Self::ImportResolution {
                module,
                reason,
                location,
            } => write!(f, "{location}: cannot import module `{module}`: {reason}"),
            Self::Syntax { message, location } => write!(f, "{location}: syntax error: {message}"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Error raised while translating one module, before it is tied to a filename.
#[derive(Debug, Clone)]
pub(crate) enum TranslateError {
    Unsupported {
        feature: Cow<'static, str>,
        support: Support,
        position: CodeRange,
    },
    Import {
        module: String,
        reason: Cow<'static, str>,
        position: CodeRange,
    },
    Syntax {
        msg: Cow<'static, str>,
        position: CodeRange,
    },
    /// Failure inside an imported module, already tied to that module's file.
    Module(Box<CompileError>),
}

impl TranslateError {
    pub(crate) fn never(feature: impl Into<Cow<'static, str>>, position: CodeRange) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            support: Support::Never,
            position,
        }
    }

    pub(crate) fn not_yet(feature: impl Into<Cow<'static, str>>, position: CodeRange) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            support: Support::NotYet,
            position,
        }
    }

    /// Rejection of a node kind with no handler.
    pub(crate) fn unhandled(kind: NodeKind, position: CodeRange) -> Self {
        Self::Unsupported {
            feature: kind.to_string().into(),
            support: kind.support(),
            position,
        }
    }

    pub(crate) fn import(module: &str, reason: impl Into<Cow<'static, str>>, position: CodeRange) -> Self {
        Self::Import {
            module: module.to_owned(),
            reason: reason.into(),
            position,
        }
    }

    pub(crate) fn syntax(msg: impl Into<Cow<'static, str>>, position: CodeRange) -> Self {
        Self::Syntax {
            msg: msg.into(),
            position,
        }
    }

    /// Attaches the filename of the module being compiled.
    pub(crate) fn into_compile_error(self, filename: &str) -> CompileError {
        match self {
            Self::Unsupported {
                feature,
                support,
                position,
            } => CompileError::UnsupportedConstruct {
                feature: feature.into_owned(),
                support,
                location: Location::new(filename, position),
            },
            Self::Import {
                module,
                reason,
                position,
            } => CompileError::ImportResolution {
                module,
                reason: reason.into_owned(),
                location: Location::new(filename, position),
            },
            Self::Syntax { msg, position } => CompileError::Syntax {
                message: msg.into_owned(),
                location: Location::new(filename, position),
            },
            Self::Module(error) => *error,
        }
    }
}
