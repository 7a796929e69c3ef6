use ruff_python_ast::name::Name;

use crate::expressions::ExprLoc;

/// A parameter in a function signature with optional default value.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Name,
    /// The default value expression (evaluated at definition time).
    pub default: Option<ExprLoc>,
}

/// A function signature with all parameter kinds.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    /// Positional-only parameters (before `/`).
    pub pos_only: Vec<Param>,
    /// Positional-or-keyword parameters.
    pub args: Vec<Param>,
    /// Variable positional parameter (`*args`).
    pub var_args: Option<Name>,
    /// Keyword-only parameters (after `*` or `*args`).
    pub kw_only: Vec<Param>,
    /// Variable keyword parameter (`**kwargs`).
    pub var_kwargs: Option<Name>,
}

impl Signature {
    /// Parameters that can be filled by position, in order.
    pub fn positional(&self) -> impl Iterator<Item = &Param> {
        self.pos_only.iter().chain(&self.args)
    }

    /// Returns an iterator over all parameter names in the signature.
    ///
    /// Order: pos_only, args, var_args, kw_only, var_kwargs
    pub fn param_names(&self) -> impl Iterator<Item = &Name> {
        self.positional()
            .map(|p| &p.name)
            .chain(self.var_args.iter())
            .chain(self.kw_only.iter().map(|p| &p.name))
            .chain(self.var_kwargs.iter())
    }

    /// Default expressions of the positional parameters, in order.
    ///
    /// Python requires these to form a suffix of the positional list, so index
    /// `i` of this vector belongs to positional parameter `first_default() + i`.
    pub fn positional_defaults(&self) -> impl Iterator<Item = &ExprLoc> {
        self.positional().filter_map(|p| p.default.as_ref())
    }

    /// Index of the first positional parameter that has a default.
    pub fn first_default(&self) -> usize {
        self.positional()
            .position(|p| p.default.is_some())
            .unwrap_or_else(|| self.positional_count())
    }

    pub fn positional_count(&self) -> usize {
        self.pos_only.len() + self.args.len()
    }
}
