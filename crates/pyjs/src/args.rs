use ruff_python_ast::name::Name;

use crate::expressions::ExprLoc;

/// A positional argument at a call site.
#[derive(Debug, Clone)]
pub enum Arg {
    Value(ExprLoc),
    /// `*iterable`, spread into the positional list.
    Spread(ExprLoc),
}

/// A keyword argument at a call site.
#[derive(Debug, Clone)]
pub enum Kwarg {
    Named { name: Name, value: ExprLoc },
    /// `**mapping`, merged into the keyword mapping.
    Spread(ExprLoc),
}

/// The arguments of a call expression, in source order within each group.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub positional: Vec<Arg>,
    pub keywords: Vec<Kwarg>,
}

impl CallArgs {
    /// True when every argument is a plain positional value.
    pub fn is_plain_positional(&self) -> bool {
        self.keywords.is_empty() && self.positional.iter().all(|a| matches!(a, Arg::Value(_)))
    }
}
