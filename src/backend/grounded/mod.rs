//! Grounded (built-in) operators.
//!
//! Arithmetic, comparison and logical operators are implemented as
//! [`GroundedOperation`]s kept in a [`GroundedRegistry`]. Special forms that
//! need the space or unevaluated arguments live in `eval` instead.

mod arithmetic;
mod comparison;
mod logical;
mod traits;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::models::{Atom, Grounded};

pub use arithmetic::{AddOp, DivOp, ModOp, MulOp, SubOp};
pub use comparison::{EqualOp, GreaterEqOp, GreaterOp, LessEqOp, LessOp, NotEqualOp};
pub use logical::{AndOp, NotOp, OrOp};
pub use traits::{Arity, GroundedOperation};

pub type GroundedResult = Result<Atom, ExecError>;

/// Failure of a grounded operation on one combination of argument values.
///
/// Never escapes the evaluator: `interpret` turns it into an Error atom whose
/// source is the whole call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError {
    /// Wrong argument type or count
    IncorrectArgument(String),
    /// Division or remainder by zero, NaN ordering
    Arithmetic(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::IncorrectArgument(msg) => write!(f, "Incorrect argument: {}", msg),
            ExecError::Arithmetic(msg) => write!(f, "Arithmetic error: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}

/// Type name used in argument error messages
pub(crate) fn friendly_type_name(value: &Atom) -> &'static str {
    match value {
        Atom::Grounded(Grounded::Int(_)) => "Number (integer)",
        Atom::Grounded(Grounded::Float(_)) => "Number (float)",
        Atom::Grounded(Grounded::Bool(_)) => "Bool",
        Atom::Grounded(Grounded::Str(_)) => "String",
        Atom::Symbol(_) => "Symbol",
        Atom::Variable { .. } => "Variable",
        Atom::Expression(_) => "Expression",
        Atom::Empty => "Empty",
        Atom::Error { .. } => "Error",
    }
}

/// Coerce every argument to float, failing on the first non-numeric one
pub(crate) fn numeric_args(op: &str, args: &[Atom]) -> Result<Vec<f64>, ExecError> {
    args.iter()
        .map(|arg| {
            let value = match arg {
                Atom::Grounded(g) => g.as_f64(),
                _ => None,
            };
            value.ok_or_else(|| {
                ExecError::IncorrectArgument(format!(
                    "Cannot perform '{}': expected Number, got {} ({})",
                    op,
                    friendly_type_name(arg),
                    arg
                ))
            })
        })
        .collect()
}

/// Grounded operations by name. Cloning shares the operations.
pub struct GroundedRegistry {
    operations: HashMap<String, Arc<dyn GroundedOperation>>,
}

impl GroundedRegistry {
    /// A registry with no operations at all
    pub fn new() -> Self {
        GroundedRegistry {
            operations: HashMap::new(),
        }
    }

    /// Arithmetic, comparison and logical operators
    pub fn with_standard_ops() -> Self {
        let standard: [Arc<dyn GroundedOperation>; 14] = [
            Arc::new(AddOp),
            Arc::new(SubOp),
            Arc::new(MulOp),
            Arc::new(DivOp),
            Arc::new(ModOp),
            Arc::new(LessOp),
            Arc::new(LessEqOp),
            Arc::new(GreaterOp),
            Arc::new(GreaterEqOp),
            Arc::new(EqualOp),
            Arc::new(NotEqualOp),
            Arc::new(AndOp),
            Arc::new(OrOp),
            Arc::new(NotOp),
        ];
        let mut registry = Self::new();
        for op in standard {
            registry.register(op);
        }
        registry
    }

    /// Add an operation; an existing one with the same name is replaced
    pub fn register(&mut self, op: Arc<dyn GroundedOperation>) {
        self.operations.insert(op.name().to_string(), op);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn GroundedOperation>> {
        self.operations.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

impl Default for GroundedRegistry {
    fn default() -> Self {
        Self::with_standard_ops()
    }
}

impl Clone for GroundedRegistry {
    fn clone(&self) -> Self {
        let operations = self
            .operations
            .iter()
            .map(|(name, op)| (name.clone(), Arc::clone(op)))
            .collect();
        GroundedRegistry { operations }
    }
}

impl fmt::Debug for GroundedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("GroundedRegistry").field("operations", &names).finish()
    }
}
