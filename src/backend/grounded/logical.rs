//! Logical operations over truthiness.
//!
//! Every argument is evaluated; there is no short-circuiting.
//! - `AndOp` - Logical AND (and), variadic
//! - `OrOp` - Logical OR (or), variadic
//! - `NotOp` - Logical NOT (not), unary

use super::{Arity, Atom, ExecError, GroundedOperation, GroundedResult};

/// Logical AND operation: (and a b ...)
pub struct AndOp;

impl GroundedOperation for AndOp {
    fn name(&self) -> &str {
        "and"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        Ok(Atom::truth(args.iter().all(Atom::is_truthy)))
    }
}

/// Logical OR operation: (or a b ...)
pub struct OrOp;

impl GroundedOperation for OrOp {
    fn name(&self) -> &str {
        "or"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        Ok(Atom::truth(args.iter().any(Atom::is_truthy)))
    }
}

/// Logical NOT operation: (not a)
pub struct NotOp;

impl GroundedOperation for NotOp {
    fn name(&self) -> &str {
        "not"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        match args {
            [a] => Ok(Atom::truth(!a.is_truthy())),
            _ => Err(ExecError::IncorrectArgument(format!(
                "not requires exactly 1 argument, got {}",
                args.len()
            ))),
        }
    }
}
