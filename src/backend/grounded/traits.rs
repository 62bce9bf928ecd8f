//! Traits for grounded operations.

use super::{Atom, GroundedResult};

/// How many arguments an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Arity::Exactly(1) => write!(f, "exactly 1 argument"),
            Arity::Exactly(n) => write!(f, "exactly {} arguments", n),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

/// A built-in operator over evaluated values.
///
/// The interpreter evaluates every argument first; when an argument yields
/// several values, `execute` is called once per element of the Cartesian
/// product of argument values.
///
/// # Implementing a Grounded Operation
///
/// ```ignore
/// struct NegOp;
///
/// impl GroundedOperation for NegOp {
///     fn name(&self) -> &str { "neg" }
///     fn arity(&self) -> Arity { Arity::Exactly(1) }
///     fn execute(&self, args: &[Atom]) -> GroundedResult {
///         let x = numeric_args(self.name(), args)?[0];
///         Ok(Atom::float(-x))
///     }
/// }
/// ```
pub trait GroundedOperation: Send + Sync {
    /// The name of this operation (e.g., "+", "-", "and")
    fn name(&self) -> &str;

    /// Accepted argument counts, checked before arguments are evaluated
    fn arity(&self) -> Arity;

    /// Execute the operation on one combination of argument values.
    ///
    /// # Returns
    /// * `Ok(atom)` - the result value
    /// * `Err(...)` - turned into an Error atom by the interpreter
    fn execute(&self, args: &[Atom]) -> GroundedResult;
}
