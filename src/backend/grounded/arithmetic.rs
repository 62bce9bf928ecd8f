//! Arithmetic operations.
//!
//! All arguments are coerced to float and the result is always a float:
//! - `AddOp` - Addition (+), variadic
//! - `SubOp` - Subtraction (-), left fold; a single argument is negated
//! - `MulOp` - Multiplication (*), variadic
//! - `DivOp` - Division (/), left fold over at least two arguments
//! - `ModOp` - Remainder (%), left fold over at least two arguments

use super::{numeric_args, Arity, Atom, ExecError, GroundedOperation, GroundedResult};

/// Addition operation: (+ a b ...)
pub struct AddOp;

impl GroundedOperation for AddOp {
    fn name(&self) -> &str {
        "+"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        let values = numeric_args(self.name(), args)?;
        Ok(Atom::float(values.iter().sum()))
    }
}

/// Subtraction operation: (- a b ...) or (- a)
pub struct SubOp;

impl GroundedOperation for SubOp {
    fn name(&self) -> &str {
        "-"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        let values = numeric_args(self.name(), args)?;
        match values.split_first() {
            Some((first, [])) => Ok(Atom::float(-first)),
            Some((first, rest)) => Ok(Atom::float(rest.iter().fold(*first, |acc, x| acc - x))),
            None => Err(ExecError::IncorrectArgument(
                "- requires at least 1 argument".to_string(),
            )),
        }
    }
}

/// Multiplication operation: (* a b ...)
pub struct MulOp;

impl GroundedOperation for MulOp {
    fn name(&self) -> &str {
        "*"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        let values = numeric_args(self.name(), args)?;
        Ok(Atom::float(values.iter().product()))
    }
}

/// Left fold that rejects a zero right-hand operand
fn checked_fold(op: &str, values: &[f64], f: impl Fn(f64, f64) -> f64) -> GroundedResult {
    let (first, rest) = values.split_first().ok_or_else(|| {
        ExecError::IncorrectArgument(format!("{} requires at least 2 arguments", op))
    })?;
    let mut acc = *first;
    for &divisor in rest {
        if divisor == 0.0 {
            return Err(ExecError::Arithmetic(format!("Division by zero in '{}'", op)));
        }
        acc = f(acc, divisor);
    }
    Ok(Atom::float(acc))
}

/// Division operation: (/ a b ...)
pub struct DivOp;

impl GroundedOperation for DivOp {
    fn name(&self) -> &str {
        "/"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        let values = numeric_args(self.name(), args)?;
        checked_fold(self.name(), &values, |a, b| a / b)
    }
}

/// Remainder operation: (% a b ...)
pub struct ModOp;

impl GroundedOperation for ModOp {
    fn name(&self) -> &str {
        "%"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        let values = numeric_args(self.name(), args)?;
        checked_fold(self.name(), &values, |a, b| a % b)
    }
}
