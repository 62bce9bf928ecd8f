use tracing::trace;

use crate::backend::environment::Environment;
use crate::backend::models::Atom;

use super::interpret;

/// Quote: return the argument untouched
pub(super) fn eval_quote(items: &[Atom]) -> Vec<Atom> {
    require_one_arg!("quote", items);
    trace!(target: "mettacore::eval::quote", atom = %items[1]);
    vec![items[1].clone()]
}

/// Unquote: evaluate the argument, then evaluate each result once more.
///
/// `(unquote (quote X))` therefore evaluates `X`.
pub(super) fn eval_unquote(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("unquote", items);

    let mut results = Vec::new();
    for value in interpret(&items[1], env) {
        trace!(target: "mettacore::eval::unquote", %value);
        results.extend(interpret(&value, env));
    }
    results
}
