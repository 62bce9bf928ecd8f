use crate::backend::environment::Environment;
use crate::backend::models::{Atom, Grounded};

use super::interpret;

/// Build an error atom: (error message [source])
///
/// Neither argument is evaluated.
pub(super) fn eval_error(items: &[Atom]) -> Vec<Atom> {
    require_args_between!("error", items, 1, 2, "(error message [source])");

    let message = match &items[1] {
        Atom::Grounded(Grounded::Str(s)) => s.clone(),
        other => other.to_string(),
    };
    match items.get(2) {
        Some(source) => vec![Atom::error_at(message, source.clone())],
        None => vec![Atom::error(message)],
    }
}

/// True for every result of the argument that is an error
pub(super) fn eval_is_error(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("is-error", items);
    interpret(&items[1], env)
        .iter()
        .map(|value| Atom::truth(value.is_error()))
        .collect()
}

/// Replace error results of the first argument with the results of the second:
/// (catch expr default)
pub(super) fn eval_catch(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!("catch", items);

    let mut results = Vec::new();
    for value in interpret(&items[1], env) {
        if value.is_error() {
            results.extend(interpret(&items[2], env));
        } else {
            results.push(value);
        }
    }
    results
}
