use tracing::trace;

use crate::backend::environment::Environment;
use crate::backend::models::Atom;

use super::{interpret, match_atom};

/// Evaluate if control flow: (if condition then-branch else-branch)
/// Only the chosen branch is evaluated, once per condition value.
pub(super) fn eval_if(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_three_args!("if", items);

    let condition = &items[1];
    let then_branch = &items[2];
    let else_branch = &items[3];

    let mut results = Vec::new();
    for value in interpret(condition, env) {
        let branch = if value.is_truthy() {
            then_branch
        } else {
            else_branch
        };
        results.extend(interpret(branch, env));
    }
    results
}

/// Match each value of the scrutinee against the clauses in order:
/// (case scrutinee (pattern body)...)
///
/// A value no clause accepts yields `Empty`. A scrutinee with no values at
/// all is matched as `Empty`, so an `(Empty ...)` clause can catch it.
pub(super) fn eval_case(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    if items.len() < 3 {
        return vec![Atom::error_at(
            "case expects a scrutinee followed by (pattern body) clauses",
            Atom::Expression(items.to_vec()),
        )];
    }

    let clauses = &items[2..];
    if let Some(bad) = clauses.iter().find(|c| c.arity() != 2) {
        return vec![Atom::error_at(
            "case clause must be a (pattern body) pair",
            bad.clone(),
        )];
    }

    let mut values = interpret(&items[1], env);
    if values.is_empty() {
        values.push(Atom::Empty);
    }

    let mut results = Vec::new();
    for value in values {
        let selected = clauses.iter().find_map(|clause| {
            let (pattern, body) = clause_parts(clause)?;
            match_atom(&value, pattern).map(|bindings| bindings.apply(body))
        });
        match selected {
            Some(body) => {
                trace!(target: "mettacore::eval::case", %value, %body, "clause selected");
                results.extend(interpret(&body, env));
            }
            None => results.push(Atom::Empty),
        }
    }
    results
}

fn clause_parts(clause: &Atom) -> Option<(&Atom, &Atom)> {
    match clause.children()? {
        [pattern, body] => Some((pattern, body)),
        _ => None,
    }
}
