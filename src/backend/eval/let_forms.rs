use tracing::trace;

use crate::backend::environment::Environment;
use crate::backend::models::Atom;

use super::{interpret, match_atom};

/// Evaluate let binding: (let pattern value-expr body)
///
/// `value-expr` is evaluated, each value is matched against `pattern`, and
/// `body` is evaluated under each successful binding. When no value matches
/// the result is `Empty`.
pub(super) fn eval_let(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_three_args!("let", items);

    let pattern = &items[1];
    let value_expr = &items[2];
    let body = &items[3];

    let mut matched = false;
    let mut results = Vec::new();
    for value in interpret(value_expr, env) {
        if let Some(bindings) = match_atom(&value, pattern) {
            trace!(target: "mettacore::eval::let", %pattern, %value, %bindings, "let bound");
            matched = true;
            results.extend(interpret(&bindings.apply(body), env));
        }
    }

    if !matched {
        return vec![Atom::Empty];
    }
    results
}

/// Evaluate let* sequential bindings: (let* ((p1 v1) (p2 v2) ...) body)
///
/// Rewritten into nested `let` forms so later value expressions see the
/// bindings of earlier ones.
pub(super) fn eval_let_star(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!("let*", items);

    let pairs = match &items[1] {
        Atom::Expression(pairs) => pairs,
        other => {
            return vec![Atom::error_at(
                "let* expects a list of (pattern value) pairs",
                other.clone(),
            )]
        }
    };
    if let Some(bad) = pairs.iter().find(|p| p.arity() != 2) {
        return vec![Atom::error_at(
            "let* binding must be a (pattern value) pair",
            bad.clone(),
        )];
    }

    let nested = pairs.iter().rev().fold(items[2].clone(), |body, pair| {
        let mut form = vec![Atom::sym("let")];
        form.extend(pair.children().unwrap_or_default().iter().cloned());
        form.push(body);
        Atom::Expression(form)
    });
    interpret(&nested, env)
}
