use crate::backend::environment::Environment;
use crate::backend::models::Atom;

use super::interpret;

/// Gather every result of the argument into one expression, in order
pub(super) fn eval_collapse(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("collapse", items);
    vec![Atom::Expression(interpret(&items[1], env))]
}

/// Treat the children of the argument list as independent alternatives.
///
/// Each child is evaluated and all results are concatenated in order.
pub(super) fn eval_superpose(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("superpose", items);

    let alternatives = match &items[1] {
        Atom::Expression(children) => children,
        other => {
            return vec![Atom::error_at(
                "superpose expects a list of alternatives",
                other.clone(),
            )]
        }
    };

    alternatives
        .iter()
        .flat_map(|alt| interpret(alt, env))
        .collect()
}
