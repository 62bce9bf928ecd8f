//! Runtime type inspection and `(: name Type)` annotations.
//!
//! Annotations are stored in the current space as plain atoms and consulted
//! by `get-type`; they are never enforced.

use tracing::debug;

use crate::backend::environment::Environment;
use crate::backend::models::Atom;
use crate::backend::space::Space;

use super::interpret;

/// Type of an already evaluated atom.
///
/// Symbols take their type from a `(: sym T)` annotation in `space`. Without
/// one, `True` and `False` are `Bool` and every other symbol is `Symbol`.
pub fn type_of(atom: &Atom, space: &Space) -> Atom {
    match atom {
        Atom::Symbol(name) => annotated_type(atom, space).unwrap_or_else(|| match name.as_str() {
            "True" | "False" => Atom::sym("Bool"),
            _ => Atom::sym("Symbol"),
        }),
        Atom::Grounded(g) => Atom::sym(g.type_name()),
        Atom::Expression(_) => Atom::sym("Expression"),
        Atom::Variable { .. } => Atom::sym("Variable"),
        Atom::Empty => Atom::sym("Empty"),
        Atom::Error { .. } => Atom::sym("Error"),
    }
}

fn annotated_type(atom: &Atom, space: &Space) -> Option<Atom> {
    space.atoms().iter().find_map(|candidate| match candidate.children()? {
        [Atom::Symbol(colon), name, ty] if colon == ":" && name == atom => Some(ty.clone()),
        _ => None,
    })
}

/// (get-type x): the type of every result of `x`
pub(super) fn eval_get_type(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("get-type", items);
    interpret(&items[1], env)
        .iter()
        .map(|value| type_of(value, env.space()))
        .collect()
}

/// (: name Type): record an annotation in the current space
pub(super) fn eval_annotation(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!(":", items);
    let annotation = Atom::Expression(items.to_vec());
    debug!(target: "mettacore::eval::types", %annotation, "type annotation");
    env.space_mut().add(annotation);
    vec![Atom::Empty]
}
