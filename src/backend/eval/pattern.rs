//! Pattern matching for atoms.
//!
//! One-directional: the left side is data, only the right side (the pattern)
//! may bind variables. Variables that appear inside the data are compared
//! structurally like any other atom.

use tracing::trace;

use crate::backend::models::{Atom, Bindings};

/// Match `atom` against `pattern`, starting from empty bindings.
///
/// # Examples
/// ```ignore
/// match_atom(&long(42), &var("x"))              // => Some({$x: 42})
/// match_atom(&expr([foo, 1]), &expr([foo, $x])) // => Some({$x: 1})
/// ```
pub fn match_atom(atom: &Atom, pattern: &Atom) -> Option<Bindings> {
    match_with(atom, pattern, Bindings::new())
}

/// Match `atom` against `pattern`, extending existing bindings.
pub fn match_with(atom: &Atom, pattern: &Atom, mut bindings: Bindings) -> Option<Bindings> {
    trace!(target: "mettacore::eval::pattern_match", %pattern, %atom);
    if match_impl(atom, pattern, &mut bindings) {
        Some(bindings)
    } else {
        None
    }
}

/// Accumulating implementation shared by the recursive calls.
/// A failed match may leave partial bindings behind; callers discard them.
fn match_impl(atom: &Atom, pattern: &Atom, bindings: &mut Bindings) -> bool {
    match (pattern, atom) {
        // A variable matched against itself binds nothing
        (Atom::Variable { name: p, .. }, Atom::Variable { name: a, .. }) if p == a => {
            match bindings.get(p) {
                Some(existing) => existing == atom,
                None => true,
            }
        }

        (Atom::Variable { name, .. }, value) => bindings.bind(name, value.clone()),

        (Atom::Expression(p_items), Atom::Expression(a_items)) => {
            p_items.len() == a_items.len()
                && p_items
                    .iter()
                    .zip(a_items.iter())
                    .all(|(p, a)| match_impl(a, p, bindings))
        }

        (Atom::Empty, Atom::Empty) => true,

        // Symbols, grounded values and errors require structural equality
        (p, a) => p == a,
    }
}

/// Attempt `pattern` independently against every atom, in iteration order.
pub fn match_all<'a, I>(atoms: I, pattern: &Atom) -> Vec<Bindings>
where
    I: IntoIterator<Item = &'a Atom>,
{
    atoms
        .into_iter()
        .filter_map(|atom| match_atom(atom, pattern))
        .collect()
}
