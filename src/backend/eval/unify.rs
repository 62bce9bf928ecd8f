//! Two-directional unification.
//!
//! Either side may contain variables. Both sides are substituted through the
//! current bindings before being compared, so bindings made earlier in the
//! walk are honoured by later siblings. The returned bindings are fully
//! resolved: no value mentions another bound variable.

use tracing::trace;

use crate::backend::models::{Atom, Bindings};

/// Unify two atoms, starting from empty bindings
pub fn unify(left: &Atom, right: &Atom) -> Option<Bindings> {
    unify_with(left, right, Bindings::new())
}

/// Unify two atoms, extending existing bindings
pub fn unify_with(left: &Atom, right: &Atom, mut bindings: Bindings) -> Option<Bindings> {
    trace!(target: "mettacore::eval::unify", %left, %right);
    if unify_impl(left, right, &mut bindings) {
        Some(bindings.resolved())
    } else {
        None
    }
}

fn unify_impl(left: &Atom, right: &Atom, bindings: &mut Bindings) -> bool {
    let left = bindings.resolve(left);
    let right = bindings.resolve(right);

    match (&left, &right) {
        (Atom::Variable { name: l, .. }, Atom::Variable { name: r, .. }) if l == r => true,
        (Atom::Variable { name, .. }, other) | (other, Atom::Variable { name, .. }) => {
            // Occurs check: $x cannot stand for a term that contains $x
            if other.contains_variable(name) {
                return false;
            }
            bindings.bind(name, other.clone())
        }
        (Atom::Expression(l_items), Atom::Expression(r_items)) => {
            l_items.len() == r_items.len()
                && l_items
                    .iter()
                    .zip(r_items.iter())
                    .all(|(l, r)| unify_impl(l, r, bindings))
        }
        (Atom::Symbol(_), Atom::Symbol(_))
        | (Atom::Grounded(_), Atom::Grounded(_))
        | (Atom::Empty, Atom::Empty)
        | (Atom::Error { .. }, Atom::Error { .. }) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::compile::parse;

    fn atom(src: &str) -> Atom {
        parse(src).unwrap().remove(0)
    }

    /// Both sides agree after substitution
    fn assert_unifier(left: &str, right: &str) {
        let (l, r) = (atom(left), atom(right));
        let b = unify(&l, &r).unwrap_or_else(|| panic!("{} ~ {} failed", left, right));
        assert_eq!(b.apply(&l), b.apply(&r));
    }

    #[test]
    fn test_variables_on_both_sides() {
        assert_unifier("(f $x b)", "(f a $y)");
        assert_unifier("(pair $x $x)", "(pair $y 3)");
        assert_unifier("$x", "(g 1)");
    }

    #[test]
    fn test_symmetry() {
        let cases = [
            ("(f $x b)", "(f a $y)", true),
            ("(f $x $x)", "(f a b)", false),
            ("(f $x)", "(f 1 2)", false),
            ("foo", "foo", true),
            ("foo", "bar", false),
            ("1", "1.0", false),
            ("(h $a (k $b))", "(h 1 $c)", true),
        ];
        for (l, r, expected) in cases {
            let forward = unify(&atom(l), &atom(r));
            let backward = unify(&atom(r), &atom(l));
            assert_eq!(forward.is_some(), expected, "{} ~ {}", l, r);
            assert_eq!(backward.is_some(), expected, "{} ~ {}", r, l);
        }
    }

    #[test]
    fn test_prior_bindings_are_applied() {
        let mut initial = Bindings::new();
        initial.bind("x", atom("a"));
        assert!(unify_with(&atom("$x"), &atom("b"), initial.clone()).is_none());
        assert!(unify_with(&atom("$x"), &atom("a"), initial).is_some());
    }

    #[test]
    fn test_occurs_check() {
        assert!(unify(&atom("$x"), &atom("(f $x)")).is_none());
    }

    #[test]
    fn test_kind_mismatch_fails() {
        assert!(unify(&atom("foo"), &atom("(foo)")).is_none());
        assert!(unify(&atom("\"foo\""), &atom("foo")).is_none());
        assert!(unify(&atom("Empty"), &atom("()")).is_none());
    }
}
