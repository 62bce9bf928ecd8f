//! Rule reduction to a fixed point.
//!
//! One step is one successful rule application. When no rule applies at the
//! top of an expression its children are reduced (sharing the remaining
//! budget) and the expression is rebuilt. Running out of steps is not an
//! error: the current, possibly unreduced atom is returned.
//!
//! Expressions headed by a special form are opaque below their head: their
//! arguments are quoted, lazily evaluated, or bound later, so rewriting them
//! early would change their meaning.

use tracing::debug;

use crate::backend::models::{Atom, Rule};

/// Heads whose arguments the reducer never rewrites
const OPAQUE_FORMS: &[&str] = &[
    "quote", "unquote", "if", "case", "let", "let*", "match", "collapse", "superpose", "catch",
    "=", ":",
];

/// Reduce `atom` with `rules` (already in priority order) for at most `max_steps` rewrites
pub fn reduce(atom: &Atom, rules: &[Rule], max_steps: usize) -> Atom {
    reduce_bounded(atom, rules, max_steps).0
}

/// Like [`reduce`], also reporting whether the step bound cut the reduction short
pub(crate) fn reduce_bounded(atom: &Atom, rules: &[Rule], max_steps: usize) -> (Atom, bool) {
    let mut budget = max_steps;
    let (result, changed) = reduce_with_budget(atom.clone(), rules, &mut budget);
    let exhausted = budget == 0 && changed && is_reducible(&result, rules);
    if exhausted {
        debug!(
            target: "mettacore::eval::reduce",
            max_steps,
            %result,
            "step bound reached"
        );
    } else {
        debug!(
            target: "mettacore::eval::reduce",
            steps = max_steps - budget,
            changed,
            "reduction finished"
        );
    }
    (result, exhausted)
}

fn is_opaque(atom: &Atom) -> bool {
    atom.head_symbol()
        .is_some_and(|head| OPAQUE_FORMS.contains(&head))
}

/// Whether some rule would still rewrite `atom` or one of its reachable children
fn is_reducible(atom: &Atom, rules: &[Rule]) -> bool {
    if rules.iter().any(|rule| rule.apply(atom).is_some()) {
        return true;
    }
    match atom {
        Atom::Expression(items) if !is_opaque(atom) => {
            items.iter().any(|child| is_reducible(child, rules))
        }
        _ => false,
    }
}

/// Returns the reduced atom and whether any rewrite happened
fn reduce_with_budget(mut atom: Atom, rules: &[Rule], budget: &mut usize) -> (Atom, bool) {
    let mut changed_any = false;

    while *budget > 0 {
        if let Some(next) = rules.iter().find_map(|rule| rule.apply(&atom)) {
            *budget -= 1;
            atom = next;
            changed_any = true;
            continue;
        }

        if is_opaque(&atom) {
            break;
        }

        match atom {
            Atom::Expression(items) => {
                let mut changed = false;
                let mut reduced = Vec::with_capacity(items.len());
                for child in items {
                    let (child, child_changed) = reduce_with_budget(child, rules, budget);
                    changed |= child_changed;
                    reduced.push(child);
                }
                atom = Atom::Expression(reduced);
                if !changed {
                    break;
                }
                changed_any = true;
            }
            _ => break,
        }
    }

    (atom, changed_any)
}
