//! The evaluator.
//!
//! `interpret` is the single entry point: it dispatches expressions headed by
//! a special-form symbol to the matching handler, sends grounded operators
//! through the registry, and hands everything else to `reduce` against the
//! current space's rules. Every path returns a list of results because
//! evaluation is non-deterministic.

#[macro_use]
mod macros;

mod control_flow;
mod errors;
mod let_forms;
mod nondeterminism;
mod pattern;
mod quoting;
mod reduce;
mod space_ops;
mod types;
mod unify;


use itertools::Itertools;
use tracing::{debug, trace};

use crate::backend::environment::Environment;
use crate::backend::models::Atom;

pub use pattern::{match_all, match_atom, match_with};
pub use reduce::reduce;
pub use types::type_of;
pub use unify::{unify, unify_with};

/// Evaluate an atom and return every result it produces.
///
/// An empty list means evaluation produced no value at all; `[Empty]` is the
/// explicit "nothing" produced by forms such as `match` with no solutions.
pub fn interpret(atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    if !env.enter() {
        debug!(target: "mettacore::eval", depth = env.max_depth, "evaluation depth limit reached");
        return vec![Atom::error_at(
            format!("Maximum evaluation depth {} exceeded", env.max_depth),
            atom.clone(),
        )];
    }
    let results = interpret_inner(atom, env);
    env.leave();
    results
}

fn interpret_inner(atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    trace!(target: "mettacore::eval", %atom, "interpret");
    match atom {
        Atom::Variable { name, .. } => resolve_variable(atom, name, env),
        Atom::Expression(items) => match items.first() {
            Some(Atom::Symbol(head)) => eval_symbol_headed(head, items, atom, env),
            Some(_) => eval_computed_head(items, atom, env),
            None => reduce_and_continue(atom, env),
        },
        _ => reduce_and_continue(atom, env),
    }
}

fn eval_symbol_headed(head: &str, items: &[Atom], atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    match head {
        "match" => space_ops::eval_match(items, env),
        "=" => space_ops::eval_define(items, env),
        "add-atom" => space_ops::eval_add_atom(items, env),
        "remove-atom" => space_ops::eval_remove_atom(items, env),
        "get-atoms" => space_ops::eval_get_atoms(items, env),
        "new-space" => space_ops::eval_new_space(items, env),
        "rule-count" => space_ops::eval_rule_count(items, env),
        "let" => let_forms::eval_let(items, env),
        "let*" => let_forms::eval_let_star(items, env),
        "if" => control_flow::eval_if(items, env),
        "case" => control_flow::eval_case(items, env),
        "quote" => quoting::eval_quote(items),
        "unquote" => quoting::eval_unquote(items, env),
        "collapse" => nondeterminism::eval_collapse(items, env),
        "superpose" => nondeterminism::eval_superpose(items, env),
        "error" => errors::eval_error(items),
        "is-error" => errors::eval_is_error(items, env),
        "catch" => errors::eval_catch(items, env),
        "get-type" => types::eval_get_type(items, env),
        ":" => types::eval_annotation(items, env),
        op if env.grounded().contains(op) => eval_grounded(op, items, atom, env),
        _ => reduce_and_continue(atom, env),
    }
}

/// Apply a grounded operator to the cartesian product of its argument values
fn eval_grounded(name: &str, items: &[Atom], atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    let op = match env.grounded().get(name) {
        Some(op) => op,
        None => return reduce_and_continue(atom, env),
    };

    let args = &items[1..];
    if !op.arity().accepts(args.len()) {
        return vec![Atom::error_at(
            format!("{} requires {}, got {}", name, op.arity(), args.len()),
            atom.clone(),
        )];
    }

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        let values = interpret(arg, env);
        if values.is_empty() {
            return Vec::new();
        }
        arg_values.push(values);
    }

    // Error arguments are ordinary values here; each op decides what they mean
    let run = |combo: &[Atom]| match op.execute(combo) {
        Ok(result) => result,
        Err(e) => {
            trace!(target: "mettacore::eval::grounded", op = name, error = %e, "grounded operation failed");
            Atom::error_at(e.to_string(), atom.clone())
        }
    };

    if arg_values.is_empty() {
        return vec![run(&[])];
    }

    arg_values
        .into_iter()
        .map(|values| values.into_iter())
        .multi_cartesian_product()
        .map(|combo| run(&combo))
        .collect()
}

/// Evaluate a non-symbol head and re-interpret the expression with each result
fn eval_computed_head(items: &[Atom], atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    let head = &items[0];
    let mut results = Vec::new();
    for value in interpret(head, env) {
        if &value == head {
            results.extend(reduce_and_continue(atom, env));
        } else {
            let mut rebuilt = items.to_vec();
            rebuilt[0] = value;
            results.extend(interpret(&Atom::Expression(rebuilt), env));
        }
    }
    results
}

/// A bare variable evaluates to its binding in the first matching space atom
fn resolve_variable(atom: &Atom, name: &str, env: &Environment) -> Vec<Atom> {
    let value = env
        .space()
        .query(atom)
        .first()
        .and_then(|bindings| bindings.get(name).cloned());
    vec![value.unwrap_or_else(|| atom.clone())]
}

/// Reduce against the current space's rules; re-interpret when anything changed.
///
/// A reduction cut short by the step budget is returned as it stands, so a
/// rule that never terminates yields its partial result.
fn reduce_and_continue(atom: &Atom, env: &mut Environment) -> Vec<Atom> {
    let (reduced, exhausted) = reduce::reduce_bounded(atom, env.space().rules(), env.max_steps);
    if exhausted || &reduced == atom {
        vec![reduced]
    } else {
        trace!(target: "mettacore::eval", from = %atom, to = %reduced, "reduced");
        interpret(&reduced, env)
    }
}
