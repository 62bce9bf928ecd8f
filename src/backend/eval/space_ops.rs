use tracing::{debug, trace};

use crate::backend::environment::Environment;
use crate::backend::models::{Atom, Grounded};

use super::interpret;

/// Resolve a space argument to a registry name.
///
/// `&self` and `&name` are taken literally. Anything else is evaluated once
/// and the first result that is a space reference wins, so `(new-space kb)`
/// can be passed directly.
fn space_arg(arg: &Atom, env: &mut Environment) -> Result<String, Atom> {
    if let Some(name) = env.space_ref_name(arg) {
        return Ok(name);
    }
    interpret(arg, env)
        .iter()
        .find_map(|value| env.space_ref_name(value))
        .ok_or_else(|| Atom::error_at("expected a space reference such as &self", arg.clone()))
}

/// Query a space: (match space pattern template)
///
/// Every atom of the space matching `pattern` contributes the template with
/// the bindings substituted. The instantiated templates are not evaluated
/// further. No matches yields `Empty`.
pub(super) fn eval_match(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_three_args!("match", items);

    let name = match space_arg(&items[1], env) {
        Ok(name) => name,
        Err(err) => return vec![err],
    };
    let pattern = &items[2];
    let template = &items[3];

    let results: Vec<Atom> = env
        .space_named_mut(&name)
        .query(pattern)
        .iter()
        .map(|bindings| bindings.apply(template))
        .collect();
    trace!(target: "mettacore::eval::match", space = %name, %pattern, matches = results.len());

    if results.is_empty() {
        return vec![Atom::Empty];
    }
    results
}

/// Define a rule in the current space: (= pattern template)
pub(super) fn eval_define(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!("=", items);
    let rule_name = env
        .space_mut()
        .define_anonymous(items[1].clone(), items[2].clone());
    debug!(target: "mettacore::eval::define", rule = %rule_name, pattern = %items[1]);
    vec![Atom::Empty]
}

/// (add-atom space atom): the atom is stored as written, without evaluation
pub(super) fn eval_add_atom(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!("add-atom", items);
    match space_arg(&items[1], env) {
        Ok(name) => {
            env.space_named_mut(&name).add(items[2].clone());
            vec![Atom::Empty]
        }
        Err(err) => vec![err],
    }
}

/// (remove-atom space atom)
pub(super) fn eval_remove_atom(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_two_args!("remove-atom", items);
    match space_arg(&items[1], env) {
        Ok(name) => {
            env.space_named_mut(&name).remove(&items[2]);
            vec![Atom::Empty]
        }
        Err(err) => vec![err],
    }
}

/// (get-atoms space): all atoms of the space as one expression
pub(super) fn eval_get_atoms(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("get-atoms", items);
    match space_arg(&items[1], env) {
        Ok(name) => vec![Atom::Expression(env.space_named_mut(&name).atoms().to_vec())],
        Err(err) => vec![err],
    }
}

/// (new-space name): create or reuse a named space and return `&name`
pub(super) fn eval_new_space(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("new-space", items);
    let name = match &items[1] {
        Atom::Symbol(s) => s.strip_prefix('&').unwrap_or(s).to_string(),
        Atom::Grounded(Grounded::Str(s)) => s.clone(),
        other => {
            return vec![Atom::error_at(
                "new-space expects a symbol or string name",
                other.clone(),
            )]
        }
    };
    if name.is_empty() || name == "self" {
        return vec![Atom::error_at(
            "new-space needs a fresh space name",
            items[1].clone(),
        )];
    }
    env.space_named_mut(&name);
    vec![Atom::sym(format!("&{}", name))]
}

/// (rule-count space): number of rules in the space
pub(super) fn eval_rule_count(items: &[Atom], env: &mut Environment) -> Vec<Atom> {
    require_one_arg!("rule-count", items);
    match space_arg(&items[1], env) {
        Ok(name) => {
            let count = env.space_named_mut(&name).rules().len();
            vec![Atom::int(count as i64)]
        }
        Err(err) => vec![err],
    }
}
