//! Pattern matching and unification through the public API

use mettacore::backend::match_all;
use mettacore::{match_atom, parse, unify, Atom, Bindings};

fn atom(src: &str) -> Atom {
    parse(src).expect("atom parses").remove(0)
}

#[test]
fn test_matching_an_atom_against_itself_binds_nothing() {
    for src in ["foo", "42", "\"s\"", "(a (b c) 1.5)", "$x", "(f $x $y)", "()", "Empty"] {
        let a = atom(src);
        let bindings = match_atom(&a, &a).unwrap_or_else(|| panic!("{} should match itself", src));
        assert!(bindings.is_empty(), "{} produced {}", src, bindings);
    }
}

#[test]
fn test_variable_pattern_binds_the_whole_atom() {
    for src in ["foo", "7", "(deep (nested (list)))"] {
        let a = atom(src);
        let bindings = match_atom(&a, &Atom::var("v")).expect("a variable matches anything");
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("v"), Some(&a));
        assert_eq!(bindings.get("$v"), Some(&a));
    }
}

#[test]
fn test_repeated_variable_requires_equal_parts() {
    let pattern = atom("(pair $x $x)");
    assert!(match_atom(&atom("(pair 1 1)"), &pattern).is_some());
    assert!(match_atom(&atom("(pair 1 2)"), &pattern).is_none());
}

#[test]
fn test_matching_is_one_directional() {
    // The data side's variable is compared literally
    assert!(match_atom(&atom("(f $y)"), &atom("(f 1)")).is_none());
    assert!(match_atom(&atom("(f 1)"), &atom("(f $y)")).is_some());
}

#[test]
fn test_arity_and_head_must_agree() {
    assert!(match_atom(&atom("(f 1 2)"), &atom("(f $x)")).is_none());
    assert!(match_atom(&atom("(g 1)"), &atom("(f $x)")).is_none());
    assert!(match_atom(&atom("1"), &atom("1.0")).is_none());
}

#[test]
fn test_match_all_keeps_iteration_order() {
    let facts = vec![atom("(edge a b)"), atom("(node a)"), atom("(edge b c)")];
    let found: Vec<Atom> = match_all(&facts, &atom("(edge $from $to)"))
        .iter()
        .filter_map(|b| b.get("to").cloned())
        .collect();
    assert_eq!(found, vec![atom("b"), atom("c")]);
}

#[test]
fn test_unify_is_symmetric() {
    let pairs = [
        ("(f $x b)", "(f a $y)"),
        ("(g $x $x)", "(g (h $y) (h c))"),
        ("$z", "(k 1 2)"),
        ("(p 1)", "(p 1)"),
    ];
    for (l, r) in pairs {
        let (left, right) = (atom(l), atom(r));
        let forward = unify(&left, &right).unwrap_or_else(|| panic!("{} ~ {}", l, r));
        let backward = unify(&right, &left).unwrap_or_else(|| panic!("{} ~ {}", r, l));
        assert_eq!(forward.apply(&left), forward.apply(&right));
        assert_eq!(backward.apply(&left), backward.apply(&right));
        assert_eq!(forward.apply(&left), backward.apply(&left));
    }
}

#[test]
fn test_unify_failures_are_symmetric() {
    let pairs = [("(f a)", "(f b)"), ("(f $x $x)", "(f a b)"), ("$x", "(s $x)")];
    for (l, r) in pairs {
        let (left, right) = (atom(l), atom(r));
        assert!(unify(&left, &right).is_none(), "{} ~ {}", l, r);
        assert!(unify(&right, &left).is_none(), "{} ~ {}", r, l);
    }
}

#[test]
fn test_unify_resolves_variable_chains() {
    let bindings = unify(&atom("(f $x $y)"), &atom("(f $y 3)")).expect("unifiable");
    assert_eq!(bindings.get("x"), Some(&Atom::int(3)));
    assert_eq!(bindings.get("y"), Some(&Atom::int(3)));
}

#[test]
fn test_bindings_merge() {
    let a = match_atom(&atom("(f 1)"), &atom("(f $x)")).unwrap();
    let b = match_atom(&atom("(g 2)"), &atom("(g $y)")).unwrap();
    let merged = a.merge(&b).expect("disjoint bindings merge");
    assert_eq!(merged.len(), 2);

    let clash = match_atom(&atom("(f 9)"), &atom("(f $x)")).unwrap();
    assert!(a.merge(&clash).is_none());
    assert_eq!(a.merge(&Bindings::new()), Some(a.clone()));
}
