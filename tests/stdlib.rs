//! The prelude loaded by `load_stdlib`

mod common;

use common::{run_last_in, sym};
use mettacore::{parse, Atom, Interpreter, InterpreterConfig};

fn atom(src: &str) -> Atom {
    parse(src).expect("atom parses").remove(0)
}

fn with_stdlib() -> Interpreter {
    let mut metta = Interpreter::new();
    metta.load_stdlib();
    metta
}

#[test]
fn test_loading_is_idempotent() {
    let mut metta = with_stdlib();
    let rules = metta.space().rules().len();
    assert!(rules > 0);
    assert!(metta.stdlib_loaded());

    metta.load_stdlib();
    assert_eq!(metta.space().rules().len(), rules);
}

#[test]
fn test_config_can_load_the_prelude() {
    let config = InterpreterConfig {
        load_stdlib: true,
        ..InterpreterConfig::default()
    };
    let metta = Interpreter::with_config(config);
    assert!(metta.stdlib_loaded());
    assert!(!Interpreter::new().stdlib_loaded());
}

#[test]
fn test_each_space_loads_its_own_prelude() {
    let mut metta = with_stdlib();
    let rules = metta.space().rules().len();

    metta.use_space("kb");
    assert!(!metta.stdlib_loaded());
    assert_eq!(run_last_in(&mut metta, "(id hello)"), vec![Atom::expr(vec![sym("id"), sym("hello")])]);

    metta.load_stdlib();
    assert!(metta.stdlib_loaded());
    assert_eq!(metta.space().rules().len(), rules);
    assert_eq!(run_last_in(&mut metta, "(id hello)"), vec![sym("hello")]);

    metta.use_space("self");
    assert!(metta.stdlib_loaded());
}

#[test]
fn test_identity_and_composition() {
    let mut metta = with_stdlib();
    assert_eq!(run_last_in(&mut metta, "(id hello)"), vec![sym("hello")]);

    metta.run("(= (inc $x) (+ $x 1))").unwrap();
    assert_eq!(
        run_last_in(&mut metta, "(compose inc inc 1)"),
        vec![Atom::float(3.0)]
    );
}

#[test]
fn test_list_helpers() {
    let mut metta = with_stdlib();
    assert_eq!(
        run_last_in(&mut metta, "(cons 1 (cons 2 Nil))"),
        vec![atom("(Cons 1 (Cons 2 Nil))")]
    );
    assert_eq!(run_last_in(&mut metta, "(head (cons a Nil))"), vec![sym("a")]);
    assert_eq!(
        run_last_in(&mut metta, "(tail (cons a (cons b Nil)))"),
        vec![atom("(Cons b Nil)")]
    );
    assert_eq!(run_last_in(&mut metta, "(nil? Nil)"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(nil? (cons a Nil))"), vec![sym("False")]);
}

#[test]
fn test_reflexive_equality() {
    let mut metta = with_stdlib();
    assert_eq!(run_last_in(&mut metta, "(eq a a)"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(eq (f 1) (f 1))"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(eq a b)"), vec![sym("False")]);
}

#[test]
fn test_negation() {
    let mut metta = with_stdlib();
    assert_eq!(run_last_in(&mut metta, "(not True)"), vec![sym("False")]);
    assert_eq!(run_last_in(&mut metta, "(not False)"), vec![sym("True")]);
}

#[test]
fn test_type_predicates() {
    let mut metta = with_stdlib();
    assert_eq!(run_last_in(&mut metta, "(is-number 42)"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(is-number foo)"), vec![sym("False")]);
    assert_eq!(run_last_in(&mut metta, r#"(is-string "hi")"#), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(is-bool True)"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(is-symbol foo)"), vec![sym("True")]);
    assert_eq!(run_last_in(&mut metta, "(is-expression (quote (a b)))"), vec![sym("True")]);
}
