//! Shared helpers for integration tests

#![allow(dead_code)]

use mettacore::{Atom, Grounded, Interpreter};

/// Run a program on a fresh interpreter and return the results of its last form
pub fn run_last(src: &str) -> Vec<Atom> {
    let mut metta = Interpreter::new();
    run_last_in(&mut metta, src)
}

/// Run a program and return the results of its last form only
pub fn run_last_in(metta: &mut Interpreter, src: &str) -> Vec<Atom> {
    let atoms = mettacore::parse(src).expect("program parses");
    let mut last = Vec::new();
    for atom in &atoms {
        last = metta.interpret(atom);
    }
    last
}

/// Numeric value of a grounded number, regardless of int/float representation
pub fn number(atom: &Atom) -> Option<f64> {
    match atom {
        Atom::Grounded(g) => g.as_f64(),
        _ => None,
    }
}

pub fn float(atom: &Atom) -> f64 {
    match atom {
        Atom::Grounded(Grounded::Float(x)) => *x,
        other => panic!("expected a float, got {}", other),
    }
}

pub fn sym(name: &str) -> Atom {
    Atom::sym(name)
}
