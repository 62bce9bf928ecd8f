//! The interpreter driver.
//!
//! Owns one [`Environment`] and exposes the text-level API: parse a program,
//! run every top-level form through `interpret`, and collect the results.

use std::collections::HashSet;

use tracing::{debug, error, info};

use crate::backend::compile::parse;
use crate::backend::environment::Environment;
use crate::backend::eval::{interpret, reduce};
use crate::backend::models::{Atom, Bindings};
use crate::backend::space::Space;
use crate::backend::stdlib;
use crate::config::InterpreterConfig;
use crate::sexpr::ParseError;

#[derive(Debug, Clone)]
pub struct Interpreter {
    env: Environment,
    /// Spaces the prelude has been loaded into
    stdlib_spaces: HashSet<String>,
}

impl Interpreter {
    /// An interpreter with default limits and an empty `self` space
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let mut interpreter = Interpreter {
            env: Environment::from_config(&config),
            stdlib_spaces: HashSet::new(),
        };
        if config.load_stdlib {
            interpreter.load_stdlib();
        }
        interpreter
    }

    /// Parse `code` and interpret every top-level form in order.
    ///
    /// The results of all forms are concatenated. A parse error aborts the
    /// whole program before anything runs.
    pub fn run(&mut self, code: &str) -> Result<Vec<Atom>, ParseError> {
        let atoms = parse(code)?;
        let mut results = Vec::new();
        for atom in &atoms {
            results.extend(self.interpret(atom));
        }
        debug!(target: "mettacore::interpreter", forms = atoms.len(), results = results.len(), "run complete");
        Ok(results)
    }

    /// Run `code` and return only its first result
    pub fn eval(&mut self, code: &str) -> Result<Option<Atom>, ParseError> {
        Ok(self.run(code)?.into_iter().next())
    }

    /// Parse `code` and add every top-level form to the current space without evaluating it
    pub fn add(&mut self, code: &str) -> Result<(), ParseError> {
        let atoms = parse(code)?;
        let space = self.env.space_mut();
        for atom in atoms {
            space.add(atom);
        }
        Ok(())
    }

    /// Match a single pattern against the current space.
    ///
    /// Only the first top-level form of `pattern` is used; empty input
    /// matches nothing.
    pub fn query(&self, pattern: &str) -> Result<Vec<Bindings>, ParseError> {
        let atoms = parse(pattern)?;
        Ok(atoms
            .first()
            .map(|p| self.env.space().query(p))
            .unwrap_or_default())
    }

    /// Interpret one already parsed atom
    pub fn interpret(&mut self, atom: &Atom) -> Vec<Atom> {
        interpret(atom, &mut self.env)
    }

    /// Reduce an atom against the current space's rules without further evaluation
    pub fn reduce(&self, atom: &Atom, max_steps: usize) -> Atom {
        reduce(atom, self.env.space().rules(), max_steps)
    }

    /// Switch the current space, creating it when it does not exist yet
    pub fn use_space(&mut self, name: &str) -> &mut Space {
        self.env.use_space(name)
    }

    pub fn space(&self) -> &Space {
        self.env.space()
    }

    pub fn space_mut(&mut self) -> &mut Space {
        self.env.space_mut()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Load the prelude into the current space. Loading twice into the same
    /// space is a no-op; each named space gets its own copy.
    pub fn load_stdlib(&mut self) {
        if self.stdlib_loaded() {
            return;
        }
        match self.run(stdlib::PRELUDE) {
            Ok(_) => {
                stdlib::install_fallbacks(self.env.space_mut());
                let space = self.env.current_space_name().to_string();
                info!(target: "mettacore::stdlib", %space, rules = self.space().rules().len(), "prelude loaded");
                self.stdlib_spaces.insert(space);
            }
            // The prelude is a constant, so this only fires if it was edited into invalid syntax
            Err(e) => error!(target: "mettacore::stdlib", error = %e, "prelude failed to parse"),
        }
    }

    /// Whether the prelude is loaded into the current space
    pub fn stdlib_loaded(&self) -> bool {
        self.stdlib_spaces.contains(self.env.current_space_name())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
