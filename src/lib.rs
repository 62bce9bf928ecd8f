/// mettacore - a MeTTa hypergraph rewriting interpreter
///
/// MeTTa is a language with LISP-like syntax where programs are atoms stored
/// in spaces, rules rewrite atoms, and evaluation is non-deterministic: every
/// evaluation returns a list of results.
///
/// # Architecture
///
/// The evaluation pipeline consists of two main stages:
///
/// 1. **Lexical Analysis & S-expression Parsing** (`sexpr` module)
///    - Tokenizes input text into positioned tokens
///    - Parses tokens into S-expressions
///    - Handles `;` line comments and string escapes
///
/// 2. **Backend Evaluation** (`backend` module)
///    - Converts S-expressions into `Atom`s
///    - One-way pattern matching and two-way unification
///    - Rule reduction to a bounded normal form
///    - Special forms: `match`, `let`, `let*`, `if`, `case`, `quote`,
///      `unquote`, `collapse`, `superpose`, `=`, space operations
///    - Grounded arithmetic, comparison and logical operators
///
/// # Example
///
/// ```rust
/// use mettacore::{Atom, Interpreter};
///
/// let mut metta = Interpreter::new();
/// let results = metta
///     .run("(= (double $x) (* 2 $x)) (double 21)")
///     .unwrap();
/// assert_eq!(results, vec![Atom::Empty, Atom::float(42.0)]);
/// ```
///
/// # Evaluation Strategy
///
/// - **Non-determinism**: every form yields a list of results
/// - **Bounded reduction**: `reduce` stops after a configurable number of steps
/// - **Errors as values**: failures become `Error` atoms inside result lists
pub mod backend;
pub mod config;
pub mod repl;
pub mod sexpr;

pub use backend::{
    interpret, match_atom, parse, reduce, unify, Atom, Bindings, Environment, ExecError,
    Grounded, GroundedOperation, GroundedRegistry, Interpreter, Rule, Space,
};
pub use config::{ConfigError, InterpreterConfig};
pub use sexpr::{Lexer, ParseError, Parser, SExpr, Token};
