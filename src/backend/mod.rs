// Backend module for MeTTa evaluation
//
// - `compile`: MeTTa text → Atoms
// - `eval`: matcher, unifier, reducer and the `interpret` dispatch
// - `interpreter`: text-level driver owning one `Environment`

pub mod compile;
pub mod environment;
pub mod eval;
pub mod grounded;
pub mod interpreter;
pub mod models;
pub mod space;
pub mod stdlib;

pub use compile::{parse, sexpr_to_atom};
pub use environment::Environment;
pub use eval::{interpret, match_all, match_atom, reduce, unify};
pub use grounded::{Arity, ExecError, GroundedOperation, GroundedRegistry, GroundedResult};
pub use interpreter::Interpreter;
pub use models::*;
pub use space::Space;
