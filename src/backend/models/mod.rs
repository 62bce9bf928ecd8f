pub mod atom;
pub mod bindings;
pub mod rule;

pub use atom::{Atom, Grounded};
pub use bindings::Bindings;
pub use rule::{Guard, Rule};
