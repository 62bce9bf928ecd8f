// Compile function: MeTTa text → Atoms
//
// Parsing happens in two passes: the lexer/parser in `sexpr` produce generic
// s-expressions, which are then converted into the atom model here.

use tracing::trace;

use crate::backend::models::Atom;
use crate::sexpr::{Lexer, ParseError, Parser, SExpr};

/// Parse MeTTa source code into a sequence of top-level atoms
pub fn parse(src: &str) -> Result<Vec<Atom>, ParseError> {
    let mut lexer = Lexer::new(src);
    let tokens = lexer.tokenize()?;

    let mut parser = Parser::new(tokens);
    let sexprs = parser.parse()?;
    trace!(target: "mettacore::compile", forms = sexprs.len(), "parsed source");

    Ok(sexprs.iter().map(sexpr_to_atom).collect())
}

/// Convert an SExpr to an Atom
pub fn sexpr_to_atom(sexpr: &SExpr) -> Atom {
    match sexpr {
        SExpr::Symbol(s) if s == "Empty" => Atom::Empty,
        SExpr::Symbol(s) => Atom::Symbol(s.clone()),
        SExpr::Variable(name) => Atom::var(name.clone()),
        SExpr::String(s) => Atom::string(s.clone()),
        SExpr::Integer(n) => Atom::int(*n),
        SExpr::Float(x) => Atom::float(*x),
        SExpr::List(items) => Atom::Expression(items.iter().map(sexpr_to_atom).collect()),
    }
}
