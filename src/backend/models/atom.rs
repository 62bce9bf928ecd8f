//! The atom data model.
//!
//! Every value the rewriting language manipulates is an [`Atom`]. Atoms are
//! immutable once built: evaluation, matching and reduction always produce
//! new atoms instead of editing existing ones.

use std::fmt;

/// Host-level primitive wrapped as an atom
#[derive(Debug, Clone, PartialEq)]
pub enum Grounded {
    /// A 64-bit integer literal
    Int(i64),
    /// A floating point literal
    Float(f64),
    /// A string literal
    Str(String),
    /// A boolean (only reachable programmatically; `True`/`False` parse as symbols)
    Bool(bool),
}

impl Grounded {
    /// The value type tag of this primitive
    pub fn type_name(&self) -> &'static str {
        match self {
            Grounded::Int(_) | Grounded::Float(_) => "Number",
            Grounded::Str(_) => "String",
            Grounded::Bool(_) => "Bool",
        }
    }

    /// Numeric view of this primitive, coerced to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Grounded::Int(n) => Some(*n as f64),
            Grounded::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Grounded::Int(_) | Grounded::Float(_))
    }
}

impl fmt::Display for Grounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grounded::Int(n) => write!(f, "{}", n),
            // Debug formatting keeps the trailing ".0" on whole floats
            Grounded::Float(x) => write!(f, "{:?}", x),
            Grounded::Str(s) => write!(f, "\"{}\"", escape_string(s)),
            Grounded::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A value of the rewriting language
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// An opaque identifier; equality is name equality
    Symbol(String),
    /// A pattern placeholder, written `$name` (the name is stored without `$`).
    /// The type constraint is carried along but never enforced.
    Variable {
        name: String,
        type_constraint: Option<Box<Atom>>,
    },
    /// A wrapped host primitive
    Grounded(Grounded),
    /// A compound term with fixed arity
    Expression(Vec<Atom>),
    /// The canonical "no value" result
    Empty,
    /// A first-class failure value
    Error {
        message: String,
        source: Option<Box<Atom>>,
    },
}

impl Atom {
    pub fn sym(name: impl Into<String>) -> Self {
        Atom::Symbol(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Atom::Variable {
            name: name.into(),
            type_constraint: None,
        }
    }

    pub fn typed_var(name: impl Into<String>, ty: Atom) -> Self {
        Atom::Variable {
            name: name.into(),
            type_constraint: Some(Box::new(ty)),
        }
    }

    pub fn int(n: i64) -> Self {
        Atom::Grounded(Grounded::Int(n))
    }

    pub fn float(x: f64) -> Self {
        Atom::Grounded(Grounded::Float(x))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Atom::Grounded(Grounded::Str(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Atom::Grounded(Grounded::Bool(b))
    }

    pub fn expr(children: Vec<Atom>) -> Self {
        Atom::Expression(children)
    }

    /// Error atom without an offending sub-atom
    pub fn error(message: impl Into<String>) -> Self {
        Atom::Error {
            message: message.into(),
            source: None,
        }
    }

    /// Error atom pointing at the atom that caused it
    pub fn error_at(message: impl Into<String>, source: Atom) -> Self {
        Atom::Error {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The `True` / `False` symbols used for comparison and logical results
    pub fn truth(b: bool) -> Self {
        Atom::Symbol(if b { "True" } else { "False" }.to_string())
    }

    /// Name of the head symbol when this is an expression headed by a symbol
    pub fn head_symbol(&self) -> Option<&str> {
        match self {
            Atom::Expression(items) => match items.first() {
                Some(Atom::Symbol(name)) => Some(name.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Atom]> {
        match self {
            Atom::Expression(items) => Some(items),
            _ => None,
        }
    }

    /// Number of children for expressions, zero for every other atom
    pub fn arity(&self) -> usize {
        self.children().map_or(0, |c| c.len())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Atom::Error { .. })
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Atom::Variable { .. })
    }

    /// Whether the named variable occurs anywhere inside this atom
    pub fn contains_variable(&self, var: &str) -> bool {
        match self {
            Atom::Variable { name, .. } => name == var,
            Atom::Expression(items) => items.iter().any(|a| a.contains_variable(var)),
            _ => false,
        }
    }

    /// Whether this atom contains no variables at all
    pub fn is_ground(&self) -> bool {
        match self {
            Atom::Variable { .. } => false,
            Atom::Expression(items) => items.iter().all(Atom::is_ground),
            _ => true,
        }
    }

    /// Truthiness used by `if`, `and`, `or` and `not`.
    ///
    /// Symbols are truthy unless named `False` or `Nil`; numbers are truthy
    /// when nonzero, strings when non-empty; `Empty` and errors never are.
    pub fn is_truthy(&self) -> bool {
        match self {
            Atom::Symbol(name) => name != "False" && name != "Nil",
            Atom::Grounded(Grounded::Bool(b)) => *b,
            Atom::Grounded(Grounded::Int(n)) => *n != 0,
            Atom::Grounded(Grounded::Float(x)) => *x != 0.0,
            Atom::Grounded(Grounded::Str(s)) => !s.is_empty(),
            Atom::Empty | Atom::Error { .. } => false,
            Atom::Variable { .. } | Atom::Expression(_) => true,
        }
    }
}

impl From<Grounded> for Atom {
    fn from(g: Grounded) -> Self {
        Atom::Grounded(g)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => write!(f, "{}", name),
            Atom::Variable { name, .. } => write!(f, "${}", name),
            Atom::Grounded(g) => write!(f, "{}", g),
            Atom::Expression(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Atom::Empty => write!(f, "Empty"),
            Atom::Error { message, source } => match source {
                Some(src) => write!(f, "(Error \"{}\" {})", escape_string(message), src),
                None => write!(f, "(Error \"{}\")", escape_string(message)),
            },
        }
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
