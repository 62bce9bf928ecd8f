//! Variable bindings produced by one match or unify attempt.
//!
//! A hybrid structure that adapts to the number of bindings:
//! - Empty: no allocation for ground matches
//! - Single: inline storage for the very common one-variable pattern
//! - Small: SmallVec for 2-8 bindings, spilling to the heap beyond that
//!
//! Variable names are stored without the leading `$`; lookups accept either form.

use super::Atom;
use smallvec::SmallVec;

/// A substitution from variable names to atoms
#[derive(Debug, Clone)]
pub enum Bindings {
    /// No bindings
    Empty,
    /// Single binding
    Single((String, Atom)),
    /// Two or more bindings
    Small(Box<SmallVec<[(String, Atom); 8]>>),
}

fn normalize(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

impl Bindings {
    #[inline]
    pub fn new() -> Self {
        Bindings::Empty
    }

    /// Get the atom bound to a variable
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Atom> {
        let name = normalize(name);
        match self {
            Bindings::Empty => None,
            Bindings::Single((n, v)) => {
                if n == name {
                    Some(v)
                } else {
                    None
                }
            }
            Bindings::Small(vec) => vec.iter().find(|(n, _)| n == name).map(|(_, v)| v),
        }
    }

    /// Bind a variable, checking consistency.
    ///
    /// Returns `false` (and leaves the bindings untouched) when the variable is
    /// already bound to a different atom. Rebinding to an equal atom succeeds.
    pub fn bind(&mut self, name: &str, value: Atom) -> bool {
        let name = normalize(name);
        match self.get(name) {
            Some(existing) => *existing == value,
            None => {
                self.insert(name.to_string(), value);
                true
            }
        }
    }

    /// Unchecked insert.
    ///
    /// Transitions:
    /// - Empty → Single
    /// - Single → Small (with 2 elements)
    /// - Small → Small (push)
    #[inline]
    fn insert(&mut self, name: String, value: Atom) {
        match self {
            Bindings::Empty => {
                *self = Bindings::Single((name, value));
            }
            Bindings::Single(existing) => {
                let mut vec = SmallVec::new();
                vec.push(existing.clone());
                vec.push((name, value));
                *self = Bindings::Small(Box::new(vec));
            }
            Bindings::Small(vec) => {
                vec.push((name, value));
            }
        }
    }

    /// Merge two bindings. Fails when they disagree on a shared variable.
    pub fn merge(&self, other: &Bindings) -> Option<Bindings> {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            if !merged.bind(name, value.clone()) {
                return None;
            }
        }
        Some(merged)
    }

    /// Substitute every bound variable inside `atom` in a single pass.
    ///
    /// Bound values are inserted as-is: variables inside them are not
    /// substituted again, so data captured by a match is never rewritten.
    pub fn apply(&self, atom: &Atom) -> Atom {
        if self.is_empty() {
            return atom.clone();
        }
        match atom {
            Atom::Variable { name, .. } => match self.get(name) {
                Some(value) => value.clone(),
                None => atom.clone(),
            },
            Atom::Expression(items) => {
                Atom::Expression(items.iter().map(|a| self.apply(a)).collect())
            }
            Atom::Error {
                message,
                source: Some(src),
            } => Atom::error_at(message.clone(), self.apply(src)),
            _ => atom.clone(),
        }
    }

    /// Substitute bound variables, following variables bound to other variables.
    ///
    /// Chains are cut after `len()` hops so cyclic bindings cannot recurse forever.
    pub fn resolve(&self, atom: &Atom) -> Atom {
        if self.is_empty() {
            return atom.clone();
        }
        self.resolve_chain(atom, 0)
    }

    fn resolve_chain(&self, atom: &Atom, hops: usize) -> Atom {
        match atom {
            Atom::Variable { name, .. } => match self.get(name) {
                Some(value) if hops <= self.len() && value != atom => {
                    self.resolve_chain(value, hops + 1)
                }
                _ => atom.clone(),
            },
            Atom::Expression(items) => {
                Atom::Expression(items.iter().map(|a| self.resolve_chain(a, hops)).collect())
            }
            Atom::Error {
                message,
                source: Some(src),
            } => Atom::error_at(message.clone(), self.resolve_chain(src, hops)),
            _ => atom.clone(),
        }
    }

    /// Copy of these bindings with every value fully resolved
    pub fn resolved(&self) -> Bindings {
        let mut out = Bindings::new();
        for (name, value) in self.iter() {
            out.insert(name.to_string(), self.resolve(value));
        }
        out
    }

    /// Iterate over all bindings in insertion order
    pub fn iter(&self) -> BindingsIter<'_> {
        BindingsIter {
            bindings: self,
            index: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Bindings::Empty => 0,
            Bindings::Single(_) => 1,
            Bindings::Small(vec) => vec.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Bindings::Empty)
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality ignores insertion order
impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl std::fmt::Display for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "${}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

pub struct BindingsIter<'a> {
    bindings: &'a Bindings,
    index: usize,
}

impl<'a> Iterator for BindingsIter<'a> {
    type Item = (&'a str, &'a Atom);

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.bindings {
            Bindings::Empty => None,
            Bindings::Single((n, v)) => (self.index == 0).then_some((n.as_str(), v)),
            Bindings::Small(vec) => vec.get(self.index).map(|(n, v)| (n.as_str(), v)),
        };
        if item.is_some() {
            self.index += 1;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bindings() {
        let bindings = Bindings::new();
        assert!(bindings.is_empty());
        assert_eq!(bindings.len(), 0);
        assert_eq!(bindings.get("$x"), None);
    }

    #[test]
    fn test_single_binding() {
        let mut bindings = Bindings::new();
        assert!(bindings.bind("x", Atom::int(42)));

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("x"), Some(&Atom::int(42)));
        assert_eq!(bindings.get("$x"), Some(&Atom::int(42)));
        assert_eq!(bindings.get("y"), None);
        assert!(matches!(bindings, Bindings::Single(_)));
    }

    #[test]
    fn test_transition_to_small() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Atom::int(42));
        bindings.bind("y", Atom::int(43));

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("y"), Some(&Atom::int(43)));
        assert!(matches!(bindings, Bindings::Small(_)));
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = Bindings::new();
        assert!(bindings.bind("x", Atom::sym("a")));
        assert!(bindings.bind("x", Atom::sym("a")));
        assert!(!bindings.bind("x", Atom::sym("b")));
        assert_eq!(bindings.get("x"), Some(&Atom::sym("a")));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_merge() {
        let mut a = Bindings::new();
        a.bind("x", Atom::int(1));
        let mut b = Bindings::new();
        b.bind("y", Atom::int(2));
        b.bind("x", Atom::int(1));

        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.len(), 2);

        let mut c = Bindings::new();
        c.bind("x", Atom::int(3));
        assert!(a.merge(&c).is_none());
    }

    #[test]
    fn test_apply_is_single_pass() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Atom::var("y"));
        bindings.bind("y", Atom::sym("z"));

        let template = Atom::expr(vec![Atom::sym("f"), Atom::var("x"), Atom::var("w")]);
        assert_eq!(
            bindings.apply(&template),
            Atom::expr(vec![Atom::sym("f"), Atom::var("y"), Atom::var("w")])
        );
    }

    #[test]
    fn test_resolve_follows_chains() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Atom::var("y"));
        bindings.bind("y", Atom::sym("z"));

        let template = Atom::expr(vec![Atom::sym("f"), Atom::var("x")]);
        assert_eq!(
            bindings.resolve(&template),
            Atom::expr(vec![Atom::sym("f"), Atom::sym("z")])
        );
        assert_eq!(bindings.resolved().get("x"), Some(&Atom::sym("z")));
    }

    #[test]
    fn test_resolve_terminates_on_cycles() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Atom::var("y"));
        bindings.bind("y", Atom::var("x"));
        assert!(bindings.resolve(&Atom::var("x")).is_variable());
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = Bindings::new();
        a.bind("x", Atom::int(1));
        a.bind("y", Atom::int(2));
        let mut b = Bindings::new();
        b.bind("y", Atom::int(2));
        b.bind("x", Atom::int(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_iterator() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Atom::int(1));
        bindings.bind("y", Atom::int(2));
        bindings.bind("z", Atom::int(3));

        let names: Vec<_> = bindings.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(Bindings::new().iter().count(), 0);
    }
}
