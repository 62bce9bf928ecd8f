//! Rewrite rules: `(pattern, template)` pairs with an optional guard and priority.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{Atom, Bindings};
use crate::backend::eval::match_atom;

/// Predicate over the bindings of a successful match
pub type Guard = Arc<dyn Fn(&Bindings) -> bool + Send + Sync>;

/// A rewrite rule.
/// Uses Arc for the pattern and template so rule lists clone cheaply.
#[derive(Clone)]
pub struct Rule {
    pub name: String,
    pub pattern: Arc<Atom>,
    pub template: Arc<Atom>,
    pub guard: Option<Guard>,
    pub priority: i32,
}

impl Rule {
    /// Create an unguarded rule with priority 0
    pub fn new(name: impl Into<String>, pattern: Atom, template: Atom) -> Self {
        Rule {
            name: name.into(),
            pattern: Arc::new(pattern),
            template: Arc::new(template),
            guard: None,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&Bindings) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Rewrite `atom` with this rule.
    ///
    /// Returns the template with the match bindings applied, or `None` when the
    /// pattern does not match or the guard rejects the bindings.
    pub fn apply(&self, atom: &Atom) -> Option<Atom> {
        let bindings = match_atom(atom, &self.pattern)?;
        if let Some(guard) = &self.guard {
            if !guard(&bindings) {
                trace!(target: "mettacore::rule::apply", rule = %self.name, "guard rejected");
                return None;
            }
        }
        trace!(target: "mettacore::rule::apply", rule = %self.name, %atom, "rule applied");
        Some(bindings.apply(&self.template))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("template", &self.template)
            .field("guarded", &self.guard.is_some())
            .field("priority", &self.priority)
            .finish()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(= {} {})", self.pattern, self.template)
    }
}
