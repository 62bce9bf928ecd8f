//! Space - an atom collection plus a priority-ordered rule set.
//!
//! The only mutable state of the evaluator. Atoms have set semantics and keep
//! their insertion order, which is the iteration order seen by queries.

use tracing::debug;

use crate::backend::eval::{match_all, match_atom};
use crate::backend::models::{Atom, Bindings, Rule};

#[derive(Debug, Clone, Default)]
pub struct Space {
    name: String,
    atoms: Vec<Atom>,
    /// Sorted by descending priority; ties keep insertion order
    rules: Vec<Rule>,
    next_rule_id: u64,
}

impl Space {
    pub fn new(name: impl Into<String>) -> Self {
        Space {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert an atom. Returns `false` when an equal atom is already present.
    pub fn add(&mut self, atom: Atom) -> bool {
        if self.contains(&atom) {
            return false;
        }
        debug!(target: "mettacore::space", space = %self.name, %atom, "add atom");
        self.atoms.push(atom);
        true
    }

    /// Remove an atom. Returns `false` when it was not present.
    pub fn remove(&mut self, atom: &Atom) -> bool {
        match self.atoms.iter().position(|a| a == atom) {
            Some(pos) => {
                debug!(target: "mettacore::space", space = %self.name, %atom, "remove atom");
                self.atoms.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.contains(atom)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Install a rule, keeping the list ordered by descending priority
    pub fn add_rule(&mut self, rule: Rule) {
        debug!(
            target: "mettacore::space",
            space = %self.name,
            rule = %rule.name,
            priority = rule.priority,
            "add rule"
        );
        self.rules.push(rule);
        // Stable sort: equal priorities stay in insertion order
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Build and install a rule
    pub fn define(&mut self, name: impl Into<String>, pattern: Atom, template: Atom, priority: i32) {
        self.add_rule(Rule::new(name, pattern, template).with_priority(priority));
    }

    /// Install a rule under a generated name (`rule-N`) and return that name
    pub fn define_anonymous(&mut self, pattern: Atom, template: Atom) -> String {
        self.next_rule_id += 1;
        let name = format!("rule-{}", self.next_rule_id);
        self.define(name.clone(), pattern, template, 0);
        name
    }

    /// Remove every rule with the given name. Returns `true` if any was removed.
    pub fn remove_rule(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name != name);
        before != self.rules.len()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Bindings of every atom matching `pattern`, in iteration order
    pub fn query(&self, pattern: &Atom) -> Vec<Bindings> {
        match_all(&self.atoms, pattern)
    }

    /// The atoms (not bindings) matching `pattern`
    pub fn query_atoms(&self, pattern: &Atom) -> Vec<Atom> {
        self.atoms
            .iter()
            .filter(|atom| match_atom(atom, pattern).is_some())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::compile::parse;

    fn atom(src: &str) -> Atom {
        parse(src).unwrap().remove(0)
    }

    #[test]
    fn test_add_has_set_semantics() {
        let mut space = Space::new("self");
        assert!(space.add(atom("(Person Alice)")));
        assert!(!space.add(atom("(Person Alice)")));
        assert_eq!(space.len(), 1);
        assert!(space.contains(&atom("(Person Alice)")));
    }

    #[test]
    fn test_remove() {
        let mut space = Space::new("self");
        space.add(atom("a"));
        space.add(atom("b"));
        assert!(space.remove(&atom("a")));
        assert!(!space.remove(&atom("a")));
        assert_eq!(space.atoms(), &[atom("b")]);
    }

    #[test]
    fn test_query_in_insertion_order() {
        let mut space = Space::new("self");
        for src in ["(Person Alice)", "(Pet Rex)", "(Person Bob)"] {
            space.add(atom(src));
        }
        let names: Vec<_> = space
            .query(&atom("(Person $name)"))
            .iter()
            .filter_map(|b| b.get("name").cloned())
            .collect();
        assert_eq!(names, vec![atom("Alice"), atom("Bob")]);
        assert_eq!(
            space.query_atoms(&atom("(Pet $p)")),
            vec![atom("(Pet Rex)")]
        );
        assert!(space.query(&atom("(Car $c)")).is_empty());
    }

    #[test]
    fn test_rules_sorted_by_priority_then_insertion() {
        let mut space = Space::new("self");
        space.define("low", atom("(f $x)"), atom("low"), -1);
        space.define("first", atom("(f $x)"), atom("first"), 0);
        space.define("high", atom("(f $x)"), atom("high"), 5);
        space.define("second", atom("(f $x)"), atom("second"), 0);

        let names: Vec<_> = space.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["high", "first", "second", "low"]);
    }

    #[test]
    fn test_anonymous_rules_and_removal() {
        let mut space = Space::new("self");
        let a = space.define_anonymous(atom("(f)"), atom("1"));
        let b = space.define_anonymous(atom("(g)"), atom("2"));
        assert_ne!(a, b);
        assert!(space.remove_rule(&a));
        assert!(!space.remove_rule(&a));
        assert_eq!(space.rules().len(), 1);
    }
}
