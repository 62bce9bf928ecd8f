//! Mutable evaluation state shared by one interpreter.
//!
//! Holds the registry of named spaces, the name of the current space, the
//! grounded operation registry and the reduction/recursion bounds.

use std::collections::BTreeMap;

use tracing::debug;

use crate::backend::grounded::GroundedRegistry;
use crate::backend::models::Atom;
use crate::backend::space::Space;
use crate::config::InterpreterConfig;

/// Symbol that refers to the current space inside space operations
pub const SELF_SPACE: &str = "&self";

#[derive(Debug, Clone)]
pub struct Environment {
    spaces: BTreeMap<String, Space>,
    current: String,
    grounded: GroundedRegistry,
    /// Upper bound on rule applications for one `reduce` call
    pub max_steps: usize,
    /// Upper bound on nested `interpret` calls
    pub max_depth: usize,
    depth: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self::from_config(&InterpreterConfig::default())
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        let mut spaces = BTreeMap::new();
        spaces.insert(
            config.default_space.clone(),
            Space::new(config.default_space.clone()),
        );
        Environment {
            spaces,
            current: config.default_space.clone(),
            grounded: GroundedRegistry::with_standard_ops(),
            max_steps: config.max_steps,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    pub fn grounded(&self) -> &GroundedRegistry {
        &self.grounded
    }

    pub fn grounded_mut(&mut self) -> &mut GroundedRegistry {
        &mut self.grounded
    }

    pub fn current_space_name(&self) -> &str {
        &self.current
    }

    /// The current space
    pub fn space(&self) -> &Space {
        // The current space is created on selection, so the fallback is never hit
        self.spaces
            .get(&self.current)
            .unwrap_or_else(|| unreachable!("current space {} is always registered", self.current))
    }

    pub fn space_mut(&mut self) -> &mut Space {
        let name = self.current.clone();
        self.space_named_mut(&name)
    }

    /// Look up a named space without creating it
    pub fn space_named(&self, name: &str) -> Option<&Space> {
        self.spaces.get(name)
    }

    /// Get a named space, creating an empty one on first use
    pub fn space_named_mut(&mut self, name: &str) -> &mut Space {
        self.spaces.entry(name.to_string()).or_insert_with(|| {
            debug!(target: "mettacore::environment", space = name, "creating space");
            Space::new(name)
        })
    }

    /// Make `name` the current space, creating it if needed
    pub fn use_space(&mut self, name: &str) -> &mut Space {
        debug!(target: "mettacore::environment", from = %self.current, to = name, "switching space");
        self.current = name.to_string();
        self.space_named_mut(name)
    }

    pub fn space_names(&self) -> impl Iterator<Item = &str> {
        self.spaces.keys().map(String::as_str)
    }

    /// Resolve a space reference atom to a registry name.
    ///
    /// `&self` names the current space and `&foo` names the space `foo`.
    pub fn space_ref_name(&self, atom: &Atom) -> Option<String> {
        match atom {
            Atom::Symbol(s) if s == SELF_SPACE => Some(self.current.clone()),
            Atom::Symbol(s) => s
                .strip_prefix('&')
                .filter(|rest| !rest.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }

    /// Enter one level of `interpret`. Returns `false` when the depth bound is hit.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
