//! Rustyline helper: completion of built-in and user-defined heads, plus
//! history-based hints.

use std::borrow::Cow;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::backend::models::Atom;
use crate::backend::space::Space;

const GROUNDED_FUNCTIONS: &[&str] = &[
    "+", "-", "*", "/", "%", "<", "<=", ">", ">=", "==", "!=", "and", "or", "not",
];

const SPECIAL_FORMS: &[&str] = &[
    "match", "let", "let*", "if", "case", "quote", "unquote", "collapse", "superpose", "=",
    "add-atom", "remove-atom", "get-atoms", "new-space", "rule-count", "error", "is-error",
    "catch", "get-type", ":",
];

const REPL_COMMANDS: &[&str] = &[":space", ":atoms", ":rules", ":quit"];

const MAX_HINT_HISTORY: usize = 100;

#[derive(Default)]
pub struct MettaHelper {
    command_history: Vec<String>,
    defined_functions: Vec<String>,
}

impl MettaHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a submitted command for hints
    pub fn add_to_history(&mut self, cmd: String) {
        if self.command_history.len() >= MAX_HINT_HISTORY {
            self.command_history.remove(0);
        }
        self.command_history.push(cmd);
    }

    /// Refresh completions from the head symbols of the space's rules
    pub fn update_from_space(&mut self, space: &Space) {
        self.defined_functions.clear();
        for rule in space.rules() {
            let name = match rule.pattern.as_ref() {
                Atom::Expression(items) => match items.first() {
                    Some(Atom::Symbol(name)) => name,
                    _ => continue,
                },
                Atom::Symbol(name) => name,
                _ => continue,
            };
            if !self.defined_functions.contains(name) {
                self.defined_functions.push(name.clone());
            }
        }
    }

    fn all_completions(&self) -> impl Iterator<Item = &str> {
        GROUNDED_FUNCTIONS
            .iter()
            .chain(SPECIAL_FORMS)
            .chain(REPL_COMMANDS)
            .copied()
            .chain(self.defined_functions.iter().map(String::as_str))
    }
}

impl Completer for MettaHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .map(|i| i + 1)
            .unwrap_or(0);
        let partial = &before_cursor[word_start..];

        if partial.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let mut matches: Vec<Pair> = self
            .all_completions()
            .filter(|comp| comp.starts_with(partial))
            .map(|comp| Pair {
                display: comp.to_string(),
                replacement: comp.to_string(),
            })
            .collect();
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches.dedup_by(|a, b| a.display == b.display);

        Ok((word_start, matches))
    }
}

impl Hinter for MettaHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() {
            return None;
        }
        self.command_history
            .iter()
            .rev()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for MettaHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

// Multi-line input is handled by the state machine, one line at a time
impl Validator for MettaHelper {}

impl Helper for MettaHelper {}
