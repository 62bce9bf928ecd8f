//! Interactive REPL with multi-line input, completion and persistent history
//!
//! - State machine for multi-line input handling
//! - Completion of special forms, operators and user-defined rule heads
//! - `:`-prefixed commands for inspecting and switching spaces

pub mod helper;
pub mod state_machine;

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::{debug, warn};

use crate::backend::models::Atom;
use crate::backend::Interpreter;

pub use helper::MettaHelper;
pub use state_machine::{CompletenessStatus, ReplEvent, ReplState, ReplStateMachine, StateTransition};

/// Format one result list as `[a, b, ...]`
pub fn format_results(results: &[Atom]) -> String {
    let formatted: Vec<String> = results.iter().map(Atom::to_string).collect();
    format!("[{}]", formatted.join(", "))
}

/// A `:`-prefixed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Switch to (or create) a named space
    Space(String),
    /// List the atoms of the current space
    Atoms,
    /// List the rules of the current space
    Rules,
    Quit,
}

impl ReplCommand {
    /// Parse a command line. Returns `None` for ordinary MeTTa input.
    pub fn parse(line: &str) -> Option<Result<ReplCommand, String>> {
        let line = line.trim();
        if !line.starts_with(':') || line.starts_with(": ") || line == ":" {
            return None;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let arg = parts.next();
        Some(match (command, arg) {
            (":space", Some(name)) => Ok(ReplCommand::Space(name.to_string())),
            (":space", None) => Err("usage: :space NAME".to_string()),
            (":atoms", _) => Ok(ReplCommand::Atoms),
            (":rules", _) => Ok(ReplCommand::Rules),
            (":quit", _) | (":q", _) | (":exit", _) => Ok(ReplCommand::Quit),
            (other, _) => Err(format!("Unknown command: {}", other)),
        })
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("mettacore").join("history.txt"))
}

/// Run one command against the interpreter, returning the lines to print
fn run_command(command: ReplCommand, interpreter: &mut Interpreter) -> Vec<String> {
    match command {
        ReplCommand::Space(name) => {
            interpreter.use_space(&name);
            vec![format!("Switched to space {}", name)]
        }
        ReplCommand::Atoms => interpreter
            .space()
            .atoms()
            .iter()
            .map(Atom::to_string)
            .collect(),
        ReplCommand::Rules => interpreter
            .space()
            .rules()
            .iter()
            .map(|rule| format!("{}: {}", rule.name, rule))
            .collect(),
        ReplCommand::Quit => Vec::new(),
    }
}

/// Evaluate a complete program, producing one formatted line per form
fn evaluate(input: &str, interpreter: &mut Interpreter) -> Result<Vec<String>, String> {
    let atoms = crate::backend::parse(input).map_err(|e| e.to_string())?;
    Ok(atoms
        .iter()
        .map(|atom| format_results(&interpreter.interpret(atom)))
        .collect())
}

/// Start the interactive loop on stdin/stdout
pub fn run_repl(interpreter: &mut Interpreter) -> rustyline::Result<()> {
    println!("mettacore REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter MeTTa expressions. Type :quit or press Ctrl-D to exit.\n");

    let mut editor: Editor<MettaHelper, DefaultHistory> = Editor::new()?;
    let mut helper = MettaHelper::new();
    helper.update_from_space(interpreter.space());
    editor.set_helper(Some(helper));

    let history = history_path();
    if let Some(path) = &history {
        if editor.load_history(path).is_err() {
            debug!(target: "mettacore::repl", path = %path.display(), "no previous history");
        }
    }

    let mut machine = ReplStateMachine::new();
    loop {
        let event = match editor.readline(machine.prompt()) {
            Ok(line) => {
                if matches!(machine.state(), ReplState::Ready) {
                    if let Some(command) = ReplCommand::parse(&line) {
                        let _ = editor.add_history_entry(line.as_str());
                        match command {
                            Ok(ReplCommand::Quit) => break,
                            Ok(command) => {
                                for out in run_command(command, interpreter) {
                                    println!("{}", out);
                                }
                            }
                            Err(message) => eprintln!("Error: {}", message),
                        }
                        continue;
                    }
                }
                ReplEvent::LineSubmitted(line)
            }
            Err(ReadlineError::Interrupted) => ReplEvent::Interrupted,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };

        if let StateTransition::Transition(ReplState::Evaluating { input }) =
            machine.process_event(event)
        {
            let _ = editor.add_history_entry(input.as_str());
            match evaluate(&input, interpreter) {
                Ok(lines) => {
                    machine.process_event(ReplEvent::EvaluationComplete(lines.clone()));
                    for line in &lines {
                        println!("{}", line);
                    }
                    machine.process_event(ReplEvent::ResultsDisplayed);
                }
                Err(message) => {
                    machine.process_event(ReplEvent::EvaluationFailed(message.clone()));
                    eprintln!("Error: {}", message);
                    machine.process_event(ReplEvent::ResultsDisplayed);
                }
            }
            if let Some(helper) = editor.helper_mut() {
                helper.add_to_history(input);
                helper.update_from_space(interpreter.space());
            }
        } else if let ReplState::Error { message } = machine.state() {
            eprintln!("Error: {}", message);
            machine.process_event(ReplEvent::ResultsDisplayed);
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = editor.save_history(path) {
            warn!(target: "mettacore::repl", error = %e, "failed to save history");
        }
    }
    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_results() {
        assert_eq!(format_results(&[]), "[]");
        assert_eq!(
            format_results(&[Atom::float(3.0), Atom::sym("x")]),
            "[3.0, x]"
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ReplCommand::parse(":space kb"),
            Some(Ok(ReplCommand::Space("kb".to_string())))
        );
        assert_eq!(ReplCommand::parse(":atoms"), Some(Ok(ReplCommand::Atoms)));
        assert_eq!(ReplCommand::parse(" :quit "), Some(Ok(ReplCommand::Quit)));
        assert!(matches!(ReplCommand::parse(":space"), Some(Err(_))));
        assert!(matches!(ReplCommand::parse(":bogus"), Some(Err(_))));
        assert_eq!(ReplCommand::parse("(+ 1 2)"), None);
    }

    #[test]
    fn test_run_command_space_and_listing() {
        let mut metta = Interpreter::new();
        run_command(ReplCommand::Space("kb".to_string()), &mut metta);
        metta.add("(Person Alice)").unwrap();
        metta.run("(= (f $x) $x)").unwrap();

        assert_eq!(run_command(ReplCommand::Atoms, &mut metta), vec!["(Person Alice)"]);
        assert_eq!(
            run_command(ReplCommand::Rules, &mut metta),
            vec!["rule-1: (= (f $x) $x)"]
        );
    }

    #[test]
    fn test_evaluate_formats_each_form() {
        let mut metta = Interpreter::new();
        assert_eq!(
            evaluate("(+ 1 2) (superpose (a b))", &mut metta).unwrap(),
            vec!["[3.0]", "[a, b]"]
        );
        assert!(evaluate("(+ 1", &mut metta).is_err());
    }
}
