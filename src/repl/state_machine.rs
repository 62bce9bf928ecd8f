//! Multi-line input handling for the REPL.
//!
//! Submitted lines are buffered until the lexer sees balanced parentheses and
//! no open string literal; the whole buffer is then evaluated as one program.

use crate::sexpr::{Lexer, Spanned, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplState {
    Ready,
    /// Some lines were entered but the program is not complete yet
    Continuation { buffer: String },
    Evaluating { input: String },
    DisplayingResults,
    /// The buffered input can never parse; cleared on the next event
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum ReplEvent {
    LineSubmitted(String),
    /// Ctrl-C: drop whatever is buffered
    Interrupted,
    /// Formatted result lines of a finished evaluation
    EvaluationComplete(Vec<String>),
    EvaluationFailed(String),
    ResultsDisplayed,
}

#[derive(Debug)]
pub enum StateTransition {
    NoChange,
    Transition(ReplState),
}

/// Result of lexing the buffered input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletenessStatus {
    Complete,
    Incomplete {
        missing_close_parens: usize,
        unclosed_string: bool,
    },
    Invalid { reason: String },
}

pub struct ReplStateMachine {
    state: ReplState,
    prompt: String,
    continuation_prompt: String,
}

impl ReplStateMachine {
    pub fn new() -> Self {
        Self {
            state: ReplState::Ready,
            prompt: "metta> ".to_string(),
            continuation_prompt: "...> ".to_string(),
        }
    }

    pub fn state(&self) -> &ReplState {
        &self.state
    }

    pub fn prompt(&self) -> &str {
        match self.state {
            ReplState::Continuation { .. } => &self.continuation_prompt,
            _ => &self.prompt,
        }
    }

    pub fn process_event(&mut self, event: ReplEvent) -> StateTransition {
        match (&self.state, event) {
            (ReplState::Ready, ReplEvent::LineSubmitted(line)) => self.accept(line),
            (ReplState::Continuation { buffer }, ReplEvent::LineSubmitted(line)) => {
                let joined = format!("{}\n{}", buffer, line);
                self.accept(joined)
            }
            (_, ReplEvent::Interrupted) => self.enter(ReplState::Ready),
            (ReplState::Evaluating { .. }, ReplEvent::EvaluationComplete(_)) => {
                self.enter(ReplState::DisplayingResults)
            }
            (ReplState::Evaluating { .. }, ReplEvent::EvaluationFailed(message)) => {
                self.enter(ReplState::Error { message })
            }
            (ReplState::DisplayingResults, ReplEvent::ResultsDisplayed)
            | (ReplState::Error { .. }, _) => self.enter(ReplState::Ready),
            _ => StateTransition::NoChange,
        }
    }

    fn enter(&mut self, state: ReplState) -> StateTransition {
        self.state = state.clone();
        StateTransition::Transition(state)
    }

    fn accept(&mut self, input: String) -> StateTransition {
        if input.trim().is_empty() {
            self.state = ReplState::Ready;
            return StateTransition::NoChange;
        }
        match Self::check_completeness(&input) {
            CompletenessStatus::Complete => self.enter(ReplState::Evaluating { input }),
            CompletenessStatus::Incomplete { .. } => self.enter(ReplState::Continuation { buffer: input }),
            CompletenessStatus::Invalid { reason } => self.enter(ReplState::Error { message: reason }),
        }
    }

    /// Lex `input` and decide whether more lines could complete it.
    ///
    /// Lexical errors other than an open string are reported as `Complete` so
    /// the parser can report them with their position.
    pub fn check_completeness(input: &str) -> CompletenessStatus {
        let mut lexer = Lexer::new(input);
        let mut depth = 0usize;
        loop {
            match lexer.next_token() {
                Ok(Spanned { token: Token::Eof, .. }) => break,
                Ok(Spanned { token: Token::LParen, .. }) => depth += 1,
                Ok(Spanned {
                    token: Token::RParen,
                    line,
                    column,
                }) => {
                    if depth == 0 {
                        return CompletenessStatus::Invalid {
                            reason: format!("Unexpected ')' at {}:{}", line, column),
                        };
                    }
                    depth -= 1;
                }
                Ok(_) => {}
                Err(e) if e.is_unterminated_string() => {
                    return CompletenessStatus::Incomplete {
                        missing_close_parens: depth,
                        unclosed_string: true,
                    }
                }
                Err(_) => return CompletenessStatus::Complete,
            }
        }

        if depth > 0 {
            CompletenessStatus::Incomplete {
                missing_close_parens: depth,
                unclosed_string: false,
            }
        } else {
            CompletenessStatus::Complete
        }
    }
}

impl Default for ReplStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
