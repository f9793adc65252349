//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including program representation, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::parser::Rule;

/// The blank symbol stored on the tape.
pub const BLANK_SYMBOL: char = ' ';
/// A special input symbol used in program text to represent the blank symbol.
pub const INPUT_BLANK_SYMBOL: char = '_';
/// Matches any state or any symbol on the read side; leaves the cell untouched on the write side.
pub const WILDCARD_SYMBOL: char = '*';
/// Write-side marker meaning "leave this cell unchanged".
pub const NO_WRITE_SYMBOL: char = ';';
/// Marks the initial head position inside an input string.
pub const HEAD_MARKER: char = '*';
/// States whose label starts with this prefix stop the machine.
pub const HALT_PREFIX: &str = "halt";
/// The maximum allowed size for a Turing Machine program in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB

/// Returns `true` if entering `state` stops the machine.
///
/// The prefix alone is not enough: a state named exactly `halt` keeps the machine
/// running while `halt-accept` or `halted` stop it.
pub fn is_halting_state(state: &str) -> bool {
    state.len() > HALT_PREFIX.len() && state.starts_with(HALT_PREFIX)
}

/// The state a transition applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatePattern {
    /// `*`: applies in every state.
    Any,
    /// Applies only in the named state.
    Named(String),
}

impl StatePattern {
    pub fn matches(&self, state: &str) -> bool {
        match self {
            StatePattern::Any => true,
            StatePattern::Named(name) => name == state,
        }
    }
}

/// The symbol a transition expects under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPattern {
    /// `*`: any symbol, blank included.
    Any,
    /// `_`: the blank symbol only.
    Blank,
    /// Exactly this symbol.
    Literal(char),
}

impl SymbolPattern {
    pub fn matches(&self, symbol: char) -> bool {
        match self {
            SymbolPattern::Any => true,
            SymbolPattern::Blank => symbol == BLANK_SYMBOL,
            SymbolPattern::Literal(c) => *c == symbol,
        }
    }
}

impl From<char> for SymbolPattern {
    fn from(c: char) -> Self {
        match c {
            WILDCARD_SYMBOL => SymbolPattern::Any,
            INPUT_BLANK_SYMBOL => SymbolPattern::Blank,
            c => SymbolPattern::Literal(c),
        }
    }
}

/// What a transition does to the cell under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteAction {
    /// Leave the cell as it is.
    Keep,
    /// Erase the cell to blank.
    WriteBlank,
    /// Overwrite the cell with this symbol.
    Write(char),
}

impl From<char> for WriteAction {
    fn from(c: char) -> Self {
        match c {
            INPUT_BLANK_SYMBOL => WriteAction::WriteBlank,
            WILDCARD_SYMBOL | NO_WRITE_SYMBOL | BLANK_SYMBOL => WriteAction::Keep,
            c => WriteAction::Write(c),
        }
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl From<&str> for Direction {
    /// `l` and `r` move the head; every other token means stay.
    fn from(token: &str) -> Self {
        match token {
            "l" => Direction::Left,
            "r" => Direction::Right,
            _ => Direction::Stay,
        }
    }
}

/// A single five-tuple transition rule.
///
/// Transitions are immutable once built; the order they appear in a [`Program`]
/// decides which one fires when several match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this transition applies to.
    pub state: StatePattern,
    /// The symbol expected under the head.
    pub read: SymbolPattern,
    /// The effect on the cell under the head.
    pub write: WriteAction,
    /// Where the head moves after writing.
    pub direction: Direction,
    /// The state the machine moves to.
    pub next_state: String,
}

impl Transition {
    pub fn matches(&self, state: &str, symbol: char) -> bool {
        self.state.matches(state) && self.read.matches(symbol)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            StatePattern::Any => WILDCARD_SYMBOL.to_string(),
            StatePattern::Named(name) => name.clone(),
        };
        let read = match self.read {
            SymbolPattern::Any => WILDCARD_SYMBOL,
            SymbolPattern::Blank => INPUT_BLANK_SYMBOL,
            SymbolPattern::Literal(c) => c,
        };
        let write = match self.write {
            WriteAction::Keep => WILDCARD_SYMBOL,
            WriteAction::WriteBlank => INPUT_BLANK_SYMBOL,
            WriteAction::Write(c) => c,
        };
        let direction = match self.direction {
            Direction::Left => 'l',
            Direction::Right => 'r',
            Direction::Stay => WILDCARD_SYMBOL,
        };

        write!(
            f,
            "{state} {read} {write} {direction} {}",
            self.next_state
        )
    }
}

/// An ordered list of transitions parsed from program text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub transitions: Vec<Transition>,
}

impl Program {
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Returns every named state, source or target, in order of first appearance.
    pub fn states(&self) -> Vec<String> {
        let mut states: Vec<String> = Vec::new();
        for t in &self.transitions {
            if let StatePattern::Named(name) = &t.state {
                if !states.contains(name) {
                    states.push(name.clone());
                }
            }
            if !states.contains(&t.next_state) {
                states.push(t.next_state.clone());
            }
        }

        states
    }

    /// Returns `true` if some transition applies in `state`, either by name or through `*`.
    pub fn handles_state(&self, state: &str) -> bool {
        self.transitions.iter().any(|t| t.state.matches(state))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.transitions {
            writeln!(f, "{t}")?;
        }
        Ok(())
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine applied a transition and keeps running.
    Continue,
    /// The machine stopped.
    Halt(Halt),
}

/// Why a machine stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// Entered a state carrying the halting prefix.
    Final(String),
    /// No transition matched the current state and symbol.
    Stuck { state: String, symbol: char },
    /// `step` was called after the machine had already stopped.
    Stopped,
}

impl Halt {
    pub fn is_stuck(&self) -> bool {
        matches!(self, Halt::Stuck { .. })
    }

    /// Converts the outcome into a `Result` for callers that treat a stuck machine as an error.
    pub fn into_result(self) -> Result<String, TuringMachineError> {
        match self {
            Halt::Final(state) => Ok(state),
            Halt::Stuck { state, symbol } => {
                Err(TuringMachineError::UndefinedTransition(state, symbol))
            }
            Halt::Stopped => Err(TuringMachineError::InvalidState(
                "machine is not running".to_string(),
            )),
        }
    }
}

/// The result of running a machine until it stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub halt: Halt,
    pub state: String,
    pub steps: usize,
    pub tape: String,
    pub head: usize,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates an operation that the machine's current state does not allow.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Indicates that there's no rule defined for a state and symbol.
    #[error("No matching instruction found for state {0} and symbol {1:?}")]
    UndefinedTransition(String, char),
    /// Indicates that an externally imposed step limit was reached before halting.
    #[error("Step limit of {0} reached before the machine halted")]
    StepLimitExceeded(usize),
    /// Indicates an error during the parsing of a program.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error during the validation of a program's structure or logic.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates program text exceeding [`MAX_PROGRAM_SIZE`].
    #[error("Program too large: {0} bytes (limit is {MAX_PROGRAM_SIZE})")]
    ProgramTooLarge(usize),
    /// Indicates a lookup of a built-in program that does not exist.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
}
