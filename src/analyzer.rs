//! This module provides functions for analyzing Turing Machine programs to detect common mistakes
//! before execution: a start state nothing handles, transitions into states nothing handles,
//! unreachable states and programs that can never halt.
//!
//! Findings are advisory. The machine itself reports a missing transition at runtime, and some
//! programs get stuck on purpose.

use crate::types::{is_halting_state, Program, StatePattern, TuringMachineError, HALT_PREFIX};
use std::collections::{HashSet, VecDeque};

/// Represents the problems that can be found during the analysis of a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The program has no transitions at all.
    EmptyProgram,
    /// No transition applies in the initial state.
    InvalidStartState(String),
    /// Transitions lead into non-halting states that no transition handles.
    UndefinedNextStates(Vec<String>),
    /// States with transitions that can never be entered from the initial state.
    UnreachableStates(Vec<String>),
    /// No transition leads into a halting state.
    NoHaltingState,
    /// Transitions lead into a state named exactly `halt`, which does not stop the machine.
    BareHaltState,
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyProgram => {
                TuringMachineError::ValidationError("Program has no transitions".to_string())
            }
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndefinedNextStates(states) => TuringMachineError::ValidationError(
                format!("Transitions reference undefined states: {:?}", states),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
            AnalysisError::NoHaltingState => TuringMachineError::ValidationError(format!(
                "No transition leads to a state starting with '{HALT_PREFIX}'"
            )),
            AnalysisError::BareHaltState => TuringMachineError::ValidationError(format!(
                "State '{HALT_PREFIX}' does not halt the machine; use a suffix such as '{HALT_PREFIX}-accept'"
            )),
        }
    }
}

/// Analyzes a `Program` started in `initial_state` and returns every finding.
pub fn analyze(program: &Program, initial_state: &str) -> Vec<AnalysisError> {
    if program.is_empty() {
        return vec![AnalysisError::EmptyProgram];
    }

    [
        check_valid_start_state,
        check_undefined_next_states,
        check_unreachable_states,
        check_halting_states,
        check_bare_halt_state,
    ]
    .iter()
    .filter_map(|f| f(program, initial_state).err())
    .collect()
}

/// Analyzes a program and returns the first finding as an error.
pub fn check(program: &Program, initial_state: &str) -> Result<(), TuringMachineError> {
    match analyze(program, initial_state).into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Checks whether any transition applies in the initial state.
fn check_valid_start_state(program: &Program, initial_state: &str) -> Result<(), AnalysisError> {
    if !program.handles_state(initial_state) {
        return Err(AnalysisError::InvalidStartState(initial_state.to_string()));
    }

    Ok(())
}

/// Checks that every non-halting target state is handled by some transition.
fn check_undefined_next_states(program: &Program, _: &str) -> Result<(), AnalysisError> {
    let mut undefined = Vec::new();
    for t in &program.transitions {
        let next = &t.next_state;
        if !is_halting_state(next) && !program.handles_state(next) && !undefined.contains(next) {
            undefined.push(next.clone());
        }
    }

    if undefined.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UndefinedNextStates(undefined))
    }
}

/// Walks the state graph from the initial state and reports named states never entered.
///
/// A wildcard-state transition fires from any state, so its target is reachable as soon as any
/// state is.
fn check_unreachable_states(program: &Program, initial_state: &str) -> Result<(), AnalysisError> {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::from([initial_state.to_string()]);

    while let Some(state) = queue.pop_front() {
        if !reachable.insert(state.clone()) {
            continue;
        }

        for t in program.transitions.iter().filter(|t| t.state.matches(&state)) {
            if !reachable.contains(&t.next_state) {
                queue.push_back(t.next_state.clone());
            }
        }
    }

    let mut unreachable = Vec::new();
    for t in &program.transitions {
        if let StatePattern::Named(name) = &t.state {
            if !reachable.contains(name) && !unreachable.contains(name) {
                unreachable.push(name.clone());
            }
        }
    }

    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UnreachableStates(unreachable))
    }
}

/// Checks whether any transition can stop the machine.
fn check_halting_states(program: &Program, _: &str) -> Result<(), AnalysisError> {
    if program
        .transitions
        .iter()
        .any(|t| is_halting_state(&t.next_state))
    {
        Ok(())
    } else {
        Err(AnalysisError::NoHaltingState)
    }
}

/// Checks for transitions into a state named exactly `halt`.
fn check_bare_halt_state(program: &Program, _: &str) -> Result<(), AnalysisError> {
    if program
        .transitions
        .iter()
        .any(|t| t.next_state == HALT_PREFIX)
    {
        Err(AnalysisError::BareHaltState)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_valid_program() {
        let program = parse("0 1 0 r 0\n0 _ _ * halt-done\n").unwrap();
        assert!(analyze(&program, "0").is_empty());
        assert!(check(&program, "0").is_ok());
    }

    #[test]
    fn test_empty_program() {
        let program = parse("; nothing\n").unwrap();
        assert_eq!(analyze(&program, "0"), vec![AnalysisError::EmptyProgram]);
    }

    #[test]
    fn test_invalid_start_state() {
        let program = parse("a 1 0 r halt-done\n").unwrap();
        let errors = analyze(&program, "b");

        assert!(errors.contains(&AnalysisError::InvalidStartState("b".into())));
    }

    #[test]
    fn test_wildcard_state_handles_everything() {
        let program = parse("* 1 0 r next\n* _ _ * halt-done\n").unwrap();
        assert!(analyze(&program, "start").is_empty());
    }

    #[test]
    fn test_undefined_next_states() {
        let program = parse("a 1 0 r b\na _ _ * halt-done\n").unwrap();
        let errors = analyze(&program, "a");

        assert!(errors.contains(&AnalysisError::UndefinedNextStates(vec!["b".into()])));
    }

    #[test]
    fn test_unreachable_states() {
        let program = parse("a 1 0 r halt-done\nb 1 0 r a\n").unwrap();
        let errors = analyze(&program, "a");

        assert_eq!(
            errors,
            vec![AnalysisError::UnreachableStates(vec!["b".into()])]
        );
    }

    #[test]
    fn test_no_halting_state() {
        let program = parse("a * * r a\n").unwrap();
        assert_eq!(analyze(&program, "a"), vec![AnalysisError::NoHaltingState]);
    }

    #[test]
    fn test_bare_halt_state() {
        let program = parse("a 1 1 * halt\nhalt * * * halt-done\n").unwrap();
        let errors = analyze(&program, "a");

        assert_eq!(errors, vec![AnalysisError::BareHaltState]);

        let error = check(&program, "a").unwrap_err();
        assert!(error.to_string().contains("does not halt"));
    }
}
