//! This module provides the parser for five-tuple Turing Machine programs, utilizing the `pest`
//! crate. The grammar lives in `grammar.pest`; this module turns the parse tree into an ordered
//! list of [`Transition`]s.

use crate::types::{
    Direction, Program, StatePattern, SymbolPattern, Transition, TuringMachineError, WriteAction,
    WILDCARD_SYMBOL,
};
use pest::{
    iterators::{Pair, Pairs},
    Parser as PestParser,
};
use pest_derive::Parser as PestParser;
use tracing::debug;

/// Derives a `PestParser` for the program grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses program text into a `Program`.
///
/// Comments and blank lines are skipped; every other line must hold exactly five
/// whitespace-separated tokens. Symbol tokens are decoded once here, so the machine never
/// compares raw strings while stepping.
///
/// # Returns
///
/// * `Ok(Program)` with transitions in source order.
/// * `Err(TuringMachineError::ParseError)` if any line is malformed.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let root = TuringMachineParser::parse(Rule::program, input)
        .map_err(|e| TuringMachineError::ParseError(Box::new(e)))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty parse tree".to_string()))?;

    let transitions = root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect::<Vec<_>>();

    debug!(transitions = transitions.len(), "parsed program");

    Ok(Program::new(transitions))
}

/// Parses a single `Pair<Rule::transition>` into a `Transition`.
fn parse_transition(pair: Pair<Rule>) -> Transition {
    let mut pairs = pair.into_inner();

    let state = parse_state(&parse_string(&mut pairs));
    let read = SymbolPattern::from(parse_symbol(&mut pairs));
    let write = WriteAction::from(parse_symbol(&mut pairs));
    let direction = Direction::from(parse_string(&mut pairs).as_str());
    let next_state = parse_string(&mut pairs);

    Transition {
        state,
        read,
        write,
        direction,
        next_state,
    }
}

/// A lone `*` applies to every state.
fn parse_state(token: &str) -> StatePattern {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(WILDCARD_SYMBOL), None) => StatePattern::Any,
        _ => StatePattern::Named(token.to_string()),
    }
}

/// Extracts the single character of the next `symbol` pair.
fn parse_symbol(pairs: &mut Pairs<Rule>) -> char {
    parse_string(pairs).chars().next().unwrap_or(WILDCARD_SYMBOL)
}

/// Extracts the string content from the current `Pair` in a `Pairs` iterator.
///
/// The grammar guarantees all five tokens are present.
fn parse_string(pairs: &mut Pairs<Rule>) -> String {
    pairs.next().map(|p| p.as_str().to_string()).unwrap_or_default()
}
