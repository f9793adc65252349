//! This crate provides the core logic for a single-tape, five-tuple Turing Machine simulator.
//! It includes modules for parsing programs, the tape and execution engine, program analysis,
//! loading programs from disk and a small set of built-in programs.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` and `check` functions and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, check, AnalysisError};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the types describing programs and execution outcomes.
pub use types::{
    Direction, Halt, Program, RunSummary, StatePattern, Step, SymbolPattern, Transition,
    TuringMachineError, WriteAction, BLANK_SYMBOL, MAX_PROGRAM_SIZE,
};
