//! This module defines the `TuringMachine` struct, which simulates a single-tape, five-tuple
//! Turing Machine. It selects transitions, applies their effects to the tape and detects halting.

use tracing::{info, trace, warn};

use crate::tape::Tape;
use crate::types::{
    is_halting_state, Direction, Halt, Program, RunSummary, Step, Transition, TuringMachineError,
    WriteAction, BLANK_SYMBOL,
};

/// Represents a single-tape Turing Machine.
///
/// The machine owns its tape, the current state label and an immutable program. It keeps
/// running until it enters a halting state or finds no transition for its current
/// state and symbol.
pub struct TuringMachine {
    state: String,
    tape: Tape,
    running: bool,
    input: String,
    initial_state: String,
    program: Program,
    step_count: usize,
    last_transition: Option<usize>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine`.
    ///
    /// # Arguments
    ///
    /// * `input` - The initial tape contents, optionally containing a head marker.
    /// * `initial_state` - The state the machine starts in.
    /// * `program` - The ordered transition list.
    pub fn new(input: &str, initial_state: &str, program: Program) -> Self {
        Self {
            state: initial_state.to_string(),
            tape: Tape::new(input),
            running: true,
            input: input.to_string(),
            initial_state: initial_state.to_string(),
            program,
            step_count: 0,
            last_transition: None,
        }
    }

    /// Executes a single step of the machine's computation.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied and the machine keeps running.
    /// * `Step::Halt(Halt::Final(_))` if the applied transition entered a halting state.
    /// * `Step::Halt(Halt::Stuck { .. })` if no transition matched. Tape and state are left
    ///   untouched.
    /// * `Step::Halt(Halt::Stopped)` if the machine had already stopped.
    pub fn step(&mut self) -> Step {
        if !self.running {
            return Step::Halt(Halt::Stopped);
        }

        let symbol = self.tape.read();
        let Some(index) = self.find_transition(symbol) else {
            self.running = false;
            warn!(state = %self.state, symbol = ?symbol, "no matching instruction");
            return Step::Halt(Halt::Stuck {
                state: self.state.clone(),
                symbol,
            });
        };

        let transition = &self.program.transitions[index];
        trace!(step = self.step_count + 1, %transition, "applying transition");

        // Write
        match transition.write {
            WriteAction::Write(c) => self.tape.write(c),
            WriteAction::WriteBlank => self.tape.write(BLANK_SYMBOL),
            WriteAction::Keep => {}
        }

        // Move head
        match transition.direction {
            Direction::Left => self.tape.move_left(),
            Direction::Right => self.tape.move_right(),
            Direction::Stay => {}
        }

        self.state.clone_from(&transition.next_state);
        self.step_count += 1;
        self.last_transition = Some(index);

        if is_halting_state(&self.state) {
            self.running = false;
            info!(state = %self.state, steps = self.step_count, "machine halted");
            return Step::Halt(Halt::Final(self.state.clone()));
        }

        Step::Continue
    }

    /// Runs the machine until it stops.
    ///
    /// There is no step cap: a program that never reaches a halting state runs forever.
    /// Use [`TuringMachine::run_limited`] to bound the run.
    pub fn run(&mut self) -> RunSummary {
        self.run_with(|_| {})
    }

    /// Runs the machine until it stops, calling `observer` after every applied transition.
    pub fn run_with<F>(&mut self, mut observer: F) -> RunSummary
    where
        F: FnMut(&TuringMachine),
    {
        loop {
            match self.step() {
                Step::Continue => observer(self),
                Step::Halt(halt) => return self.finish(halt, &mut observer),
            }
        }
    }

    /// Runs the machine for at most `max_steps` transitions.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` if the machine stopped within the limit.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if it was still running afterwards.
    pub fn run_limited(&mut self, max_steps: usize) -> Result<RunSummary, TuringMachineError> {
        self.run_limited_with(max_steps, |_| {})
    }

    /// Like [`TuringMachine::run_limited`], calling `observer` after every applied transition.
    pub fn run_limited_with<F>(
        &mut self,
        max_steps: usize,
        mut observer: F,
    ) -> Result<RunSummary, TuringMachineError>
    where
        F: FnMut(&TuringMachine),
    {
        for _ in 0..max_steps {
            match self.step() {
                Step::Continue => observer(self),
                Step::Halt(halt) => return Ok(self.finish(halt, &mut observer)),
            }
        }

        if self.running {
            return Err(TuringMachineError::StepLimitExceeded(max_steps));
        }

        Ok(self.summary(Halt::Stopped))
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the state the machine started in.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the transition applied by the most recent successful step.
    pub fn last_transition(&self) -> Option<&Transition> {
        self.last_transition.map(|i| &self.program.transitions[i])
    }

    /// Returns the transition the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.find_transition(self.tape.read())
            .map(|i| &self.program.transitions[i])
    }

    /// Resets the machine to its initial tape, state and step count.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = Tape::new(&self.input);
        self.running = true;
        self.step_count = 0;
        self.last_transition = None;
    }

    /// Replaces the initial tape contents and resets the machine.
    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
        self.reset();
    }

    /// Finds the index of the first transition matching the current state and `symbol`.
    fn find_transition(&self, symbol: char) -> Option<usize> {
        self.program
            .transitions
            .iter()
            .position(|t| t.matches(&self.state, symbol))
    }

    /// Reports the final transition to the observer, unless the machine stopped without one.
    fn finish<F>(&self, halt: Halt, observer: &mut F) -> RunSummary
    where
        F: FnMut(&TuringMachine),
    {
        if let Halt::Final(_) = halt {
            observer(self);
        }
        self.summary(halt)
    }

    fn summary(&self, halt: Halt) -> RunSummary {
        RunSummary {
            halt,
            state: self.state.clone(),
            steps: self.step_count,
            tape: self.tape.contents(),
            head: self.tape.head(),
        }
    }
}
