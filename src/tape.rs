//! This module defines the `Tape`, the machine's single storage strip. Cells are materialized
//! lazily: the tape only grows when a write lands on an empty tape or the head walks off either
//! end.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{BLANK_SYMBOL, HEAD_MARKER};

/// A growable sequence of symbols with a read/write head.
///
/// Once the tape holds at least one cell the head always points at a valid index.
/// An empty tape behaves as if every cell were blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    cells: Vec<char>,
    head: usize,
}

impl Tape {
    /// Builds a tape from an input string.
    ///
    /// The first [`HEAD_MARKER`] sets the initial head position and every marker is dropped
    /// from the contents. Without a marker the head starts at index 0.
    pub fn new(input: &str) -> Self {
        let mut cells = Vec::with_capacity(input.len());
        let mut head = None;

        for c in input.chars() {
            if c != HEAD_MARKER {
                cells.push(c);
            } else if head.is_none() {
                head = Some(cells.len());
            }
        }

        let head = head.unwrap_or(0);
        // A marker at the very end points one past the last symbol.
        if head == cells.len() && !cells.is_empty() {
            cells.push(BLANK_SYMBOL);
        }

        Self { cells, head }
    }

    /// Returns the symbol under the head, or blank on an empty tape.
    pub fn read(&self) -> char {
        self.cells.get(self.head).copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Overwrites the cell under the head. On an empty tape the first cell is created.
    pub fn write(&mut self, symbol: char) {
        match self.cells.get_mut(self.head) {
            Some(cell) => *cell = symbol,
            None => {
                self.cells.push(symbol);
                self.head = 0;
            }
        }
    }

    pub fn move_right(&mut self) {
        self.materialize();
        self.head += 1;
        if self.head == self.cells.len() {
            self.cells.push(BLANK_SYMBOL);
        }
    }

    pub fn move_left(&mut self) {
        self.materialize();
        if self.head == 0 {
            // Extend tape to the left
            self.cells.insert(0, BLANK_SYMBOL);
        } else {
            self.head -= 1;
        }
    }

    /// Removes the cell under the head, shifting the right-hand side left.
    pub fn delete_current(&mut self) {
        if self.head < self.cells.len() {
            self.cells.remove(self.head);
        }

        if self.cells.is_empty() {
            self.head = 0;
        } else if self.head == self.cells.len() {
            self.cells.push(BLANK_SYMBOL);
        }
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Returns the tape contents as a string, blanks included.
    pub fn contents(&self) -> String {
        self.cells.iter().collect()
    }

    /// Returns the tape contents without leading and trailing blanks.
    pub fn trimmed(&self) -> String {
        self.contents().trim_matches(BLANK_SYMBOL).to_string()
    }

    fn materialize(&mut self) {
        if self.cells.is_empty() {
            self.cells.push(BLANK_SYMBOL);
            self.head = 0;
        }
    }
}

impl fmt::Display for Tape {
    /// Renders the contents on one line and a caret under the head on the next.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.contents())?;
        write!(f, "{}^", " ".repeat(self.head))
    }
}
