//! Built-in demonstration programs, parsed once on first access.

use crate::types::{Program, TuringMachineError};
use tracing::error;

/// Program text together with the machine parameters it is meant to run with.
struct BuiltinText {
    name: &'static str,
    initial_state: &'static str,
    input: &'static str,
    text: &'static str,
}

const PROGRAM_TEXTS: [BuiltinText; 3] = [
    BuiltinText {
        name: "Binary palindrome",
        initial_state: "0",
        input: "1001001",
        text: include_str!("../programs/palindrome.tm"),
    },
    BuiltinText {
        name: "Binary increment",
        initial_state: "0",
        input: "1011",
        text: include_str!("../programs/binary-increment.tm"),
    },
    BuiltinText {
        name: "Busy beaver (2 states)",
        initial_state: "a",
        input: "",
        text: include_str!("../programs/busy-beaver-2.tm"),
    },
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<ProgramInfo> = PROGRAM_TEXTS
        .iter()
        .filter_map(|builtin| match crate::parser::parse(builtin.text) {
            Ok(program) => Some(ProgramInfo {
                name: builtin.name,
                initial_state: builtin.initial_state,
                input: builtin.input,
                text: builtin.text,
                program,
            }),
            Err(e) => {
                error!(name = builtin.name, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

/// A parsed built-in program.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub initial_state: &'static str,
    pub input: &'static str,
    pub text: &'static str,
    pub program: Program,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<&'static ProgramInfo, TuringMachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            TuringMachineError::UnknownProgram(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<&'static ProgramInfo, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|info| info.name).collect()
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, info)| info.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::machine::TuringMachine;
    use crate::types::Halt;

    #[test]
    fn test_all_programs_parse() {
        assert_eq!(ProgramManager::get_program_count(), PROGRAM_TEXTS.len());
    }

    #[test]
    fn test_all_programs_pass_analysis() {
        for info in PROGRAMS.iter() {
            assert!(
                analyze(&info.program, info.initial_state).is_empty(),
                "Program '{}' has analysis findings",
                info.name
            );
        }
    }

    #[test]
    fn test_all_programs_halt() {
        for info in PROGRAMS.iter() {
            let mut machine =
                TuringMachine::new(info.input, info.initial_state, info.program.clone());
            let summary = machine.run_limited(10_000).unwrap();

            assert!(
                matches!(summary.halt, Halt::Final(_)),
                "Program '{}' did not halt cleanly: {:?}",
                info.name,
                summary.halt
            );
        }
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();
        assert!(names.contains(&"Binary palindrome"));
        assert!(names.contains(&"Binary increment"));
        assert!(names.contains(&"Busy beaver (2 states)"));
    }

    #[test]
    fn test_get_program_by_index() {
        assert!(ProgramManager::get_program_by_index(0).is_ok());
        assert!(matches!(
            ProgramManager::get_program_by_index(999),
            Err(TuringMachineError::UnknownProgram(_))
        ));
    }

    #[test]
    fn test_get_program_by_name() {
        let info = ProgramManager::get_program_by_name("binary PALINDROME").unwrap();
        assert_eq!(info.input, "1001001");
        assert_eq!(info.initial_state, "0");

        assert!(ProgramManager::get_program_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_search_programs() {
        assert_eq!(ProgramManager::search_programs("binary").len(), 2);
        assert_eq!(ProgramManager::search_programs("beaver"), vec![2]);
        assert!(ProgramManager::search_programs("nonexistent").is_empty());
    }
}
