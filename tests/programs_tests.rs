use morphett::{
    parse, Halt, ProgramLoader, ProgramManager, Step, TuringMachine, TuringMachineError,
};
use std::path::Path;

fn palindrome(input: &str) -> TuringMachine {
    let info = ProgramManager::get_program_by_name("Binary palindrome").unwrap();
    TuringMachine::new(input, info.initial_state, info.program.clone())
}

#[test]
fn palindrome_accepts_1001001() {
    let mut machine = palindrome("1001001");
    let summary = machine.run();

    assert_eq!(summary.halt, Halt::Final("halt-accept".to_string()));
    assert_eq!(summary.state, "halt-accept");
    assert_eq!(summary.steps, 38);
    assert_eq!(summary.tape, "   :)   ");
    assert_eq!(summary.head, 4);
    assert_eq!(machine.tape().trimmed(), ":)");
}

#[test]
fn palindrome_is_deterministic() {
    let first = palindrome("1001001").run();
    let second = palindrome("1001001").run();

    assert_eq!(first, second);
}

#[test]
fn palindrome_rejects_10() {
    let summary = palindrome("10").run();

    assert_eq!(summary.halt, Halt::Final("halt-reject".to_string()));
    assert_eq!(summary.steps, 7);
    assert_eq!(summary.tape, ":( ");
    assert_eq!(summary.head, 1);
}

#[test]
fn palindrome_other_inputs() {
    let cases = [
        ("", "halt-accept", 3, ":)"),
        ("1", "halt-accept", 5, ":)"),
        ("11", "halt-accept", 7, ":) "),
        ("101", "halt-accept", 12, " :) "),
        ("0110", "halt-accept", 16, " :)  "),
    ];

    for (input, state, steps, tape) in cases {
        let summary = palindrome(input).run();
        assert_eq!(summary.state, state, "input {input:?}");
        assert_eq!(summary.steps, steps, "input {input:?}");
        assert_eq!(summary.tape, tape, "input {input:?}");
    }
}

#[test]
fn palindrome_from_file_matches_builtin() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("programs/palindrome.tm");
    let program = ProgramLoader::load_program(&path).unwrap();
    let info = ProgramManager::get_program_by_name("Binary palindrome").unwrap();

    assert_eq!(program, info.program);
    assert_eq!(program.len(), 22);
}

#[test]
fn binary_increment() {
    let info = ProgramManager::get_program_by_name("Binary increment").unwrap();

    for (input, steps, tape) in [("1011", 8, "1100 "), ("111", 8, "1000 "), ("0", 3, "1 ")] {
        let mut machine = TuringMachine::new(input, info.initial_state, info.program.clone());
        let summary = machine.run();

        assert_eq!(summary.halt, Halt::Final("halt-done".to_string()));
        assert_eq!(summary.steps, steps, "input {input:?}");
        assert_eq!(summary.tape, tape, "input {input:?}");
    }
}

#[test]
fn busy_beaver_on_empty_tape() {
    let info = ProgramManager::get_program_by_name("Busy beaver (2 states)").unwrap();
    let mut machine = TuringMachine::new(info.input, info.initial_state, info.program.clone());
    let summary = machine.run();

    assert_eq!(summary.halt, Halt::Final("halt-bb".to_string()));
    assert_eq!(summary.steps, 6);
    assert_eq!(summary.tape, "1111");
    assert_eq!(summary.head, 2);
}

#[test]
fn head_marker_sets_start_position() {
    let program = parse("0 1 x * halt-done\n0 0 y * halt-done\n").unwrap();
    let mut machine = TuringMachine::new("00*10", "0", program);

    machine.run();
    assert_eq!(machine.tape().contents(), "00x0");
}

#[test]
fn stuck_machine_reports_once() {
    let program = parse("0 0 1 r 1\n1 0 1 r 1\n").unwrap();
    let mut machine = TuringMachine::new("001", "0", program);

    assert_eq!(machine.step(), Step::Continue);
    assert_eq!(machine.step(), Step::Continue);

    let outcome = machine.step();
    assert_eq!(
        outcome,
        Step::Halt(Halt::Stuck {
            state: "1".to_string(),
            symbol: '1',
        })
    );

    let tape = machine.tape().clone();
    assert_eq!(machine.step(), Step::Halt(Halt::Stopped));
    assert_eq!(machine.tape(), &tape);
    assert_eq!(machine.state(), "1");
    assert_eq!(machine.step_count(), 2);

    let summary = machine.run();
    assert_eq!(summary.halt, Halt::Stopped);
}

#[test]
fn run_reports_stuck_outcome() {
    let program = parse("0 0 1 r 1\n").unwrap();
    let summary = TuringMachine::new("00", "0", program).run();

    assert!(summary.halt.is_stuck());
    assert_eq!(
        summary.halt.into_result(),
        Err(TuringMachineError::UndefinedTransition("1".to_string(), '0'))
    );
}

#[test]
fn summary_serializes_to_json() {
    let summary = palindrome("10").run();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["steps"], 7);
    assert_eq!(json["state"], "halt-reject");
    assert_eq!(json["halt"]["Final"], "halt-reject");
}
