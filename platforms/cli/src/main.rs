use clap::Parser;
use morphett::{
    analyze, Halt, Program, ProgramLoader, ProgramManager, RunSummary, TuringMachine,
    TuringMachineError,
};
use std::io::{self, BufRead, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a five-tuple Turing machine program.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  morphett-cli programs/palindrome.tm -i 1001001
  morphett-cli --builtin 'binary palindrome' -i 10
  cat programs/binary-increment.tm | morphett-cli -i 1011")]
struct Cli {
    /// Path to a program file. Read from stdin when omitted and stdin is not a terminal.
    program: Option<String>,

    /// Run a built-in program by name
    #[clap(short, long, conflicts_with = "program")]
    builtin: Option<String>,

    /// The initial tape. A '*' marks the starting head position
    #[clap(short, long)]
    input: Option<String>,

    /// The initial state
    #[clap(short, long)]
    state: Option<String>,

    /// Print the tape after every step
    #[clap(short = 't', long)]
    print_tape: bool,

    /// Wait for ENTER between steps
    #[clap(long)]
    step_through: bool,

    /// Stop after this many steps if the machine has not halted
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Print the run summary as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,

    /// Analyze the program and exit
    #[clap(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const EXIT_LOAD_ERROR: u8 = 1;
const EXIT_STUCK: u8 = 2;
const EXIT_STEP_LIMIT: u8 = 3;

/// A loaded program and the defaults it runs with.
struct Loaded {
    program: Program,
    input: String,
    state: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list {
        for info in morphett::PROGRAMS.iter() {
            println!(
                "{} (state: {}, input: {:?})",
                info.name, info.initial_state, info.input
            );
        }
        return ExitCode::SUCCESS;
    }

    let loaded = match load_program(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };

    if cli.check {
        let findings = analyze(&loaded.program, &loaded.state);
        if findings.is_empty() {
            println!("No problems found.");
            return ExitCode::SUCCESS;
        }
        for finding in findings {
            println!("{}", TuringMachineError::from(finding));
        }
        return ExitCode::from(EXIT_LOAD_ERROR);
    }

    let mut machine = TuringMachine::new(&loaded.input, &loaded.state, loaded.program);
    if !cli.json {
        println!("Tape Start:");
        println!("{}", machine.tape());
    }

    let result = run(&cli, &mut machine);

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}", e);
            print_tape_end(&cli, &machine);
            return ExitCode::from(EXIT_STEP_LIMIT);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
    } else {
        if let Halt::Stuck { state, .. } = &summary.halt {
            println!("No matching instruction found for State: {}", state);
        }
        print_tape_end(&cli, &machine);
        println!("Num of steps: {}", summary.steps);
    }

    if summary.halt.is_stuck() {
        ExitCode::from(EXIT_STUCK)
    } else {
        ExitCode::SUCCESS
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the program from a built-in name, a file path or stdin, in that order.
fn load_program(cli: &Cli) -> Result<Loaded, TuringMachineError> {
    let (program, input, state) = if let Some(name) = &cli.builtin {
        let info = ProgramManager::get_program_by_name(name)?;
        (info.program.clone(), info.input, info.initial_state)
    } else if let Some(path) = &cli.program {
        (ProgramLoader::load_program(Path::new(path))?, "", "0")
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| TuringMachineError::FileError(format!("Failed to read from stdin: {}", e)))?;
        (ProgramLoader::load_program_from_string(&buffer)?, "", "0")
    } else {
        return Err(TuringMachineError::FileError(
            "No program given; pass a file, --builtin <name> or pipe one via stdin".to_string(),
        ));
    };

    info!(transitions = program.len(), "program loaded");

    Ok(Loaded {
        program,
        input: cli.input.clone().unwrap_or_else(|| input.to_string()),
        state: cli.state.clone().unwrap_or_else(|| state.to_string()),
    })
}

/// Runs the machine, printing and pausing between steps as requested.
fn run(cli: &Cli, machine: &mut TuringMachine) -> Result<RunSummary, TuringMachineError> {
    let print_tape = cli.print_tape && !cli.json;
    let stdin = io::stdin();

    let observe = |machine: &TuringMachine| {
        if print_tape {
            println!("{}", machine.tape());
        }
        if cli.step_through {
            let mut line = String::new();
            let _ = stdin.lock().read_line(&mut line);
        }
    };

    match cli.max_steps {
        Some(max_steps) => machine.run_limited_with(max_steps, observe),
        None => Ok(machine.run_with(observe)),
    }
}

fn print_tape_end(cli: &Cli, machine: &TuringMachine) {
    if !cli.json {
        println!("\nTape End:");
        println!("{}", machine.tape());
    }
}
