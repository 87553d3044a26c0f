use bfi_interp::VMBuilder;
use bfi_types::Program;
use clap::Parser;
use std::error::Error;
use std::io;
use std::process::ExitCode;

mod cli;

use cli::Cli;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Entry point for the interpreter.
///
/// Loads the program named by `--file`, resolves its loops and runs it against the
/// `--input` string on a tape of `--memory` cells. Program output goes to stdout,
/// debug snapshots and step prompts go to stderr.
///
/// Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=debug` traces every instruction.
///
/// # Examples
///
/// ```bash
/// cargo run -- --file hello.bf --input "some input"
/// ```
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    log::debug!("{:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let program = Program::from_file(&args.file)?;

    let mut builder = VMBuilder::new()
        .set_program(program)
        .set_input(args.input)
        .set_cell_count(Some(args.memory))
        .set_output(io::stdout().lock())
        .set_diagnostics(io::stderr());
    if args.debug {
        builder = builder.set_single_step(io::stdin().lock());
    }

    let mut vm = builder.build()?;
    let final_state = vm.interpret()?;

    if args.report_state {
        eprintln!("\n{}", final_state);
    }

    Ok(())
}
