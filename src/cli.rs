use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

/// Handle CLI arguments for bfi
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Brainfuck program to execute
    #[arg(short, long)]
    pub file: PathBuf,

    /// Input bytes for ',' commands. Once exhausted ',' reads 0.
    #[arg(short, long, default_value = "")]
    pub input: String,

    /// Specifies the number of cells in the tape.
    ///
    /// Traditionally Brainfuck interpreters use a tape of 30,000 cells.
    #[arg(short, long, default_value = "30000")]
    pub memory: NonZeroUsize,

    /// Pause after every instruction, print the machine state to stderr and wait for Enter
    #[arg(short, long)]
    pub debug: bool,

    /// Print the final machine state to stderr when the program halts
    #[arg(short = 's', long)]
    pub report_state: bool,
}
