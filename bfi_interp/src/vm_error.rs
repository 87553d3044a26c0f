use bfi_types::{HumanReadableInstruction, ProgramError};
use thiserror::Error;

// Faults that stop the machine. Each one carries the instruction it happened at,
// which displays as line:column plus the instruction name.
#[derive(Debug, Error)]
pub enum VMError {
    #[error(
        "memory pointer overflow at position {} ({instruction}): pointer would move to {pointer}, tape has {tape_len} cells",
        .instruction.index()
    )]
    MemoryOverflow {
        instruction: HumanReadableInstruction,
        pointer: usize,
        tape_len: usize,
    },
    #[error(
        "memory pointer underflow at position {} ({instruction}): pointer would move to -1",
        .instruction.index()
    )]
    MemoryUnderflow {
        instruction: HumanReadableInstruction,
    },
    #[error("IO error at position {} ({instruction}): {source}", .instruction.index())]
    Io {
        instruction: HumanReadableInstruction,
        source: std::io::Error,
    },
    #[error("no matching bracket for position {} ({instruction})", .instruction.index())]
    UnresolvedBracket {
        instruction: HumanReadableInstruction,
    },
    #[error("failed to flush output: {0}")]
    Flush(#[source] std::io::Error),
    #[error(transparent)]
    Program(#[from] ProgramError),
    // Errors occurring during the construction of the VM, typically due to misconfiguration
    #[error("builder error: {reason}")]
    Builder { reason: String },
}

impl VMError {
    /// Source position of the faulting instruction, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            VMError::MemoryOverflow { instruction, .. }
            | VMError::MemoryUnderflow { instruction }
            | VMError::Io { instruction, .. }
            | VMError::UnresolvedBracket { instruction } => Some(instruction.index()),
            VMError::Program(ProgramError::Resolve(err)) => Some(err.position()),
            VMError::Program(ProgramError::Io(_))
            | VMError::Flush(_)
            | VMError::Builder { .. } => None,
        }
    }
}
