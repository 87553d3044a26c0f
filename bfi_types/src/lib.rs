//! # Program Representation and State Snapshots
//!
//! Provides the pieces of the interpreter that do not need a running machine:
//! decoding source bytes into instructions, resolving loop brackets into a jump
//! table, and the snapshot types the virtual machine reports its state with.

// Bracket and load errors.
pub mod error;

// Decoding of single source bytes into instructions.
pub mod instructions;

// Loop bracket resolution.
pub mod jump_table;

// Reading programs from files, readers or byte buffers.
pub mod program;

// Snapshots of the virtual machine during and after execution.
pub mod state;

pub use error::{ProgramError, ResolveError};
pub use instructions::{HumanReadableInstruction, RawInstruction};
pub use jump_table::JumpTable;
pub use program::Program;
pub use state::{DebugSnapshot, VMState, VMStateFinal};
