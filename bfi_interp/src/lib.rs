//! # Execution Engine
//!
//! Runs programs loaded by `bfi_types` on a fixed-length tape of byte cells.
//! The VM walks a program counter over the source text, skipping comment bytes,
//! and stops either at the end of the program or at the first pointer fault.
//!
//! ```rust
//! use bfi_interp::run;
//! use bfi_types::Program;
//! use std::num::NonZeroUsize;
//!
//! let program = Program::from_bytes(",.").expect("balanced");
//! let mut output = Vec::new();
//! run(program, "Z", NonZeroUsize::new(30000).unwrap(), &mut output).expect("runs");
//! assert_eq!(output, b"Z");
//! ```

// Bytes consumed by the input instruction.
pub mod input;

// The virtual machine itself.
pub mod vm;

// Fluent configuration for the virtual machine.
pub mod vm_builder;

// Faults raised while building or running the virtual machine.
pub mod vm_error;

// Step-by-step execution.
pub mod vm_iterator;

pub use input::InputStream;
pub use vm::BrainfuckVM;
pub use vm_builder::{VMBuilder, DEFAULT_CELL_COUNT};
pub use vm_error::VMError;
pub use vm_iterator::VMIterator;

use bfi_types::{Program, VMStateFinal};
use std::{io::Write, num::NonZeroUsize};

/// Run `program` to completion against `input`, writing `.` output to `output`.
///
/// Diagnostics from `#` go to stderr.
pub fn run<I, W>(
    program: Program,
    input: I,
    cell_count: NonZeroUsize,
    output: W,
) -> Result<VMStateFinal, VMError>
where
    I: Into<InputStream>,
    W: Write,
{
    VMBuilder::new()
        .set_program(program)
        .set_input(input)
        .set_cell_count(Some(cell_count))
        .set_output(output)
        .build()?
        .interpret()
}
