use crate::instructions::RawInstruction;
use crate::jump_table::JumpTable;
use core::fmt;

/// Number of leading tape cells captured in every snapshot.
pub const MEMORY_WINDOW: usize = 16;

// Represents the state of the VM right after an instruction, useful for debugging or state inspection
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VMState {
    cell_value: u8,
    head: usize,
    instruction_index: usize,
    last_instruction: Option<RawInstruction>,
    instructions_processed: usize,
    memory_window: Vec<u8>,
}

impl VMState {
    pub fn new(
        cell_value: u8,
        head: usize,
        instruction_index: usize,
        last_instruction: Option<RawInstruction>,
        instructions_processed: usize,
        tape: &[u8],
    ) -> Self {
        VMState {
            cell_value,
            head,
            instruction_index,
            last_instruction,
            instructions_processed,
            memory_window: tape.iter().take(MEMORY_WINDOW).copied().collect(),
        }
    }

    /// Pair the state with the program's jump table for the diagnostic rendering.
    pub fn with_jump_table<'a>(&'a self, jump_table: &'a JumpTable) -> DebugSnapshot<'a> {
        DebugSnapshot {
            state: self,
            jump_table,
        }
    }

    pub fn cell_value(&self) -> u8 {
        self.cell_value
    }

    pub fn head(&self) -> usize {
        self.head
    }

    /// Program counter after the instruction has taken effect.
    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    /// `None` only for the state captured at halt.
    pub fn raw_instruction(&self) -> Option<RawInstruction> {
        self.last_instruction
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }

    pub fn memory_window(&self) -> &[u8] {
        &self.memory_window
    }
}

impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_block(f, None)
    }
}

/// A `VMState` rendered together with a borrowed jump table.
#[derive(Debug, Clone, Copy)]
pub struct DebugSnapshot<'a> {
    state: &'a VMState,
    jump_table: &'a JumpTable,
}

impl fmt::Display for DebugSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.write_block(f, Some(self.jump_table))
    }
}

impl VMState {
    fn write_block(
        &self,
        f: &mut fmt::Formatter<'_>,
        jump_table: Option<&JumpTable>,
    ) -> fmt::Result {
        let printable = if self.cell_value.is_ascii_graphic() || self.cell_value == b' ' {
            self.cell_value as char
        } else {
            '.'
        };
        writeln!(f, "-- Debug State --")?;
        writeln!(f, "Code Pointer: {}", self.instruction_index)?;
        writeln!(f, "Memory Pointer: {}", self.head)?;
        writeln!(
            f,
            "Current Cell Value: {} ('{}')",
            self.cell_value, printable
        )?;
        writeln!(
            f,
            "Memory Dump (0-{}): {:?}",
            self.memory_window.len().saturating_sub(1),
            self.memory_window
        )?;
        if let Some(jump_table) = jump_table {
            writeln!(f, "Loop Map: {}", jump_table)?;
        }
        if let Some(instruction) = self.last_instruction {
            writeln!(f, "Last instruction: {}", instruction)?;
        }
        writeln!(f, "Instructions processed: {}", self.instructions_processed)?;
        write!(f, "------------------")
    }
}

// Extends VMState with a snapshot of the VM's tape at the end of program execution,
// providing a complete picture of the final program state
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct VMStateFinal {
    state: VMState,
    tape: Vec<u8>,
}

impl VMStateFinal {
    pub fn new(state: VMState, tape: Vec<u8>) -> Self {
        VMStateFinal { state, tape }
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }
}

impl fmt::Display for VMStateFinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let non_zero_cells_str = self
            .tape
            .iter()
            .enumerate()
            .filter(|&(_, value)| *value != 0)
            .map(|(index, value)| format!("[{}, {}]", index, value))
            .collect::<Vec<String>>()
            .join(",");

        write!(f, "{}\nTape:\n{}", self.state, non_zero_cells_str)
    }
}
