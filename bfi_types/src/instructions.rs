use core::fmt;

/// The commands a program byte can decode to. Any other byte is a comment.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RawInstruction {
    /// `>` moves the memory pointer one cell right
    IncrementPointer,
    /// `<` moves the memory pointer one cell left
    DecrementPointer,
    /// `+` adds one to the current cell, wrapping at 255
    IncrementByte,
    /// `-` subtracts one from the current cell, wrapping at 0
    DecrementByte,
    /// `.` writes the current cell to the output sink
    OutputByte,
    /// `,` reads the next input byte into the current cell, or 0 once input is exhausted
    InputByte,
    /// `[` jumps past the matching `]` when the current cell is zero
    ConditionalForward,
    /// `]` jumps back to the matching `[` when the current cell is non-zero
    ConditionalBackward,
    /// `#` writes a snapshot of the machine to the diagnostics sink
    DebugSnapshot,
}

impl RawInstruction {
    /// Decode a single source byte. `None` means the byte is a comment.
    pub fn from_byte(byte: u8) -> Option<RawInstruction> {
        match byte {
            b'>' => Some(RawInstruction::IncrementPointer),
            b'<' => Some(RawInstruction::DecrementPointer),
            b'+' => Some(RawInstruction::IncrementByte),
            b'-' => Some(RawInstruction::DecrementByte),
            b'.' => Some(RawInstruction::OutputByte),
            b',' => Some(RawInstruction::InputByte),
            b'[' => Some(RawInstruction::ConditionalForward),
            b']' => Some(RawInstruction::ConditionalBackward),
            b'#' => Some(RawInstruction::DebugSnapshot),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            RawInstruction::IncrementPointer => '>',
            RawInstruction::DecrementPointer => '<',
            RawInstruction::IncrementByte => '+',
            RawInstruction::DecrementByte => '-',
            RawInstruction::OutputByte => '.',
            RawInstruction::InputByte => ',',
            RawInstruction::ConditionalForward => '[',
            RawInstruction::ConditionalBackward => ']',
            RawInstruction::DebugSnapshot => '#',
        }
    }
}

impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RawInstruction::IncrementPointer => "Increment Pointer",
            RawInstruction::DecrementPointer => "Decrement Pointer",
            RawInstruction::IncrementByte => "Increment Byte",
            RawInstruction::DecrementByte => "Decrement Byte",
            RawInstruction::OutputByte => "Output Byte",
            RawInstruction::InputByte => "Input Byte",
            RawInstruction::ConditionalForward => "Conditional Forward",
            RawInstruction::ConditionalBackward => "Conditional Backward",
            RawInstruction::DebugSnapshot => "Debug Snapshot",
        };
        write!(f, "{} ({})", name, self.symbol())
    }
}

/// An instruction together with where it sits in the source text.
///
/// `index` is the zero-based byte offset into the program, `line` and `column`
/// are one-based for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HumanReadableInstruction {
    instruction: RawInstruction,
    line: usize,
    column: usize,
    index: usize,
}

impl HumanReadableInstruction {
    /// `line` and `column` are zero-based here and stored one-based.
    pub fn new(
        instruction: RawInstruction,
        line: usize,
        column: usize,
        index: usize,
    ) -> Self {
        HumanReadableInstruction {
            instruction,
            line: line + 1,
            column: column + 1,
            index,
        }
    }

    pub fn raw_instruction(&self) -> RawInstruction {
        self.instruction
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for HumanReadableInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.instruction)
    }
}
