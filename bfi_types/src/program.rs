use crate::error::{ProgramError, ResolveError};
use crate::instructions::{HumanReadableInstruction, RawInstruction};
use crate::jump_table::JumpTable;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// A loaded program: the raw source bytes and their resolved jump table.
///
/// Positions everywhere refer to byte offsets into the source, comments included,
/// so error positions line up with what the user sees in their file.
#[derive(Debug, Clone)]
pub struct Program {
    source: Vec<u8>,
    jump_table: JumpTable,
    // Byte offset at which each line starts, for turning positions into line:column
    line_starts: Vec<usize>,
}

impl Program {
    /// Read the whole program from `reader` and resolve its brackets.
    pub fn new<R: Read>(reader: R) -> Result<Self, ProgramError> {
        let source = Self::read_data(reader)?;
        Ok(Self::from_bytes(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProgramError> {
        log::info!("Loading program from {}", path.as_ref().display());
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }

    /// Build a program from bytes already in memory.
    pub fn from_bytes<B: Into<Vec<u8>>>(source: B) -> Result<Self, ResolveError> {
        let source = source.into();
        let jump_table = JumpTable::resolve(&source)?;
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, &byte)| byte == b'\n')
                    .map(|(index, _)| index + 1),
            )
            .collect();

        Ok(Program {
            source,
            jump_table,
            line_starts,
        })
    }

    fn read_data<R: Read>(mut reader: R) -> Result<Vec<u8>, std::io::Error> {
        let mut source = Vec::new();
        reader.read_to_end(&mut source)?;
        Ok(source)
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.jump_table
    }

    pub fn matching_bracket(&self, index: usize) -> Option<usize> {
        self.jump_table.get(index)
    }

    /// The instruction at `index`, or `None` for comments and positions past the end.
    pub fn instruction_at(&self, index: usize) -> Option<RawInstruction> {
        self.source
            .get(index)
            .and_then(|&byte| RawInstruction::from_byte(byte))
    }

    /// Number of bytes that decode to an instruction.
    pub fn instruction_count(&self) -> usize {
        self.source
            .iter()
            .filter(|&&byte| RawInstruction::from_byte(byte).is_some())
            .count()
    }

    /// Zero-based line and column of the byte at `index`.
    pub fn line_column(&self, index: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        (line, index - self.line_starts[line])
    }

    /// Attach line and column information to the instruction at `index`.
    ///
    /// Returns `None` if `index` does not hold an instruction.
    pub fn locate(&self, index: usize) -> Option<HumanReadableInstruction> {
        let instruction = self.instruction_at(index)?;
        let (line, column) = self.line_column(index);
        Some(HumanReadableInstruction::new(
            instruction,
            line,
            column,
            index,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfi_test_utils::{TestFile, TEST_FILE_CONTENT, TEST_FILE_NUM_INSTRUCTIONS};

    #[test]
    fn test_read_data() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::new(TestFile::new()?)?;

        // writeln! adds a trailing newline, which is kept as a comment byte
        assert_eq!(program.len(), TEST_FILE_CONTENT.len() + 1);
        assert_eq!(program.instruction_count(), TEST_FILE_NUM_INSTRUCTIONS);

        // "+[-[<<[+[--->]-[<<<]]]>>>-]"
        let expected = [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalForward,  // [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::IncrementPointer,    // >
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalBackward, // ]
        ];

        for (i, raw_instruction) in expected.iter().enumerate() {
            let located = program.locate(i).expect("instruction expected");
            assert_eq!(located.raw_instruction(), *raw_instruction);
            assert_eq!(located.line(), 1);
            assert_eq!(located.column(), i + 1);
        }
        assert_eq!(program.instruction_at(TEST_FILE_CONTENT.len()), None);

        Ok(())
    }

    #[test]
    fn test_locate_across_lines() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::from_bytes("++ add two\n[-]\n\n  .")?;

        let close = program.locate(13).expect("bracket on line 2");
        assert_eq!(close.raw_instruction(), RawInstruction::ConditionalBackward);
        assert_eq!((close.line(), close.column()), (2, 3));

        let output = program.locate(18).expect("output on line 4");
        assert_eq!(output.raw_instruction(), RawInstruction::OutputByte);
        assert_eq!((output.line(), output.column()), (4, 3));

        // Comment bytes have no instruction to locate
        assert!(program.locate(3).is_none());
        assert_eq!(program.matching_bracket(11), Some(13));
        Ok(())
    }

    #[test]
    fn test_unbalanced_program_is_rejected() {
        match Program::new("+[".as_bytes()) {
            Err(ProgramError::Resolve(ResolveError::UnmatchedOpening { position })) => {
                assert_eq!(position, 1)
            }
            other => panic!("Expected unmatched opening bracket, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = Program::from_file(dir.path().join("does-not-exist.bf"));
        assert!(matches!(result, Err(ProgramError::Io(_))));
    }
}
