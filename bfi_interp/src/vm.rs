use crate::input::InputStream;
use crate::vm_error::VMError;
use bfi_types::{HumanReadableInstruction, Program, RawInstruction, VMState, VMStateFinal};
use std::{
    io::{BufRead, Write},
    num::NonZeroUsize,
};

const STEP_PROMPT: &str = "Press Enter to continue...";

// Represents the VM capable of interpreting Brainfuck programs. It manages the execution environment
// including the tape (memory), the program counter, input/output streams, and execution state.
pub struct BrainfuckVM<'a> {
    tape: Vec<u8>,
    head: usize,
    instruction_index: usize,
    program: Program,
    input: InputStream,
    output_writer: Box<dyn Write + 'a>,
    diagnostics_writer: Box<dyn Write + 'a>,
    // Present only in single-step mode; one line is read from it after every instruction
    step_acknowledger: Option<Box<dyn BufRead + 'a>>,
    instructions_processed: usize,
}

impl<'a> BrainfuckVM<'a> {
    // Constructs a new VM instance with specified settings
    pub fn new(
        program: Program,
        cell_count: NonZeroUsize,
        input: InputStream,
        output_writer: Box<dyn Write + 'a>,
        diagnostics_writer: Box<dyn Write + 'a>,
        step_acknowledger: Option<Box<dyn BufRead + 'a>>,
    ) -> Self {
        BrainfuckVM {
            tape: vec![0; cell_count.get()],
            head: 0,
            instruction_index: 0,
            program,
            input,
            output_writer,
            diagnostics_writer,
            step_acknowledger,
            instructions_processed: 0,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }

    pub fn is_single_step(&self) -> bool {
        self.step_acknowledger.is_some()
    }

    pub fn is_halted(&self) -> bool {
        self.instruction_index >= self.program.len()
    }

    /// Capture the machine as it stands. `last_instruction` is what just ran, if anything.
    pub fn snapshot(&self, last_instruction: Option<RawInstruction>) -> VMState {
        VMState::new(
            self.tape[self.head],
            self.head,
            self.instruction_index,
            last_instruction,
            self.instructions_processed,
            &self.tape,
        )
    }

    fn locate(&self, instruction: RawInstruction) -> HumanReadableInstruction {
        self.locate_at(instruction, self.instruction_index)
    }

    fn locate_at(&self, instruction: RawInstruction, index: usize) -> HumanReadableInstruction {
        let (line, column) = self.program.line_column(index);
        HumanReadableInstruction::new(instruction, line, column, index)
    }

    fn get_bracket_position(&self, instruction: RawInstruction) -> Result<usize, VMError> {
        self.program
            .matching_bracket(self.instruction_index)
            .ok_or_else(|| VMError::UnresolvedBracket {
                instruction: self.locate(instruction),
            })
    }

    // Moves the program counter past comment bytes, stopping on an instruction or the end
    fn skip_comments(&mut self) -> Option<RawInstruction> {
        while self.instruction_index < self.program.len() {
            if let Some(instruction) = self.program.instruction_at(self.instruction_index) {
                return Some(instruction);
            }
            self.instruction_index += 1;
        }
        None
    }

    // Executes the next instruction. Returns None once the program counter has left the program.
    fn process_instruction(&mut self) -> Result<Option<RawInstruction>, VMError> {
        let Some(instruction) = self.skip_comments() else {
            return Ok(None);
        };
        log::debug!(
            "Processing instruction {} at {}",
            instruction,
            self.instruction_index
        );

        // The +1 below moves past the bracket a jump lands on, which is where loop bodies resume
        let position = self.instruction_index;
        let mut next_index = position;
        match instruction {
            RawInstruction::IncrementPointer => self.move_head_right(instruction)?,
            RawInstruction::DecrementPointer => self.move_head_left(instruction)?,
            RawInstruction::IncrementByte => {
                self.tape[self.head] = self.tape[self.head].wrapping_add(1);
            }
            RawInstruction::DecrementByte => {
                self.tape[self.head] = self.tape[self.head].wrapping_sub(1);
            }
            RawInstruction::OutputByte => self.write_value(instruction)?,
            RawInstruction::InputByte => self.read_value(),
            RawInstruction::ConditionalForward => {
                if self.tape[self.head] == 0 {
                    next_index = self.get_bracket_position(instruction)?;
                    log::debug!("Jumping forward to {}", next_index);
                }
            }
            RawInstruction::ConditionalBackward => {
                if self.tape[self.head] != 0 {
                    next_index = self.get_bracket_position(instruction)?;
                    log::debug!("Jumping back to {}", next_index);
                }
            }
            RawInstruction::DebugSnapshot => {
                let state = self.snapshot(Some(instruction));
                self.write_diagnostics(instruction, position, &state)?;
            }
        }

        self.instruction_index = next_index + 1;
        self.instructions_processed += 1;

        if self.step_acknowledger.is_some() {
            self.pause(instruction, position)?;
        }

        Ok(Some(instruction))
    }

    // Executes a single instruction and reports the state right after it.
    // Returns Ok(None) when the program has already finished.
    pub fn interpret_step(&mut self) -> Result<Option<VMState>, VMError> {
        Ok(self
            .process_instruction()?
            .map(|instruction| self.snapshot(Some(instruction))))
    }

    // Runs the entire program to completion or until an error occurs
    pub fn interpret(&mut self) -> Result<VMStateFinal, VMError> {
        let result = loop {
            match self.process_instruction() {
                Ok(Some(_)) => continue,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        // Whatever was written before a fault stays written
        let flushed = self.output_writer.flush();
        if let Err(e) = result {
            log::debug!("Halted on fault: {}", e);
            if let Err(flush_err) = flushed {
                log::warn!("Failed to flush output after fault: {}", flush_err);
            }
            return Err(e);
        }
        flushed.map_err(VMError::Flush)?;

        log::info!(
            "Program halted after {} instructions",
            self.instructions_processed
        );
        Ok(VMStateFinal::new(self.snapshot(None), self.tape.clone()))
    }

    fn move_head_left(&mut self, instruction: RawInstruction) -> Result<(), VMError> {
        if self.head == 0 {
            return Err(VMError::MemoryUnderflow {
                instruction: self.locate(instruction),
            });
        }
        self.head -= 1;
        Ok(())
    }

    fn move_head_right(&mut self, instruction: RawInstruction) -> Result<(), VMError> {
        if self.head + 1 >= self.tape.len() {
            return Err(VMError::MemoryOverflow {
                instruction: self.locate(instruction),
                pointer: self.head + 1,
                tape_len: self.tape.len(),
            });
        }
        self.head += 1;
        Ok(())
    }

    fn read_value(&mut self) {
        // Exhausted input reads as zero
        self.tape[self.head] = self.input.next_byte().unwrap_or(0);
    }

    fn write_value(&mut self, instruction: RawInstruction) -> Result<(), VMError> {
        let value = self.tape[self.head];
        self.output_writer
            .write_all(&[value])
            .map_err(|source| VMError::Io {
                instruction: self.locate(instruction),
                source,
            })
    }

    fn write_diagnostics(
        &mut self,
        instruction: RawInstruction,
        position: usize,
        state: &VMState,
    ) -> Result<(), VMError> {
        let snapshot = state.with_jump_table(self.program.jump_table());
        writeln!(self.diagnostics_writer, "\n{}", snapshot)
            .and_then(|_| self.diagnostics_writer.flush())
            .map_err(|source| VMError::Io {
                instruction: self.locate_at(instruction, position),
                source,
            })
    }

    // Single-step mode: show the state, then block until a line arrives on the acknowledger.
    // `position` is where the instruction that just ran sits; the program counter has moved on.
    fn pause(&mut self, instruction: RawInstruction, position: usize) -> Result<(), VMError> {
        let state = self.snapshot(Some(instruction));
        self.write_diagnostics(instruction, position, &state)?;

        let prompted = self
            .output_writer
            .flush()
            .and_then(|_| write!(self.diagnostics_writer, "{}", STEP_PROMPT))
            .and_then(|_| self.diagnostics_writer.flush());
        if let Err(source) = prompted {
            return Err(VMError::Io {
                instruction: self.locate_at(instruction, position),
                source,
            });
        }

        let mut line = String::new();
        let read = match self.step_acknowledger.as_mut() {
            Some(acknowledger) => acknowledger.read_line(&mut line),
            None => return Ok(()),
        };
        match read {
            Ok(0) => {
                log::warn!("Step acknowledgements ended, running to completion");
                self.step_acknowledger = None;
            }
            Ok(_) => {}
            Err(source) => {
                return Err(VMError::Io {
                    instruction: self.locate_at(instruction, position),
                    source,
                })
            }
        }
        Ok(())
    }
}
