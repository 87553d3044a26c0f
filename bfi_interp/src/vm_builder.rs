//! Provides a builder for creating instances of the BrainfuckVM struct.
use crate::{input::InputStream, vm::BrainfuckVM, vm_error::VMError};
use bfi_types::Program;
use std::{
    io::{self, BufRead, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

/// Tape length used when none is configured.
pub const DEFAULT_CELL_COUNT: NonZeroUsize = match NonZeroUsize::new(30000) {
    Some(count) => count,
    None => panic!("default cell count must be non-zero"),
};

/// Main builder object. Creates a BrainfuckVM according to various configs.
///
/// # Examples
///
/// Program from a string, capturing output in memory
///
/// ```rust
/// use bfi_interp::VMBuilder;
/// # use std::io::Cursor;
///
/// let mut output = Vec::new();
/// let mut vm = VMBuilder::new()
///     .set_program_reader(Cursor::new("++++++[>++++++++++<-]>+++++."))
///     .set_output(&mut output)
///     .build()
///     .expect("Failed!");
/// vm.interpret().expect("Failed!");
/// drop(vm);
/// assert_eq!(output, b"A");
/// ```
///
/// Setting more interesting parameters
///
/// ```rust
/// use bfi_interp::VMBuilder;
/// # use std::io::Cursor;
/// # use core::num::NonZeroUsize;
///
/// let vm = VMBuilder::new()
///     .set_program_reader(Cursor::new(",[.,]"))
///     .set_input("echo me")
///     .set_cell_count(NonZeroUsize::new(1111))
///     .build()
///     .expect("Failed!");
/// assert_eq!(vm.tape().len(), 1111);
/// ```
#[derive(Default)]
pub struct VMBuilder<'a> {
    cell_count: Option<NonZeroUsize>,
    input: Option<InputStream>,
    output_writer: Option<Box<dyn Write + 'a>>,
    diagnostics_writer: Option<Box<dyn Write + 'a>>,
    step_acknowledger: Option<Box<dyn BufRead + 'a>>,
    program: Option<Program>,
    program_file: Option<PathBuf>,
    program_reader: Option<Box<dyn Read + 'a>>,
}

impl<'a> VMBuilder<'a> {
    /// Creates a new instance of `VMBuilder`.
    pub fn new() -> Self {
        VMBuilder {
            cell_count: None,
            input: None,
            output_writer: None,
            diagnostics_writer: None,
            step_acknowledger: None,
            program: None,
            program_file: None,
            program_reader: None,
        }
    }

    /// Uses an already loaded program.
    pub fn set_program(mut self, program: Program) -> Self {
        self.program = Some(program);
        self
    }

    /// Sets a file path to read the program from
    pub fn set_program_file(mut self, filepath: PathBuf) -> Self {
        self.program_file = Some(filepath);
        self
    }

    /// Loads a program from a reader.
    pub fn set_program_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + 'a,
    {
        self.program_reader = Some(Box::new(reader));
        self
    }

    /// The bytes consumed by `,`.
    pub fn set_input<I: Into<InputStream>>(mut self, input: I) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets where `.` writes to.
    pub fn set_output<W: Write + 'a>(mut self, output: W) -> Self {
        self.output_writer = Some(Box::new(output));
        self
    }

    /// Sets where debug snapshots and step prompts are written.
    pub fn set_diagnostics<W: Write + 'a>(mut self, diagnostics: W) -> Self {
        self.diagnostics_writer = Some(Box::new(diagnostics));
        self
    }

    /// Enables single-step mode, reading one acknowledgement line from `acknowledger`
    /// after every instruction.
    pub fn set_single_step<B: BufRead + 'a>(mut self, acknowledger: B) -> Self {
        self.step_acknowledger = Some(Box::new(acknowledger));
        self
    }

    /// Determines the number of cells (memory size) the VM should initialize with.
    pub fn set_cell_count(mut self, cell_count: Option<NonZeroUsize>) -> Self {
        match cell_count {
            Some(count) => self.cell_count = Some(count),
            None => {
                log::info!("Using default cell_count of {}", DEFAULT_CELL_COUNT);
                self.cell_count = Some(DEFAULT_CELL_COUNT);
            }
        }
        self
    }

    /// Builds and returns a `BrainfuckVM` instance based on the configured options.
    pub fn build(self) -> Result<BrainfuckVM<'a>, VMError> {
        // An explicit program wins, then a reader, then a file
        let program = match (self.program, self.program_reader, self.program_file) {
            (Some(program), _, _) => program,
            (None, Some(reader), _) => Program::new(reader)?,
            (None, None, Some(program_file)) => Program::from_file(program_file)?,
            (None, None, None) => {
                return Err(VMError::Builder {
                    reason: "Program must be set by using set_program, set_program_reader or set_program_file"
                        .to_string(),
                })
            }
        };

        let input = self.input.unwrap_or_else(|| {
            log::info!("Using empty input");
            InputStream::default()
        });

        // Default IO to use stdout and stderr
        let output_writer: Box<dyn Write + 'a> = match self.output_writer {
            Some(writer) => writer,
            None => {
                log::info!("Using default stdout");
                Box::new(io::stdout())
            }
        };

        let diagnostics_writer: Box<dyn Write + 'a> = match self.diagnostics_writer {
            Some(writer) => writer,
            None => {
                log::info!("Using default stderr for diagnostics");
                Box::new(io::stderr())
            }
        };

        // If no cell count provided, default to 30,000
        let cell_count = self.cell_count.unwrap_or_else(|| {
            log::info!("Using default cell count {}", DEFAULT_CELL_COUNT);
            DEFAULT_CELL_COUNT
        });

        Ok(BrainfuckVM::new(
            program,
            cell_count,
            input,
            output_writer,
            diagnostics_writer,
            self.step_acknowledger,
        ))
    }
}
