use std::cell::RefCell;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;
use tempfile::NamedTempFile;

pub const TEST_FILE_CONTENT: &str = "+[-[<<[+[--->]-[<<<]]]>>>-]";
// writeln! does add an extra newline character at the end, but that is a
// comment byte so it doesn't count as an instruction
pub const TEST_FILE_NUM_INSTRUCTIONS: usize = TEST_FILE_CONTENT.len();

pub struct TestFile {
    file: NamedTempFile,
}

impl TestFile {
    pub fn new() -> io::Result<Self> {
        Self::with_content(TEST_FILE_CONTENT)
    }

    /// A temp file holding `content` followed by a newline.
    pub fn with_content(content: &str) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", content)?;

        // Seek to the start of the file after writing so it can be read back
        file.seek(SeekFrom::Start(0))?;
        Ok(TestFile { file })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl Read for TestFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Need to borrow it mutably to perform reads
        self.file.as_file_mut().read(buf)
    }
}

pub struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Pretend everything's okay and we wrote the whole buffer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Nothing to flush, so just say it worked.
        Ok(())
    }
}

/// A writer that keeps everything written to it, readable after the writer
/// itself has been handed off to a VM.
#[derive(Clone, Default)]
pub struct SharedWriter {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.buffer.borrow().clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer whose every write fails, for exercising sink errors.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
