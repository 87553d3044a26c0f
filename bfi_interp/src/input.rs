/// The bytes `,` reads from, consumed front to back exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStream {
    bytes: Vec<u8>,
    cursor: usize,
}

impl InputStream {
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self {
        InputStream {
            bytes: bytes.into(),
            cursor: 0,
        }
    }

    /// Take the next byte, or `None` once the stream is exhausted.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }
}

impl From<&str> for InputStream {
    fn from(value: &str) -> Self {
        InputStream::new(value.as_bytes())
    }
}

impl From<String> for InputStream {
    fn from(value: String) -> Self {
        InputStream::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for InputStream {
    fn from(value: Vec<u8>) -> Self {
        InputStream::new(value)
    }
}
