use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Cursor, Read, Result as IoResult, Write};
use std::rc::Rc;

/// The shell's default streams: where prompts and answers are read from,
/// where output goes when it is not redirected, and where failures are
/// reported.
pub struct Console {
    pub input: Box<dyn BufRead>,
    pub output: Box<dyn Write>,
    pub error: Box<dyn Write>,
}

impl Console {
    /// Console bound to the process's stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self {
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
            error: Box::new(io::stderr()),
        }
    }

    /// Console reading `input` and capturing everything written to it.
    ///
    /// Returns the console and handles to the captured output and error text.
    pub fn capture(input: &str) -> (Self, Captured) {
        let (output, output_buf) = MemWriter::with_handle();
        let (error, error_buf) = MemWriter::with_handle();
        let console = Self {
            input: Box::new(MemReader::new(input.as_bytes().to_vec())),
            output: Box::new(output),
            error: Box::new(error),
        };
        (
            console,
            Captured {
                output: output_buf,
                error: error_buf,
            },
        )
    }

    pub fn flush(&mut self) -> IoResult<()> {
        self.output.flush()?;
        self.error.flush()
    }
}

/// Text written to a console created by [`Console::capture`].
#[derive(Clone)]
pub struct Captured {
    output: Rc<RefCell<Vec<u8>>>,
    error: Rc<RefCell<Vec<u8>>>,
}

impl Captured {
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output.borrow()).into_owned()
    }

    pub fn error(&self) -> String {
        String::from_utf8_lossy(&self.error.borrow()).into_owned()
    }

    /// Forget everything captured so far.
    pub fn clear(&self) {
        self.output.borrow_mut().clear();
        self.error.borrow_mut().clear();
    }
}

/// Memory-backed reader standing in for the terminal in tests.
pub struct MemReader {
    cursor: Cursor<Vec<u8>>,
}

impl MemReader {
    /// Create a MemReader that will read from the provided buffer.
    pub fn new(buf: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }
}

impl Read for MemReader {
    fn read(&mut self, out: &mut [u8]) -> IoResult<usize> {
        self.cursor.read(out)
    }
}

impl BufRead for MemReader {
    fn fill_buf(&mut self) -> IoResult<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

/// Memory-backed writer for capturing console output.
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self {
            buf: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
