//! Console output channel.

use core_types::Value;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Console output writer trait
pub trait ConsoleWriter: Send + Sync {
    /// Write one line to the console output
    fn write(&self, line: &str);
}

/// Writer that prints each line to stdout
#[derive(Debug, Default)]
pub struct StdoutWriter;

impl ConsoleWriter for StdoutWriter {
    fn write(&self, line: &str) {
        println!("{}", line);
    }
}

/// Writer that records lines in memory
#[derive(Debug, Default, Clone)]
pub struct CaptureWriter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureWriter {
    /// Creates a writer appending to `lines`.
    pub fn new(lines: Arc<Mutex<Vec<String>>>) -> Self {
        Self { lines }
    }
}

impl ConsoleWriter for CaptureWriter {
    fn write(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Cloneable console handle.
///
/// Clones write through the same writer, so a clone moved into a timer
/// callback interleaves correctly with the caller's output.
#[derive(Clone)]
pub struct Console {
    writer: Arc<dyn ConsoleWriter>,
}

impl Console {
    /// Console printing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(StdoutWriter)
    }

    /// Console backed by any writer
    pub fn with_writer<W: ConsoleWriter + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(writer),
        }
    }

    /// Console recording into memory, plus the shared line buffer.
    pub fn capture() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (Self::with_writer(CaptureWriter::new(lines.clone())), lines)
    }

    /// Logs a value in console format.
    pub fn log(&self, value: &Value) {
        self.writer.write(&value.to_string());
    }

    /// Logs a literal line.
    pub fn log_str(&self, line: &str) {
        self.writer.write(line);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Console {{ .. }}")
    }
}
