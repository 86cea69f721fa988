//! Serialized line output shared between concurrent writers.

use std::io::Write;
use std::sync::Mutex;

/// A shared output sink that writes one complete line per lock hold, so
/// lines from concurrent writers never interleave at the character level.
pub struct LineSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Writes `line` followed by a newline while holding the lock.
    ///
    /// A poisoned lock is recovered rather than propagated: a writer that
    /// panicked mid-line must not wedge every later phase of the program.
    pub fn writeln(&self, line: &str) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(guard, "{line}");
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}
