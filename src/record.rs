//! The per-call log record.

use std::fmt::{self, Write as _};
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::output::Output;

/// Ephemeral accumulator returned by [`crate::Logger::log`].
///
/// The proceed/suppress decision is computed once, when the record is
/// created, and never revisited — filter changes made afterwards do not
/// affect a live record. Dropping the record performs the
/// flush-or-discard exactly once, on every exit path: a suppressed
/// record does no I/O, an emitted one sends the accumulated line to
/// every sink that was registered at creation time, in registration
/// order.
pub struct LogRecord {
    line: String,
    proceed: bool,
    outputs: Vec<Arc<dyn Output>>,
}

impl LogRecord {
    pub(crate) fn new(prefix: String, proceed: bool, outputs: Vec<Arc<dyn Output>>) -> Self {
        Self {
            line: prefix,
            proceed,
            outputs,
        }
    }

    /// Append any displayable value to the message body. Returns the
    /// record so appends can be chained on one statement.
    pub fn append(mut self, value: impl fmt::Display) -> Self {
        let _ = write!(self.line, "{value}");
        self
    }

    /// Whether this record will be sent to the sinks when it goes out of
    /// scope.
    pub fn proceeds(&self) -> bool {
        self.proceed
    }
}

impl fmt::Write for LogRecord {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.line.push_str(s);
        Ok(())
    }
}

impl Drop for LogRecord {
    fn drop(&mut self) {
        if !self.proceed {
            return;
        }
        let line = mem::take(&mut self.line);
        for output in &self.outputs {
            // A panicking sink must not escape the record's destruction
            // boundary; the remaining sinks still receive the line.
            let _ = panic::catch_unwind(AssertUnwindSafe(|| output.send_line(&line)));
        }
    }
}
