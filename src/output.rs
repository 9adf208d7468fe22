//! Pluggable line destinations.
//!
//! Sinks are registered once into a logger and written many times. Each
//! sink serializes its own physical writes; different sinks may be
//! written concurrently with respect to each other.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A registered destination for fully formatted log lines.
///
/// Implementations take `&self` and provide their own interior locking,
/// so concurrently finalizing records never interleave partial lines in
/// one destination. Write failures stay inside the sink: logging never
/// reports errors to the caller.
pub trait Output: Send + Sync {
    /// Deliver one formatted line (without its trailing newline).
    fn send_line(&self, line: &str);
}

pub(crate) fn lock_unpoisoned<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_line(stream: &mut dyn Write, line: &str) {
    // Failed writes are dropped silently: the destination may be gone,
    // but the logging call must still return normally.
    if stream.write_all(line.as_bytes()).is_err() {
        return;
    }
    if stream.write_all(b"\n").is_err() {
        return;
    }
    let _ = stream.flush();
}

/// Sink that appends lines to a file.
///
/// The file is opened lazily on the first write, in append mode, and the
/// handle stays open across calls. Every line is flushed before
/// `send_line` returns, so content is durable once the call completes.
/// A path that cannot be opened makes the sink drop lines silently.
pub struct FileOutput {
    path: PathBuf,
    /// Reserved for rotation support; currently inert.
    pub max_size: Option<u64>,
    /// Reserved for rotation support; currently inert.
    pub rollover_count: u32,
    file: Mutex<Option<File>>,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: None,
            rollover_count: 0,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Output for FileOutput {
    fn send_line(&self, line: &str) {
        // One guard spans open-if-needed, write, and flush.
        let mut guard = lock_unpoisoned(&self.file);
        if guard.is_none() {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => *guard = Some(file),
                Err(_) => return,
            }
        }
        if let Some(file) = guard.as_mut() {
            write_line(file, line);
        }
    }
}

/// Shared handle to an externally owned output channel.
pub type SharedStream = Arc<Mutex<dyn Write + Send>>;

/// Sink that writes to an externally owned stream, such as standard
/// output or a shared in-memory buffer. The stream is shared rather than
/// owned; the handle keeps it alive for as long as the sink is
/// registered.
pub struct StreamOutput {
    stream: SharedStream,
}

impl StreamOutput {
    pub fn new(stream: SharedStream) -> Self {
        Self { stream }
    }

    /// Sink over the process standard output.
    pub fn stdout() -> Self {
        Self::new(Arc::new(Mutex::new(io::stdout())))
    }
}

impl Output for StreamOutput {
    fn send_line(&self, line: &str) {
        let mut stream = lock_unpoisoned(&self.stream);
        write_line(&mut *stream, line);
    }
}
