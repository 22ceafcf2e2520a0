use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only sink for failure diagnostics, shared by every operation.
///
/// The log is injected into the engine rather than reached through a
/// global, so tests can capture output without touching the real
/// filesystem. Entries are write-only; the engine never reads them back.
pub trait FailureLog: Send + Sync {
    /// Append one failure line. Implementations must write whole lines,
    /// with at most one writer appending at a time.
    fn append(&self, line: &str);
}

/// Plain-text log file: one timestamped failure per line, created on the
/// first failure, never rotated or truncated.
pub struct FileLog {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLog {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FailureLog for FileLog {
    fn append(&self, line: &str) {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let stamped = format!("[{}] {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), line);
        // A failed log write has no reporting channel of its own.
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = file.write_all(stamped.as_bytes());
        }
    }
}

/// In-memory log, used by tests to assert on what was recorded.
#[derive(Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl FailureLog for MemoryLog {
    fn append(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}
