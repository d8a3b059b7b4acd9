// Console: the line sink every user-visible message goes through.

use std::fmt::Display;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Cloneable handle to a shared line-oriented writer.
///
/// Demos and the runner print through the same `Console` so that output
/// stays ordered and can be captured in tests.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// Console writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::from_writer(std::io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console writing into memory, plus a handle to read what was written.
    pub fn capture() -> (Self, Captured) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let console = Self::from_writer(SharedBuffer(Arc::clone(&buffer)));
        (console, Captured(buffer))
    }

    /// Write `text` followed by a newline.
    ///
    /// Write failures (closed pipe, full disk) are logged and dropped; a
    /// lost progress line must never fail a unit.
    pub fn line(&self, text: impl Display) {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(sink, "{text}").and_then(|_| sink.flush()) {
            tracing::debug!(error = %e, "console write failed");
        }
    }

    /// Write a horizontal rule of `width` `=` characters.
    pub fn rule(&self, width: usize) {
        self.line("=".repeat(width));
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Read side of [`Console::capture`].
#[derive(Clone)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_collects_lines_in_order() {
        let (console, captured) = Console::capture();
        console.line("first");
        console.line(format_args!("second {}", 2));
        assert_eq!(captured.lines(), vec!["first", "second 2"]);
    }

    #[test]
    fn test_clones_share_the_same_sink() {
        let (console, captured) = Console::capture();
        let other = console.clone();
        console.line("a");
        other.line("b");
        assert_eq!(captured.contents(), "a\nb\n");
    }

    #[test]
    fn test_rule_width() {
        let (console, captured) = Console::capture();
        console.rule(50);
        assert_eq!(captured.lines(), vec!["=".repeat(50)]);
    }

    #[test]
    fn test_embedded_newlines_are_kept() {
        let (console, captured) = Console::capture();
        console.line("\n=== Demo 1: Hello World ===");
        assert_eq!(captured.lines(), vec!["", "=== Demo 1: Hello World ==="]);
    }
}
