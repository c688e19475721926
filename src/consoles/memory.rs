//! In-memory console for tests and embedding

use crate::core::markup;
use crate::core::{Console, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// A line as handed to the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub raw: String,
    pub markup: bool,
}

impl CapturedLine {
    /// The line with markup removed, if it carried any
    pub fn text(&self) -> String {
        if self.markup {
            markup::strip(&self.raw)
        } else {
            self.raw.clone()
        }
    }
}

/// Captures every line in memory.
///
/// Clones share the same buffer, so keep one clone and hand the other to
/// the logger.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines exactly as received
    pub fn captured(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    /// Captured lines with markup removed
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(CapturedLine::text).collect()
    }

    /// Captured lines with markup intact
    pub fn raw_lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|line| line.raw.clone()).collect()
    }

    /// All lines with markup removed, each ending in a newline
    pub fn output(&self) -> String {
        self.lines().into_iter().map(|line| line + "\n").collect()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Console for MemoryConsole {
    fn print(&mut self, line: &str, markup: bool) -> Result<()> {
        self.lines.lock().push(CapturedLine {
            raw: line.to_string(),
            markup,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let console = MemoryConsole::new();
        let mut handle = console.clone();
        handle.print("[red]one[/]", true).unwrap();
        handle.print("[two]", false).unwrap();

        assert_eq!(console.len(), 2);
        assert_eq!(console.lines(), ["one", "[two]"]);
        assert_eq!(console.raw_lines(), ["[red]one[/]", "[two]"]);
        assert_eq!(console.output(), "one\n[two]\n");

        console.clear();
        assert!(handle.is_empty());
    }
}
