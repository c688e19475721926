//! Console over any `io::Write`

use crate::core::markup;
use crate::core::{Console, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes lines to any writer with markup removed
///
/// # Example
///
/// ```
/// use logaroo::{args, Logger, WriterConsole};
///
/// let logger = Logger::with_console(WriterConsole::new(Vec::new()));
/// logger.info("buffered", args!()).unwrap();
/// logger.flush().unwrap();
/// ```
pub struct WriterConsole<W: Write + Send> {
    writer: W,
    keep_markup: bool,
}

impl<W: Write + Send> WriterConsole<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            keep_markup: false,
        }
    }

    /// Write markup tags as-is instead of stripping them
    #[must_use]
    pub fn keep_markup(mut self, keep: bool) -> Self {
        self.keep_markup = keep;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterConsole<BufWriter<File>> {
    /// Append to a file, creating it if needed
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|e| {
                LoggerError::io_operation(format!("open {}", path.as_ref().display()), e)
            })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> Console for WriterConsole<W> {
    fn print(&mut self, line: &str, markup: bool) -> Result<()> {
        if markup && !self.keep_markup {
            writeln!(self.writer, "{}", markup::strip(line))?;
        } else {
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markup() {
        let mut console = WriterConsole::new(Vec::new());
        console.print("[green]ok[/] done", true).unwrap();
        console.print("[kept]", false).unwrap();
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "ok done\n[kept]\n"
        );
    }

    #[test]
    fn test_keep_markup() {
        let mut console = WriterConsole::new(Vec::new()).keep_markup(true);
        console.print("[green]ok[/]", true).unwrap();
        assert_eq!(console.get_ref().as_slice(), b"[green]ok[/]\n");
    }
}
