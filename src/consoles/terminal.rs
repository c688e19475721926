//! Terminal console

use crate::core::markup::{self, Span};
use crate::core::{Console, LoggerError, Result};
use std::io::Write;

/// Standard stream a [`TerminalConsole`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes lines to stdout or stderr, turning markup into ANSI styles.
///
/// Without the `console` feature, or with colors disabled, markup tags are
/// stripped instead.
pub struct TerminalConsole {
    stream: Stream,
    use_colors: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            stream: Stream::Stdout,
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Write to stderr instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use logaroo::consoles::{Stream, TerminalConsole};
    ///
    /// let console = TerminalConsole::new().with_stream(Stream::Stderr);
    /// assert_eq!(console.stream(), Stream::Stderr);
    /// ```
    #[must_use]
    pub fn with_stream(mut self, stream: Stream) -> Self {
        self.stream = stream;
        self
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    fn render(&self, line: &str, markup: bool) -> String {
        if !markup {
            return line.to_string();
        }
        let spans = markup::parse(line);
        if self.use_colors {
            spans.iter().map(styled).collect()
        } else {
            spans.into_iter().map(|span| span.text).collect()
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "console")]
fn styled(span: &Span) -> String {
    use crate::core::markup::Color;
    use colored::Colorize;

    fn ansi(color: Color) -> colored::Color {
        match color {
            Color::Black => colored::Color::Black,
            Color::Red => colored::Color::Red,
            Color::Green => colored::Color::Green,
            Color::Yellow => colored::Color::Yellow,
            Color::Blue => colored::Color::Blue,
            Color::Magenta => colored::Color::Magenta,
            Color::Cyan => colored::Color::Cyan,
            Color::White => colored::Color::White,
            Color::BrightBlack => colored::Color::BrightBlack,
            Color::BrightRed => colored::Color::BrightRed,
            Color::BrightGreen => colored::Color::BrightGreen,
            Color::BrightYellow => colored::Color::BrightYellow,
            Color::BrightBlue => colored::Color::BrightBlue,
            Color::BrightMagenta => colored::Color::BrightMagenta,
            Color::BrightCyan => colored::Color::BrightCyan,
            Color::BrightWhite => colored::Color::BrightWhite,
        }
    }

    let style = span.style;
    if style.is_plain() {
        return span.text.clone();
    }

    let mut out = span.text.normal();
    if let Some(fg) = style.fg {
        out = out.color(ansi(fg));
    }
    if let Some(bg) = style.bg {
        out = out.on_color(ansi(bg));
    }
    if style.bold {
        out = out.bold();
    }
    if style.dim {
        out = out.dimmed();
    }
    if style.italic {
        out = out.italic();
    }
    if style.underline {
        out = out.underline();
    }
    if style.reverse {
        out = out.reversed();
    }
    if style.strikethrough {
        out = out.strikethrough();
    }
    out.to_string()
}

#[cfg(not(feature = "console"))]
fn styled(span: &Span) -> String {
    span.text.clone()
}

impl Console for TerminalConsole {
    fn print(&mut self, line: &str, markup: bool) -> Result<()> {
        let rendered = self.render(line, markup);
        let written = match self.stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", rendered),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", rendered),
        };
        written.map_err(|e| LoggerError::io_operation("write to terminal", e))
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_colors_strips_markup() {
        let console = TerminalConsole::with_colors(false);
        assert_eq!(console.render("[green]12:00[/] | INFO", true), "12:00 | INFO");
    }

    #[test]
    fn test_render_literal_when_not_markup() {
        let console = TerminalConsole::new();
        assert_eq!(console.render("[green]raw[/]", false), "[green]raw[/]");
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_render_with_colors_keeps_text() {
        colored::control::set_override(true);
        let console = TerminalConsole::new();
        let rendered = console.render("[bold red]alert[/] done", true);
        assert!(rendered.contains("alert"));
        assert!(rendered.ends_with(" done"));
        assert!(!rendered.contains("[bold red]"));
    }
}
