//! Console implementations

pub mod memory;
pub mod terminal;
pub mod writer;

pub use memory::{CapturedLine, MemoryConsole};
pub use terminal::{Stream, TerminalConsole};
pub use writer::WriterConsole;

pub use crate::core::Console;
