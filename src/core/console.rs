//! Console trait for log output destinations

use super::error::Result;

/// Destination for rendered log lines.
///
/// The logger makes exactly one `print` call per emitted line. `markup`
/// tells the console whether the line carries style tags it should
/// interpret; when `false` the line is written literally.
pub trait Console: Send {
    fn print(&mut self, line: &str, markup: bool) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
