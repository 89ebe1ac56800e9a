//! Output abstraction layer
//!
//! Commands write through [`OutputWriter`] so the same code prints colored
//! text to a terminal or collects messages in memory.

use colored::Colorize;
use std::sync::{Mutex, PoisonError};

/// Where command output goes
///
/// `write` carries results (book lines, slugs, captions) and is the only
/// level a `--quiet` run relies on. The other levels are status lines.
///
/// # Examples
///
/// ```no_run
/// use bookvault::output::{OutputWriter, TerminalWriter};
///
/// let out = TerminalWriter::new();
/// out.write("the-bright-duke");
/// out.success("Added heart to b1");
/// out.error("Filters unavailable: connection refused");
/// ```
pub trait OutputWriter: Send + Sync {
    /// A result line
    fn write(&self, message: &str);

    fn error(&self, message: &str);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    /// Secondary text such as share links and page footers
    fn info(&self, message: &str);
}

/// Terminal output
///
/// Results and confirmations go to stdout. Errors and warnings go to stderr
/// so `bookvault -q search ... | xargs` only ever sees slugs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalWriter;

impl TerminalWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
    }

    fn success(&self, message: &str) {
        println!("{} {message}", "✓".green());
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Collects messages in memory instead of printing them
///
/// # Examples
///
/// ```
/// use bookvault::output::{BufferWriter, MessageLevel, OutputWriter};
///
/// let writer = BufferWriter::new();
/// writer.success("Hearted");
/// assert_eq!(writer.messages(), vec![(MessageLevel::Success, "Hearted".to_string())]);
/// ```
#[derive(Default)]
pub struct BufferWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Text of every message, joined by newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.messages()
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

impl OutputWriter for BufferWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_writer_as_trait_object() {
        let out: &dyn OutputWriter = &TerminalWriter::new();
        out.write("the-bright-duke");
        out.info("Page 1 of 1 (1 books)");
    }

    #[test]
    fn test_buffer_writer_messages() {
        let writer = BufferWriter::new();

        writer.success("Test success");
        writer.error("Test error");
        writer.warning("Test warning");

        let messages = writer.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], (MessageLevel::Success, "Test success".to_string()));
        assert_eq!(messages[1].0, MessageLevel::Error);
        assert_eq!(messages[2].0, MessageLevel::Warning);
    }

    #[test]
    fn test_buffer_writer_text() {
        let writer = BufferWriter::new();
        writer.write("First");
        writer.info("Second");
        assert_eq!(writer.text(), "First\nSecond");
    }

    #[test]
    fn test_writer_is_object_safe() {
        let writer: Box<dyn OutputWriter> = Box::new(BufferWriter::new());
        writer.write("ok");
    }
}
