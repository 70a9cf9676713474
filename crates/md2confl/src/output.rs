//! Colored terminal output utilities.

use std::io;

use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; converted markup and listings go to stdout.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green().for_stderr(),
            red: Style::new().red().for_stderr(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Write text to stdout unchanged.
    pub(crate) fn write(&self, text: &str) -> io::Result<()> {
        self.stdout.write_str(text)?;
        self.stdout.flush()
    }

    /// Write a line to stdout with a highlighted (cyan bold) key column.
    pub(crate) fn write_entry(&self, key: &str, value: &str) -> io::Result<()> {
        let line = if value.is_empty() {
            self.cyan_bold.apply_to(key).to_string()
        } else {
            format!("{} {value}", self.cyan_bold.apply_to(format!("{key:<14}")))
        };
        self.stdout.write_line(&line)
    }
}
