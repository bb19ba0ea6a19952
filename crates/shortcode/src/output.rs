//! Terminal output utilities.

use std::io;

use console::{Style, Term};

/// Terminal output formatter.
///
/// Results go to stdout unstyled; diagnostics go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    yellow: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Write command output as-is.
    pub(crate) fn write(&self, text: &str) -> io::Result<()> {
        self.out.write_str(text)?;
        self.out.flush()
    }

    /// Write one line of command output.
    pub(crate) fn line(&self, text: &str) -> io::Result<()> {
        self.out.write_line(text)
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
