//! User-facing status lines.
//!
//! Everything goes to stderr so rendered HTML or JSON on stdout stays clean.

use console::{Style, Term};

/// Styled status reporter for the CLI.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// Report a finished render.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok, msg);
    }

    /// Report a directive diagnostic.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn, msg);
    }

    /// Report the error that ends the command.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail, msg);
    }

    fn line(&self, style: &Style, msg: &str) {
        // A closed stderr leaves nowhere to report to.
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
