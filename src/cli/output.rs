//! Output formatting for CLI commands
//!
//! Colored output helpers (respects NO_COLOR env var via the colored
//! crate).

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for success verdicts
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for miss verdicts
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}
