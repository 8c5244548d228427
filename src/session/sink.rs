use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

use crate::translation::TranslationError;
use crate::ui::Style;

/// Where rendered results and failure reports go.
///
/// Results are written to `out` and failures to `err`, one line each, and
/// both are flushed immediately so piped consumers see them in order.
pub struct ConsoleSink<O, E> {
    out: O,
    err: E,
}

impl ConsoleSink<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleSink<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn render(&mut self, value: &impl Display) -> io::Result<()> {
        writeln!(self.out, "{value}")?;
        self.out.flush()
    }

    /// Writes `error` as a single line; embedded line breaks are folded.
    pub fn report(&mut self, error: &TranslationError) -> io::Result<()> {
        let message = error.to_string();
        let message: Vec<&str> = message
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        writeln!(self.err, "{} {}", Style::error("Error:"), message.join(" "))?;
        self.err.flush()
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
