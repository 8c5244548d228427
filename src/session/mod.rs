//! The interactive session: one translation per input line until input ends
//! or the session is cancelled.

mod request_loop;
mod sink;
mod ui;

pub use request_loop::{SessionSummary, run_loop};
pub use sink::ConsoleSink;

use anyhow::Result;
use std::io::{IsTerminal, Write};
use tokio_util::sync::CancellationToken;

use crate::input::{ConsoleInput, InputSource, InteractivePrompt, ReaderLines, SingleLine};
use crate::translation::{TargetSchema, Translator};

/// Prompt shown before each interactive read.
pub const DEFAULT_PROMPT: &str = "😀> ";

/// A configured translator plus the token that ends its session.
pub struct Session<Tr> {
    translator: Tr,
    cancel: CancellationToken,
}

impl<Tr> Session<Tr> {
    pub const fn new(translator: Tr, cancel: CancellationToken) -> Self {
        Self { translator, cancel }
    }

    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Runs against the console.
    ///
    /// With `single_input`, that line is processed and the session ends.
    /// Otherwise lines come from a `prompt`ed terminal, or from stdin without
    /// prompting when stdin is not a terminal.
    pub async fn run<T>(&self, prompt: &str, single_input: Option<String>) -> Result<SessionSummary>
    where
        T: TargetSchema,
        Tr: Translator<T>,
    {
        let mut source = match single_input {
            Some(line) => ConsoleInput::Single(SingleLine::new(line)),
            None if std::io::stdin().is_terminal() => {
                ConsoleInput::Interactive(InteractivePrompt::new(prompt))
            }
            None => ConsoleInput::Piped(ReaderLines::stdin()),
        };
        self.run_console::<T>(&mut source).await
    }

    /// Runs a prepared console source, framing it when it is interactive.
    pub async fn run_console<T>(&self, source: &mut ConsoleInput) -> Result<SessionSummary>
    where
        T: TargetSchema,
        Tr: Translator<T>,
    {
        let interactive = source.is_interactive();
        if interactive {
            ui::print_header();
        }

        let mut sink = ConsoleSink::stdio();
        let show_progress = interactive && !crate::output::is_quiet();
        let summary = run_loop::<T, _, _, _, _>(
            &self.translator,
            source,
            &mut sink,
            &self.cancel,
            show_progress,
        )
        .await?;

        if interactive {
            ui::print_goodbye();
        }
        Ok(summary)
    }

    /// Runs against an arbitrary source and sink, without console framing.
    pub async fn run_with<T, S, O, E>(
        &self,
        source: &mut S,
        sink: &mut ConsoleSink<O, E>,
    ) -> Result<SessionSummary>
    where
        T: TargetSchema,
        Tr: Translator<T>,
        S: InputSource,
        O: Write,
        E: Write,
    {
        run_loop::<T, _, _, _, _>(&self.translator, source, sink, &self.cancel, false).await
    }
}
