use anyhow::{Context, Result};
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::sink::ConsoleSink;
use crate::input::InputSource;
use crate::translation::{TargetSchema, TranslationRequest, Translator};
use crate::ui::Spinner;

/// Counts of what a finished session produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines whose result was rendered.
    pub rendered: usize,
    /// Lines whose failure was reported.
    pub reported: usize,
    /// Whether the session ended because it was cancelled.
    pub cancelled: bool,
}

impl SessionSummary {
    pub const fn processed(&self) -> usize {
        self.rendered + self.reported
    }
}

/// Runs the read → translate → render loop until input ends or `cancel` fires.
///
/// At most one translation is in flight. Each line yields exactly one
/// rendering or one report, in input order, except a line whose translation
/// is still pending when cancellation is observed: its outcome is discarded.
/// Only sink write failures are returned as errors.
pub async fn run_loop<T, Tr, S, O, E>(
    translator: &Tr,
    source: &mut S,
    sink: &mut ConsoleSink<O, E>,
    cancel: &CancellationToken,
    show_progress: bool,
) -> Result<SessionSummary>
where
    T: TargetSchema,
    Tr: Translator<T>,
    S: InputSource,
    O: Write,
    E: Write,
{
    let mut summary = SessionSummary::default();

    loop {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        let line = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                summary.cancelled = true;
                break;
            }
            line = source.next_line() => line,
        };

        let Some(line) = line else {
            debug!("input exhausted");
            break;
        };

        let request = TranslationRequest::new::<T>(line);
        debug!(index = summary.processed(), "translating request");

        let spinner = show_progress.then(|| Spinner::new("Classifying..."));
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            outcome = translator.translate(&request) => Some(outcome),
        };
        drop(spinner);

        // A result that lands after cancellation is discarded.
        let Some(outcome) = outcome.filter(|_| !cancel.is_cancelled()) else {
            info!("session cancelled while a request was in flight");
            summary.cancelled = true;
            break;
        };

        match outcome {
            Ok(value) => {
                sink.render(&value).context("Failed to write result")?;
                summary.rendered += 1;
            }
            Err(e) => {
                debug!("translation failed: {e}");
                sink.report(&e).context("Failed to write error report")?;
                summary.reported += 1;
            }
        }
    }

    info!(
        rendered = summary.rendered,
        reported = summary.reported,
        cancelled = summary.cancelled,
        "session finished"
    );
    Ok(summary)
}
