use inquire::ui::{Attributes, Color, RenderConfig, Styled};
use inquire::{InquireError, Text};
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Words that end an interactive session when typed on their own.
const STOP_WORDS: &[&str] = &["quit", "exit"];

/// Yields one request line at a time.
///
/// `None` means the stream is over. Read failures end the stream as well;
/// they are logged, never surfaced as errors.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    async fn next_line(&mut self) -> Option<String>;
}

/// What a raw console line means to the session.
#[derive(Debug, PartialEq, Eq)]
enum ConsoleLine {
    Request(String),
    Blank,
    Stop,
}

fn classify(raw: &str) -> ConsoleLine {
    let line = raw.trim();
    if line.is_empty() {
        ConsoleLine::Blank
    } else if STOP_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        ConsoleLine::Stop
    } else {
        ConsoleLine::Request(line.to_string())
    }
}

/// A single pre-supplied line, yielded once.
#[derive(Debug)]
pub struct SingleLine(Option<String>);

impl SingleLine {
    pub const fn new(line: String) -> Self {
        Self(Some(line))
    }
}

impl InputSource for SingleLine {
    async fn next_line(&mut self) -> Option<String> {
        self.0.take()
    }
}

/// A fixed list of lines, yielded in order.
#[derive(Debug, Default)]
pub struct LineQueue(VecDeque<String>);

impl LineQueue {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self(lines.into_iter().collect())
    }
}

impl InputSource for LineQueue {
    async fn next_line(&mut self) -> Option<String> {
        self.0.pop_front()
    }
}

/// Lines read without prompting from a buffered reader, typically piped stdin.
///
/// Only end of stream stops it; stop words are sent like any other text.
pub struct ReaderLines<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl ReaderLines<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> InputSource for ReaderLines<R> {
    async fn next_line(&mut self) -> Option<String> {
        loop {
            let raw = match self.lines.next_line().await {
                Ok(Some(raw)) => raw,
                Ok(None) => return None,
                Err(e) => {
                    warn!("stopped reading input: {e}");
                    return None;
                }
            };

            let line = raw.trim();
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
    }
}

/// Prompted, line-edited input on a terminal.
pub struct InteractivePrompt {
    prompt: String,
}

impl InteractivePrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    fn read_blocking(prompt: &str) -> Result<String, InquireError> {
        let prefix = Styled::new("").with_fg(Color::LightBlue);
        let render_config = RenderConfig::default()
            .with_prompt_prefix(prefix)
            .with_answered_prompt_prefix(prefix)
            .with_help_message(
                inquire::ui::StyleSheet::new()
                    .with_fg(Color::Grey)
                    .with_attr(Attributes::ITALIC),
            );

        Text::new(prompt)
            .with_render_config(render_config)
            .with_help_message("Type text to classify, 'quit' or Ctrl+C to exit")
            .prompt()
    }
}

impl InputSource for InteractivePrompt {
    async fn next_line(&mut self) -> Option<String> {
        loop {
            let prompt = self.prompt.clone();
            let answer =
                match tokio::task::spawn_blocking(move || Self::read_blocking(&prompt)).await {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!("prompt task failed: {e}");
                        return None;
                    }
                };

            let raw = match answer {
                Ok(raw) => raw,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return None;
                }
                Err(e) => {
                    warn!("stopped reading input: {e}");
                    return None;
                }
            };

            match classify(&raw) {
                ConsoleLine::Request(line) => return Some(line),
                ConsoleLine::Blank => {}
                ConsoleLine::Stop => return None,
            }
        }
    }
}

/// The input sources the command line can select.
pub enum ConsoleInput {
    Single(SingleLine),
    Batch(LineQueue),
    Piped(ReaderLines<BufReader<Stdin>>),
    Interactive(InteractivePrompt),
}

impl ConsoleInput {
    /// Returns `true` when the user is typing at a prompt.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }
}

impl InputSource for ConsoleInput {
    async fn next_line(&mut self) -> Option<String> {
        match self {
            Self::Single(source) => source.next_line().await,
            Self::Batch(source) => source.next_line().await,
            Self::Piped(source) => source.next_line().await,
            Self::Interactive(source) => source.next_line().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drain(source: &mut impl InputSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().await {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("   "), ConsoleLine::Blank);
        assert_eq!(classify("quit"), ConsoleLine::Stop);
        assert_eq!(classify(" EXIT "), ConsoleLine::Stop);
        assert_eq!(
            classify("  I love this! "),
            ConsoleLine::Request("I love this!".to_string())
        );
        assert_eq!(
            classify("quit complaining"),
            ConsoleLine::Request("quit complaining".to_string())
        );
    }

    #[tokio::test]
    async fn test_single_line_yields_once() {
        let mut source = SingleLine::new("I love this!".to_string());
        assert_eq!(source.next_line().await.as_deref(), Some("I love this!"));
        assert_eq!(source.next_line().await, None);
        assert_eq!(source.next_line().await, None);
    }

    #[tokio::test]
    async fn test_line_queue_preserves_order() {
        let mut source = LineQueue::new(["a", "b", "c"].map(String::from));
        assert_eq!(drain(&mut source).await, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_reader_lines_skips_blank_lines() {
        let input: &[u8] = b"good\n\n   \nbad\r\n";
        let mut source = ReaderLines::new(input);
        assert_eq!(drain(&mut source).await, vec!["good", "bad"]);
    }

    #[tokio::test]
    async fn test_reader_lines_sends_stop_words_as_text() {
        let input: &[u8] = b"first\nExit\nquit\nlast\n";
        let mut source = ReaderLines::new(input);
        assert_eq!(drain(&mut source).await, vec!["first", "Exit", "quit", "last"]);
    }

    #[tokio::test]
    async fn test_reader_lines_empty_input() {
        let input: &[u8] = b"";
        let mut source = ReaderLines::new(input);
        assert_eq!(source.next_line().await, None);
    }

    #[tokio::test]
    async fn test_reader_lines_invalid_utf8_ends_stream() {
        let input: &[u8] = b"ok\n\xff\xfe\nafter\n";
        let mut source = ReaderLines::new(input);
        assert_eq!(drain(&mut source).await, vec!["ok"]);
    }

    #[tokio::test]
    async fn test_console_input_delegates() {
        let mut input = ConsoleInput::Single(SingleLine::new("hello".to_string()));
        assert!(!input.is_interactive());
        assert_eq!(drain(&mut input).await, vec!["hello"]);

        let interactive = ConsoleInput::Interactive(InteractivePrompt::new("😀> "));
        assert!(interactive.is_interactive());
    }
}
