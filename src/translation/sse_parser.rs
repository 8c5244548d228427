//! Server-Sent Events (SSE) decoding for streamed chat completions.
//!
//! Bytes are buffered until a full line is available, so multi-byte UTF-8
//! characters split across network chunks decode correctly.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;
use std::fmt::Display;

use super::error::TranslationError;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// A decoded SSE event relevant to chat completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A text delta.
    Text(String),
    /// The `data: [DONE]` terminator.
    Done,
}

/// Incremental line decoder for an SSE body.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the events completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(line_end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=line_end).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = parse_sse_line(line.trim()) {
                events.push(event);
            }
        }
        events
    }

    /// Decodes whatever is left once the body has ended without a newline.
    pub fn finish(mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        parse_sse_line(String::from_utf8_lossy(&rest).trim())
    }
}

/// Converts a raw SSE byte stream into a stream of text deltas.
///
/// The stream ends at `data: [DONE]` or when the body closes. A transport
/// error ends the stream after yielding it.
pub fn sse_to_text_stream<E>(
    url: String,
    byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static,
) -> impl Stream<Item = Result<String, TranslationError>> + Send
where
    E: Display + Send + 'static,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut decoder = SseDecoder::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(TranslationError::Http {
                        url: url.clone(),
                        message: format!("stream error: {e}"),
                    });
                    return;
                }
            };

            for event in decoder.push(&chunk) {
                match event {
                    SseEvent::Text(text) => yield Ok(text),
                    SseEvent::Done => return,
                }
            }
        }

        if let Some(SseEvent::Text(text)) = decoder.finish() {
            yield Ok(text);
        }
    }
}

fn parse_sse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let response = serde_json::from_str::<StreamResponse>(data).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(SseEvent::Text(content))
    }
}
