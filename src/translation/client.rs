use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::TranslationError;
use super::model::LanguageModel;
use super::prompt::PromptSection;
use super::sse_parser::sse_to_text_stream;

/// Connection and retry settings for [`ChatCompletionClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the OpenAI-compatible API.
    pub endpoint: String,
    /// Model name sent with every request.
    pub model: String,
    /// Bearer token, if the endpoint needs one.
    pub api_key: Option<String>,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Pause between retries.
    pub retry_pause: Duration,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Streams chat completions from an OpenAI-compatible endpoint.
pub struct ChatCompletionClient {
    client: Client,
    settings: ClientSettings,
}

impl ChatCompletionClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.settings.endpoint.trim_end_matches('/')
        )
    }

    async fn complete_once(&self, prompt: &[PromptSection]) -> Result<String, TranslationError> {
        let url = self.completions_url();

        let chat_request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: prompt
                .iter()
                .map(|section| Message {
                    role: section.role.as_str(),
                    content: &section.content,
                })
                .collect(),
            temperature: 0.0,
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.settings.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| TranslationError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {e}>"),
            };
            return Err(TranslationError::Status { status, body });
        }

        let mut stream = std::pin::pin!(sse_to_text_stream(url, response.bytes_stream()));
        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            reply.push_str(&chunk?);
        }

        if reply.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        debug!(chars = reply.len(), "completion received");
        Ok(reply)
    }
}

impl LanguageModel for ChatCompletionClient {
    async fn complete(&self, prompt: &[PromptSection]) -> Result<String, TranslationError> {
        let mut retries = 0;
        loop {
            match self.complete_once(prompt).await {
                Err(e) if e.is_transient() && retries < self.settings.max_retries => {
                    retries += 1;
                    warn!(
                        attempt = retries,
                        max_retries = self.settings.max_retries,
                        "transient completion failure, retrying: {e}"
                    );
                    tokio::time::sleep(self.settings.retry_pause).await;
                }
                result => return result,
            }
        }
    }
}
