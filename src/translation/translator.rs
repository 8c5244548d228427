use tracing::debug;

use super::error::TranslationError;
use super::model::LanguageModel;
use super::prompt::{PromptSection, build_repair_prompt, build_request_prompt};
use super::schema::{SchemaDescriptor, TargetSchema};
use super::validator::validate_reply;

/// One line of user text paired with the schema it must be translated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub schema: SchemaDescriptor,
}

impl TranslationRequest {
    pub fn new<T: TargetSchema>(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            schema: T::SCHEMA,
        }
    }
}

/// Turns free-form text into a value of `T`.
///
/// Every failure, whatever its cause, comes back as a [`TranslationError`].
#[allow(async_fn_in_trait)]
pub trait Translator<T: TargetSchema> {
    async fn translate(&self, request: &TranslationRequest) -> Result<T, TranslationError>;
}

/// Default number of repair prompts sent after a reply fails validation.
pub const DEFAULT_MAX_REPAIR_ATTEMPTS: usize = 1;

/// Translator that asks a language model for JSON and validates the reply.
///
/// A reply that fails validation is sent back to the model together with the
/// validation error, up to `max_repair_attempts` times.
pub struct JsonTranslator<M> {
    model: M,
    max_repair_attempts: usize,
}

impl<M: LanguageModel> JsonTranslator<M> {
    pub const fn new(model: M) -> Self {
        Self {
            model,
            max_repair_attempts: DEFAULT_MAX_REPAIR_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_max_repair_attempts(mut self, attempts: usize) -> Self {
        self.max_repair_attempts = attempts;
        self
    }
}

impl<M: LanguageModel, T: TargetSchema> Translator<T> for JsonTranslator<M> {
    async fn translate(&self, request: &TranslationRequest) -> Result<T, TranslationError> {
        let mut prompt = vec![PromptSection::user(build_request_prompt(
            &request.text,
            &request.schema,
        ))];
        let mut attempts = 0;

        loop {
            let reply = self.model.complete(&prompt).await?;
            attempts += 1;

            match validate_reply::<T>(&reply) {
                Ok(value) => return Ok(value),
                Err(message) if attempts <= self.max_repair_attempts => {
                    debug!(attempt = attempts, "reply failed validation, repairing: {message}");
                    prompt.push(PromptSection::assistant(reply));
                    prompt.push(PromptSection::user(build_repair_prompt(&message)));
                }
                Err(message) => {
                    return Err(TranslationError::Validation {
                        type_name: request.schema.type_name,
                        attempts,
                        message,
                    });
                }
            }
        }
    }
}
