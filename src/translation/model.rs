use super::error::TranslationError;
use super::prompt::PromptSection;

/// A text-completion backend.
///
/// Implementations own their transport-level retry policy; an `Err` is final
/// for the given prompt.
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    async fn complete(&self, prompt: &[PromptSection]) -> Result<String, TranslationError>;
}
