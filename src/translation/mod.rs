//! Natural-language to typed-value translation.
//!
//! [`Translator`] is the seam the request loop depends on. [`JsonTranslator`]
//! implements it on top of any [`LanguageModel`], and
//! [`ChatCompletionClient`] is the model backed by an OpenAI-compatible API.

mod client;
mod error;
mod model;
mod prompt;
mod schema;
mod sse_parser;
mod translator;
mod validator;

pub use client::{ChatCompletionClient, ClientSettings};
pub use error::TranslationError;
pub use model::LanguageModel;
pub use prompt::{PromptSection, Role};
pub use schema::{SchemaDescriptor, SentimentResponse, TargetSchema};
pub use translator::{
    DEFAULT_MAX_REPAIR_ATTEMPTS, JsonTranslator, TranslationRequest, Translator,
};
