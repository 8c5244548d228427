//! Target schemas the translator can produce.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Compile-time description of the JSON shape a translation must produce.
///
/// `definition` is shown to the model verbatim, so it is written as a
/// TypeScript interface rather than JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Name of the root type, referenced from the prompt.
    pub type_name: &'static str,
    /// Source text of the type definition.
    pub definition: &'static str,
}

/// A structured value a translator can produce from free-form text.
///
/// Deserialization checks the shape; [`TargetSchema::validate`] adds the
/// value-level rules `serde` cannot express.
pub trait TargetSchema: DeserializeOwned + fmt::Display {
    /// Schema shown to the model.
    const SCHEMA: SchemaDescriptor;

    /// Checks constraints beyond the JSON shape.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Result of classifying a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentResponse {
    /// The sentiment label, usually `negative`, `neutral` or `positive`.
    pub sentiment: String,
}

const SENTIMENT_DEFINITION: &str = "\
// The following is a schema definition for determining the sentiment of some user input.

export interface SentimentResponse {
    sentiment: string; // The sentiment of the text: \"negative\", \"neutral\" or \"positive\"
}
";

impl TargetSchema for SentimentResponse {
    const SCHEMA: SchemaDescriptor = SchemaDescriptor {
        type_name: "SentimentResponse",
        definition: SENTIMENT_DEFINITION,
    };

    fn validate(&self) -> Result<(), String> {
        if self.sentiment.trim().is_empty() {
            return Err("property `sentiment` must be a non-empty string".to_string());
        }
        if self.sentiment.trim() != self.sentiment {
            return Err("property `sentiment` must not have surrounding whitespace".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for SentimentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The sentiment is {}", self.sentiment)
    }
}
