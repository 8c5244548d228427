use super::schema::SchemaDescriptor;

pub const REQUEST_PROMPT_TEMPLATE: &str = "You are a service that translates user requests into JSON objects of type \"{type_name}\" according to the following TypeScript definitions:\n\
```\n\
{definition}\
```\n\
The following is a user request:\n\
\"\"\"\n\
{request}\n\
\"\"\"\n\
The following is the user request translated into a JSON object with 2 spaces of indentation and no properties with the value undefined:\n";

pub const REPAIR_PROMPT_TEMPLATE: &str = "The JSON object is invalid for the following reason:\n\
\"\"\"\n\
{error}\n\
\"\"\"\n\
The following is a revised JSON object:\n";

/// Speaker of a prompt section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message of a chat-style prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSection {
    pub role: Role,
    pub content: String,
}

impl PromptSection {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_request_prompt(request: &str, schema: &SchemaDescriptor) -> String {
    // {...} are placeholders for string replacement, not format arguments.
    // The request goes last so braces inside it are never substituted.
    REQUEST_PROMPT_TEMPLATE
        .replace("{type_name}", schema.type_name)
        .replace("{definition}", schema.definition)
        .replace("{request}", request)
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_repair_prompt(validation_error: &str) -> String {
    REPAIR_PROMPT_TEMPLATE.replace("{error}", validation_error)
}
