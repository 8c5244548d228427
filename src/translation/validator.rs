use super::schema::TargetSchema;

/// Returns the outermost `{ ... }` span of a model reply.
///
/// Models often wrap the object in prose or code fences; everything outside
/// the first `{` and the last `}` is discarded.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parses and validates a model reply against `T`.
///
/// The error string is fed back to the model in a repair prompt, so it
/// describes the problem rather than the parser internals where possible.
pub fn validate_reply<T: TargetSchema>(reply: &str) -> Result<T, String> {
    let Some(json) = extract_json_object(reply) else {
        return Err(format!("Response is not JSON:\n{reply}"));
    };

    let value: T = serde_json::from_str(json).map_err(|e| e.to_string())?;
    value.validate()?;
    Ok(value)
}
