// Payload validation for the check endpoint.

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_LEN: usize = 4096;

/// Reasons a request is rejected before it reaches the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The content type does not declare a JSON payload.
    #[error("content type is not application/json")]
    ContentType,

    /// The body is larger than the configured byte cap.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The body is not JSON, or is JSON but not a single string.
    #[error("payload is not a JSON string: {0}")]
    Body(String),

    /// The string is empty.
    #[error("text is empty")]
    Empty,

    /// The string is longer than `MAX_TEXT_LEN` characters.
    #[error("text is {len} characters long, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// The string contains a byte outside `0x00..=0x7F`.
    #[error("non-ASCII byte at offset {index}")]
    NonAscii { index: usize },
}

/// Check the decoded text: length within `1..=MAX_TEXT_LEN`, then ASCII only.
///
/// Length is counted in characters so a short non-ASCII string reports
/// `NonAscii` rather than `TooLong`.
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    let len = text.chars().count();
    if len == 0 {
        return Err(ValidationError::Empty);
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    if let Some(index) = text.bytes().position(|b| !b.is_ascii()) {
        return Err(ValidationError::NonAscii { index });
    }
    Ok(text)
}

/// Decode a JSON body that must hold exactly one string value.
pub fn decode_text(body: &[u8]) -> Result<String, ValidationError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::Body(e.to_string()))?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        other => Err(ValidationError::Body(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
