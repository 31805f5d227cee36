// ---------------------------------------------------------------------------
// SynthesisError: failures at the input/config boundary
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while decoding input snapshots or configuration.
///
/// Construction itself never fails: malformed tags and geometry fall back to
/// defaults or drop the affected unit. Only the JSON boundary returns errors.
#[derive(Debug)]
pub enum SynthesisError {
    /// The document is not valid JSON or does not match the record shape.
    Decode(String),
    /// The document is valid JSON but has no recognizable element list.
    UnsupportedDocument(String),
    /// A configuration value is out of range.
    InvalidConfig { field: &'static str, reason: String },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SynthesisError::UnsupportedDocument(msg) => {
                write!(f, "Unsupported document: {msg}")
            }
            SynthesisError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

impl From<serde_json::Error> for SynthesisError {
    fn from(e: serde_json::Error) -> Self {
        SynthesisError::Decode(e.to_string())
    }
}
