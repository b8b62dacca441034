use thiserror::Error;

/// Classified outcome of a failed API call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response reached us (connect failure, timeout, broken body)
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status other than 401
    #[error("Request failed: {reason} ({status})")]
    Protocol { status: u16, reason: String },

    /// HTTP 401 or envelope code 401
    #[error("Session expired")]
    Expired,

    /// Envelope code other than 200 and 401
    #[error("Request failed with code {code}: {message}")]
    Business { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, ApiError::Expired)
    }
}
