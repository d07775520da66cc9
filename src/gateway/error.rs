//! Error types for the remote gateway.

use thiserror::Error;

/// Errors that can occur while talking to the remote API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-success status.
    #[error("Remote returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        GatewayError::Status {
            code,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::status(404, "not found")
    }

    /// Whether the remote reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { code: 404, .. })
    }

    /// The HTTP status code, if the remote answered at all.
    pub fn code(&self) -> Option<u16> {
        match self {
            GatewayError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            GatewayError::status(status.as_u16(), e.to_string())
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(GatewayError::not_found().is_not_found());
        assert!(!GatewayError::status(500, "boom").is_not_found());
        assert!(!GatewayError::Network("refused".into()).is_not_found());
        assert_eq!(GatewayError::status(503, "").code(), Some(503));
    }
}
