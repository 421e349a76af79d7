//! Error surface for the SmartLead API clients.

use serde_json::Value;

/// Error type for SmartLead API operations.
///
/// Every variant carries the human label of the originating operation
/// (e.g. "create campaign") so tool handlers can build a user-facing
/// message without re-deriving context.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API key must not be empty")]
    MissingApiKey,

    #[error("{operation} failed with HTTP {status}: {detail}")]
    Upstream {
        operation: String,
        status: u16,
        detail: String,
        /// Parsed upstream error payload when the body was JSON.
        body: Option<Value>,
    },

    #[error("{operation} failed after {attempts} attempt(s): {detail}")]
    Network {
        operation: String,
        attempts: u32,
        detail: String,
    },

    #[error("{operation} timed out")]
    Timeout { operation: String },

    #[error("{operation} returned an unparseable body: {detail}")]
    Decode { operation: String, detail: String },

    #[error("failed to encode request for {operation}: {detail}")]
    Encode { operation: String, detail: String },
}

impl ApiError {
    /// Upstream HTTP status, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable machine-readable kind, used by the tool error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Network { .. } => "network_error",
            Self::Timeout { .. } => "timeout",
            Self::Decode { .. } => "decode_error",
            Self::Encode { .. } => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_names_operation() {
        let err = ApiError::Upstream {
            operation: "create campaign".to_string(),
            status: 404,
            detail: "Not Found".to_string(),
            body: None,
        };
        let message = err.to_string();
        assert!(message.contains("create campaign"));
        assert!(message.contains("404"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), "upstream_error");
    }

    #[test]
    fn test_network_error_kind() {
        let err = ApiError::Network {
            operation: "list campaigns".to_string(),
            attempts: 4,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.kind(), "network_error");
        assert_eq!(err.status(), None);
    }
}
