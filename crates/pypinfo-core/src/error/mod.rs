//! Error types and result aliases for pypinfo operations.
//!
//! Every failure a remote call can produce is one of these variants. The
//! client never recovers from any of them; they reach the caller as-is.

use thiserror::Error;

/// Unified error type for all pypinfo operations
#[derive(Error, Debug)]
pub enum PypiError {
    // Transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Protocol error: {url} returned HTTP {status}")]
    Protocol { url: String, status: u16 },

    #[error("Invalid index URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // Payload errors
    #[error("Malformed XML-RPC payload: {message}")]
    Xml {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Malformed response from {method}: {message}")]
    MalformedResponse { method: String, message: String },

    // Remote errors
    #[error("Remote fault {code}: {message}")]
    Fault { code: i64, message: String },

    // Caller errors
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for pypinfo operations
pub type PypiResult<T> = Result<T, PypiError>;

impl PypiError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an XML error from any error type
    pub fn xml<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Xml {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-response error for the named remote method
    pub fn malformed(method: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if the same call could succeed if issued again later.
    ///
    /// The client itself never retries; this is for callers that want to.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PypiError::Network { .. } | PypiError::Io { .. } => true,
            PypiError::Protocol { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PypiError::Network { .. } => Some("Check your internet connection and try again"),
            PypiError::Protocol { status: 429, .. } => {
                Some("The index is rate limiting requests; wait a moment before retrying")
            },
            PypiError::Protocol { .. } | PypiError::InvalidUrl { .. } => {
                Some("Check that --index-url points at an XML-RPC endpoint such as https://pypi.org/pypi")
            },
            PypiError::Fault { .. } => {
                Some("The index rejected the call; check the procedure arguments")
            },
            PypiError::InvalidArgument { .. } => Some("Run 'pypinfo --help' to see accepted arguments"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_network_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = PypiError::network("connect failed".to_string(), io);

        assert_eq!(err.to_string(), "Network error: connect failed");
        assert_eq!(err.source().unwrap().to_string(), "refused");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fault_is_not_recoverable() {
        let err = PypiError::Fault {
            code: 1,
            message: "no such method".to_string(),
        };

        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Remote fault 1: no such method");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_protocol_recoverability_by_status() {
        let throttled = PypiError::Protocol { url: "u".to_string(), status: 429 };
        let missing = PypiError::Protocol { url: "u".to_string(), status: 404 };
        let down = PypiError::Protocol { url: "u".to_string(), status: 503 };

        assert!(throttled.is_recoverable());
        assert!(!missing.is_recoverable());
        assert!(down.is_recoverable());
    }

    #[test]
    fn test_malformed_names_method() {
        let err = PypiError::malformed("browse", "expected array");
        assert_eq!(err.to_string(), "Malformed response from browse: expected array");
        assert!(err.suggestion().is_none());
    }
}
