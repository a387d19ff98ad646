//! Error types for media analysis collaborators.

use std::fmt;

/// Universal error type that abstracts collaborator-specific failures into common variants.
///
/// Every provider implementation maps its native errors (HTTP failures, malformed
/// payloads, failures reported by the analysis service itself) onto these variants,
/// so the evaluation pipeline can short-circuit on any of them without knowing
/// which service produced it.
#[derive(Debug)]
pub enum Error {
    /// API key authentication failures. Credentials are invalid, expired or lack
    /// the permissions needed for the requested analysis.
    Authentication(String),

    /// Network connectivity issues, DNS failures, or connection resets.
    Network(String),

    /// Invalid parameters, missing required settings, or malformed configuration.
    Configuration(String),

    /// The analysis service ran but reported a failure for this media
    /// (e.g. no face found, transcription error).
    Provider(String),

    /// The analysis did not finish within the configured polling budget.
    Timeout(String),

    /// Requested media or analysis result does not exist.
    NotFound(String),

    /// Provider rate limit exceeded. Clients must wait before retrying.
    RateLimited { retry_after_seconds: u64 },

    /// Failed to serialize a request payload.
    Serialization(String),

    /// Failed to deserialize a provider response or a recorded result.
    Deserialization(String),

    /// Catch-all for errors that don't fit other categories.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited: retry after {}s", retry_after_seconds)
            }
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            Error::Other(err) => write!(f, "Other error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_provider_message() {
        let err = Error::Provider("no face detected".to_string());
        assert_eq!(err.to_string(), "Provider error: no face detected");
    }

    #[test]
    fn test_display_rate_limited() {
        let err = Error::RateLimited {
            retry_after_seconds: 30,
        };
        assert_eq!(err.to_string(), "Rate limited: retry after 30s");
    }

    #[test]
    fn test_source_only_for_other() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = Error::Other(Box::new(io));
        assert!(err.source().is_some());
        assert!(Error::Timeout("polling".to_string()).source().is_none());
    }

    #[test]
    fn test_from_serde_json_error_is_deserialization() {
        let parse_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Deserialization(_)));
    }
}
