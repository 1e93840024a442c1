//! Error types
//!
//! Every failure the SDK can surface, with a uniform `{code, message}` view
//! so callers can branch on the API's error codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the SDK
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single `{code, message}` pair as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    pub message: String,
}

impl ErrorEntry {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Unified error type for the SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request with one or more input errors.
    #[error("input errors: {}", join_entries(.0))]
    Input(Vec<ErrorEntry>),

    /// The API failed while handling the request.
    #[error("internal server error")]
    InternalServer,

    /// A non-success response that could not be classified.
    #[error("unknown error (status {status}): {message}")]
    Unknown {
        /// HTTP status code, or 0 when the failure happened after a success status.
        status: u16,
        message: String,
    },

    /// Network, TLS or timeout failure reported by the HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not match the expected record shape.
    #[error("failed to decode {resource}: {message}")]
    Decode {
        /// Name of the resource being decoded, e.g. "Invoice".
        resource: String,
        message: String,
    },

    /// No user was set on the client and no default user is configured.
    #[error("no user configured; pass a user to the client or call set_default_user")]
    MissingUser,

    /// Invalid client or CLI configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be signed.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl Error {
    /// Helper: build a `Decode` error for a resource name.
    pub fn decode(resource: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: err.to_string(),
        }
    }

    /// Structured `{code, message}` view of this error.
    pub fn entries(&self) -> Vec<ErrorEntry> {
        match self {
            Self::Input(entries) => entries.clone(),
            Self::InternalServer => vec![ErrorEntry::new(
                "internalServerError",
                "Houston, we have a problem.",
            )],
            Self::Unknown { message, .. } => vec![ErrorEntry::new("unknownError", message.clone())],
            Self::Http(err) => vec![ErrorEntry::new("httpError", err.to_string())],
            Self::Decode { .. } => vec![ErrorEntry::new("decodeError", self.to_string())],
            Self::MissingUser => vec![ErrorEntry::new("missingUser", self.to_string())],
            Self::Config(msg) => vec![ErrorEntry::new("invalidConfiguration", msg.clone())],
            Self::Signing(msg) => vec![ErrorEntry::new("signingError", msg.clone())],
        }
    }

    /// True if any entry carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.entries().iter().any(|e| e.code == code)
    }
}

fn join_entries(entries: &[ErrorEntry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_exposes_entries() {
        let err = Error::Input(vec![
            ErrorEntry::new("invalidAmount", "Amount must be positive"),
            ErrorEntry::new("invalidTaxId", "Tax ID is invalid"),
        ]);

        assert_eq!(err.entries().len(), 2);
        assert!(err.has_code("invalidTaxId"));
        assert_eq!(
            err.to_string(),
            "input errors: invalidAmount: Amount must be positive; invalidTaxId: Tax ID is invalid"
        );
    }

    #[test]
    fn test_every_variant_has_a_code() {
        let errors = [
            Error::InternalServer,
            Error::Unknown {
                status: 418,
                message: "teapot".to_string(),
            },
            Error::decode("Invoice", "missing field `amount`"),
            Error::MissingUser,
            Error::Config("bad".to_string()),
            Error::Signing("no key".to_string()),
        ];

        for err in errors {
            let entries = err.entries();
            assert_eq!(entries.len(), 1);
            assert!(!entries[0].code.is_empty());
        }
    }
}
