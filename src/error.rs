// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Backend client errors

use std::fmt;
use thiserror::Error;

/// What the body of an error response carried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReply {
    /// JSON body with a non-empty `error` field
    Message(String),
    /// JSON body without a usable `error` field
    Unexplained,
    /// Empty or non-JSON body
    Unreadable,
}

impl fmt::Display for ErrorReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Unexplained => f.write_str("no error message"),
            Self::Unreadable => f.write_str("unreadable error body"),
        }
    }
}

/// Failure talking to the flight-basar backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL is not a valid absolute URL
    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Transport-level failure (connect, timeout, body read)
    #[error("request to {path} failed: {source}")]
    Request {
        /// Request path
        path: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("{path} returned {status}: {reply}")]
    Status {
        /// Request path
        path: String,
        /// HTTP status code
        status: u16,
        /// What the error body said
        reply: ErrorReply,
    },

    /// Response body was not the expected JSON
    #[error("could not decode response from {path}: {source}")]
    Decode {
        /// Request path
        path: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status if the backend answered with an error status
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own `error` text, if it sent one
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                reply: ErrorReply::Message(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let err = ClientError::Status {
            path: "/api/weather".into(),
            status: 400,
            reply: ErrorReply::Message("Unbekannte Stadt".into()),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.backend_message(), Some("Unbekannte Stadt"));
        assert_eq!(err.to_string(), "/api/weather returned 400: Unbekannte Stadt");
    }

    #[test]
    fn test_status_without_message() {
        let err = ClientError::Status {
            path: "/api/places?city=Genf".into(),
            status: 502,
            reply: ErrorReply::Unreadable,
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.backend_message(), None);
        assert_eq!(
            err.to_string(),
            "/api/places?city=Genf returned 502: unreadable error body"
        );
    }

    #[test]
    fn test_decode_has_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ClientError::Decode {
            path: "/time".into(),
            source,
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.backend_message(), None);
        assert!(err.to_string().starts_with("could not decode response from /time"));
    }
}
