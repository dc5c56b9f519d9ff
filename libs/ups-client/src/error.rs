use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ups_http::HttpError;

use crate::validate::ValidationError;

/// Everything an operation on [`UpsClient`](crate::UpsClient) can fail with.
///
/// [`Error::Api`] is a business outcome reported by UPS (an address it
/// could not resolve, a shipment that is already voided). Every other
/// variant means the call never produced a usable answer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Client configuration rejected at construction
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Request rejected locally before any network I/O
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The HTTP exchange itself failed (connect, TLS, timeout, body limit)
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The token endpoint answered with something other than 200
    #[error("authentication failed: token endpoint returned {status}")]
    AuthenticationFailed { status: http::StatusCode },

    /// A response body that could not be decoded into the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Structured error envelope returned by UPS
    #[error("UPS API error: {0}")]
    Api(#[from] ApiError),
}

impl Error {
    /// `true` for [`Error::Api`].
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// The structured UPS error, if this is one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn malformed(context: &str, err: impl fmt::Display) -> Self {
        Error::MalformedResponse(format!("{context}: {err}"))
    }
}

/// Error envelope UPS puts under the `"response"` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct ApiError {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

/// One `(code, message)` pair of an [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// Code of the first entry, the one UPS considers primary.
    #[must_use]
    pub fn first_code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no error details");
        }
        for (i, entry) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}:{}", entry.code, entry.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn entry(code: &str, message: &str) -> ApiErrorEntry {
        ApiErrorEntry {
            code: code.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn api_error_display_lists_every_entry() {
        let err = ApiError {
            errors: vec![
                entry("120100", "Missing or invalid shipper number"),
                entry("120802", "Address validation failed"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "120100:Missing or invalid shipper number; 120802:Address validation failed"
        );
        assert_eq!(err.first_code(), Some("120100"));
    }

    #[test]
    fn empty_api_error_has_placeholder_message() {
        assert_eq!(ApiError::default().to_string(), "no error details");
    }

    #[test]
    fn api_variant_is_distinguishable() {
        let api: Error = ApiError {
            errors: vec![entry("E1", "bad address")],
        }
        .into();
        assert!(api.is_api_error());
        assert_eq!(api.api_error().unwrap().errors[0].code, "E1");

        let other = Error::MalformedResponse("truncated".to_owned());
        assert!(!other.is_api_error());
        assert!(other.api_error().is_none());
    }

    #[test]
    fn authentication_failed_shows_status_text() {
        let err = Error::AuthenticationFailed {
            status: http::StatusCode::UNAUTHORIZED,
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: token endpoint returned 401 Unauthorized"
        );
    }
}
