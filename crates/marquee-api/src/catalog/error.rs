//! Error taxonomy for catalog fetches.
//!
//! Every failed fetch falls into one of three classes: the request
//! never completed, the service answered with an error status, or the
//! body could not be decoded. Callers decide whether to surface or
//! swallow; this module only classifies.

use thiserror::Error;

/// Result alias for catalog API operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Error returned by catalog API operations.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum FetchError {
    /// The request could not be sent or the response never arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("catalog API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Service error code, when the body carried one.
        code: Option<u32>,
        /// Human-readable message from the error body, or the raw body.
        message: String,
    },

    /// The response body was not valid JSON for the expected type.
    #[error("failed to decode response from {path}: {source}")]
    Parse {
        /// Request path whose body failed to decode.
        path: String,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// The request path could not be joined onto the base URL.
    #[error("invalid request path {path}: {source}")]
    Url {
        /// Offending path.
        path: String,
        /// Underlying parse error.
        source: url::ParseError,
    },
}

impl FetchError {
    /// Returns the HTTP status when the service answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_api_error_display() {
        // Arrange
        let err = FetchError::Api {
            status: 401,
            code: Some(7),
            message: String::from("Invalid API key: You must be granted a valid key."),
        };

        // Act
        let text = err.to_string();

        // Assert
        assert!(text.contains("HTTP 401"));
        assert!(text.contains("Invalid API key"));
    }

    #[test]
    fn test_parse_error_display_names_path() {
        // Arrange
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FetchError::Parse {
            path: String::from("movie/top_rated"),
            source,
        };

        // Act & Assert
        assert!(err.to_string().contains("movie/top_rated"));
    }

    #[test]
    fn test_status_accessor() {
        // Arrange
        let api = FetchError::Api {
            status: 404,
            code: None,
            message: String::from("not found"),
        };
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        let parse = FetchError::Parse {
            path: String::from("genre/movie/list"),
            source,
        };

        // Act & Assert
        assert_eq!(api.status(), Some(404));
        assert_eq!(parse.status(), None);
    }
}
