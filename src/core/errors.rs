//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status
        status: u16,
        /// Server-provided reason
        message: String,
    },

    /// Credentials rejected by the API
    #[error("Authentication failed: {message}")]
    AuthError {
        /// Server-provided reason
        message: String,
    },

    /// Rate limit exceeded on the remote side
    #[error("Rate limit exceeded")]
    RateLimitError,

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport failure description
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the body
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What was wrong with the configuration
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Preference source error
    #[error("Preference error: {0}")]
    Config(#[from] config::ConfigError),
}

impl TranslationError {
    /// Whether another attempt could succeed.
    ///
    /// Bad credentials and broken configuration fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            TranslationError::AuthError { .. }
                | TranslationError::ConfigError { .. }
                | TranslationError::Config(_)
        )
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_and_config_errors_are_permanent() {
        let auth = TranslationError::AuthError {
            message: "invalid token".to_string(),
        };
        let config = TranslationError::ConfigError {
            message: "no endpoint".to_string(),
        };

        assert!(!auth.is_retryable());
        assert!(!config.is_retryable());
    }

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(TranslationError::TimeoutError.is_retryable());
        assert!(TranslationError::RateLimitError.is_retryable());
        assert!(TranslationError::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = TranslationError::ApiError {
            status: 500,
            message: "engine crashed".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - engine crashed");

        let err: TranslationError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
