use thiserror::Error;

/// User-facing message shown for every analysis failure that a retry may fix.
pub const RETRY_LATER_MESSAGE: &str = "分析失败，请稍后重试。";

/// User-facing message shown when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "API Key is missing.";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid environment configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An analysis call failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// A controller action was refused.
    #[error("Action refused: {0}")]
    Action(#[from] ActionError),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal state.
    #[error("Internal error: {message}")]
    Internal {
        /// Description
        message: String,
    },
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("Database connection failed: {message}")]
    Connection {
        /// Underlying cause
        message: String,
    },

    /// A statement failed.
    #[error("Query failed: {message}")]
    Query {
        /// Underlying cause
        message: String,
    },

    /// Schema migrations failed.
    #[error("Migration failed: {message}")]
    Migration {
        /// Underlying cause
        message: String,
    },

    /// A stored value could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Raw driver error.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Gemini API transport errors
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key configured; nothing was sent.
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// Non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The body is not a `generateContent` response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Parse failure
        message: String,
    },

    /// The request exceeded its deadline.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Connection-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single analysis call.
///
/// The four variants are the only kinds the controller distinguishes. Each
/// maps to a message fit for display next to the submit control.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No credential configured.
    #[error("API key is missing")]
    MissingApiKey,

    /// The call failed on the way out or back.
    #[error("Analysis request failed: {0}")]
    Transport(GeminiError),

    /// The call succeeded without any answer text.
    #[error("No response generated")]
    EmptyResponse,

    /// The answer is not a valid [`crate::analysis::AnalysisResult`].
    #[error("Response does not match the result schema: {message}")]
    SchemaMismatch {
        /// Parse failure
        message: String,
    },
}

/// Coarse classification of an [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    /// Required credential absent; fix configuration.
    Configuration,
    /// The outbound call failed or timed out.
    Transport,
    /// The call succeeded without a payload.
    EmptyReply,
    /// The payload did not parse into the result schema.
    SchemaMismatch,
}

impl AnalysisError {
    /// Classify this error.
    pub fn kind(&self) -> AnalysisErrorKind {
        match self {
            AnalysisError::MissingApiKey => AnalysisErrorKind::Configuration,
            AnalysisError::Transport(_) => AnalysisErrorKind::Transport,
            AnalysisError::EmptyResponse => AnalysisErrorKind::EmptyReply,
            AnalysisError::SchemaMismatch { .. } => AnalysisErrorKind::SchemaMismatch,
        }
    }

    /// Message shown to the user. Only a missing key gets its own wording;
    /// everything else reads as "retry later".
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            AnalysisErrorKind::Configuration => MISSING_API_KEY_MESSAGE,
            _ => RETRY_LATER_MESSAGE,
        }
    }
}

impl From<GeminiError> for AnalysisError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => AnalysisError::MissingApiKey,
            other => AnalysisError::Transport(other),
        }
    }
}

/// Controller actions that were refused without changing state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Submit with blank input.
    #[error("Input text is empty")]
    EmptyInput,

    /// An analysis is in flight.
    #[error("An analysis is already in progress")]
    Busy,

    /// Report or suggestions requested without a result.
    #[error("Tab '{tab}' is not available without a completed analysis")]
    TabUnavailable {
        /// Requested tab
        tab: String,
    },

    /// No history entry has this id.
    #[error("History entry not found: {id}")]
    HistoryEntryNotFound {
        /// Requested id
        id: String,
    },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for Gemini transport operations
pub type GeminiResult<T> = Result<T, GeminiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "bad base url".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: bad base url");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Connection {
            message: "failed to connect".to_string(),
        };
        assert_eq!(err.to_string(), "Database connection failed: failed to connect");

        let err = StorageError::Migration {
            message: "version mismatch".to_string(),
        };
        assert_eq!(err.to_string(), "Migration failed: version mismatch");
    }

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::Api {
            status: 429,
            message: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 429 - quota");

        let err = GeminiError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_missing_key_is_not_collapsed_into_transport() {
        let err: AnalysisError = GeminiError::MissingApiKey.into();
        assert!(matches!(err, AnalysisError::MissingApiKey));
        assert_eq!(err.kind(), AnalysisErrorKind::Configuration);
        assert_eq!(err.user_message(), MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn test_transport_failures_share_retry_message() {
        let err: AnalysisError = GeminiError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }
        .into();
        assert_eq!(err.kind(), AnalysisErrorKind::Transport);
        assert_eq!(err.user_message(), RETRY_LATER_MESSAGE);

        assert_eq!(AnalysisError::EmptyResponse.user_message(), RETRY_LATER_MESSAGE);
        let err = AnalysisError::SchemaMismatch {
            message: "missing field `stats`".to_string(),
        };
        assert_eq!(err.kind(), AnalysisErrorKind::SchemaMismatch);
        assert_eq!(err.user_message(), RETRY_LATER_MESSAGE);
    }

    #[test]
    fn test_action_error_display() {
        let err = ActionError::TabUnavailable {
            tab: "report".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Tab 'report' is not available without a completed analysis"
        );

        let err = ActionError::HistoryEntryNotFound {
            id: "1700000000000".to_string(),
        };
        assert_eq!(err.to_string(), "History entry not found: 1700000000000");
    }

    #[test]
    fn test_error_conversions_to_app_error() {
        let app_err: AppError = StorageError::Query {
            message: "locked".to_string(),
        }
        .into();
        assert!(matches!(app_err, AppError::Storage(_)));

        let app_err: AppError = AnalysisError::EmptyResponse.into();
        assert!(matches!(app_err, AppError::Analysis(_)));

        let app_err: AppError = ActionError::Busy.into();
        assert!(matches!(app_err, AppError::Action(ActionError::Busy)));
    }
}
