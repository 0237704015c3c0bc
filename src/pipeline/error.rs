/// Error types for the translation pipeline
///
/// These errors stay inside the pipeline: the service layer catches every
/// one of them and degrades to the fallback table or the untranslated
/// input, so callers of [`crate::pipeline::TranslationService`] never see
/// them. They are public for backend implementors and for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Backend misconfiguration (missing endpoint, bad base URL)
    Config(String),
    /// Transport failure reaching the translation backend
    Network(String),
    /// Unexpected response shape (malformed body, length mismatch)
    Protocol(String),
    /// The backend answered but could not translate
    Translation(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::Network(msg) => write!(f, "Network error: {}", msg),
            TranslateError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            TranslateError::Translation(msg) => write!(f, "Translation error: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            TranslateError::Network(err.to_string())
        } else if err.is_decode() {
            TranslateError::Protocol(err.to_string())
        } else {
            TranslateError::Translation(err.to_string())
        }
    }
}

/// Result type for backend operations
pub type TranslateResult<T> = Result<T, TranslateError>;
