//! Custom error types for translation operations

use thiserror::Error;

/// Boxed error kept as the source of transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Unknown source or destination language code
    #[error("Invalid {kind} language: {code}")]
    InvalidLanguage {
        /// Source or target
        kind: LanguageKind,
        /// The rejected code
        code: String,
    },

    /// Input text at or above the character limit
    #[error("The text to be translated must be less than {limit} characters (got {length})")]
    TextTooLong {
        /// Characters in the input
        length: usize,
        /// Exclusive maximum
        limit: usize,
    },

    /// The connection could not be opened in time; carries the transport error untouched
    #[error(transparent)]
    Timeout(TransportError),

    /// A response was received and signals failure, or the request failed without one
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The marker line could not be decoded
    #[error("Invalid response: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Which side of the translation a language code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    /// Language of the input text
    Source,
    /// Language to translate into
    Target,
}

impl std::fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageKind::Source => write!(f, "source"),
            LanguageKind::Target => write!(f, "target"),
        }
    }
}

/// Failures raised by a [`Transport`](crate::core::transport::Transport)
#[derive(Error, Debug)]
pub enum TransportError {
    /// Opening the connection timed out
    #[error("Request timeout: {0}")]
    Timeout(#[source] BoxError),

    /// Any other request failure, read timeouts included
    #[error("Request failed: {0}")]
    Request(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() && err.is_timeout() {
            TransportError::Timeout(Box::new(err))
        } else {
            TransportError::Request(Box::new(err))
        }
    }
}

/// Upstream failure with its probable cause
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    /// Reason phrase sent by the server
    pub reason: Option<String>,
    /// Probable cause from [`infer_cause`]
    pub cause: String,
    message: String,
}

impl ApiError {
    /// No response object was obtained
    pub fn no_response() -> Self {
        Self {
            status: None,
            reason: None,
            cause: "timeout".to_string(),
            message: "Failed to connect: timeout".to_string(),
        }
    }

    /// A response arrived but did not carry a translation
    pub fn from_response(status: u16, reason: &str, dest_lang: &str) -> Self {
        let cause = infer_cause(status, dest_lang);
        let message = format!(
            "{} ({}) from translate API. Probable cause: {}",
            status, reason, cause
        );
        Self {
            status: Some(status),
            reason: Some(reason.to_string()),
            cause,
            message,
        }
    }
}

/// Guess why a response failed from its status code.
///
/// A 2xx status only reaches here when the body had no translation line.
pub fn infer_cause(status: u16, dest_lang: &str) -> String {
    match status {
        403 => "Bad token or upstream API changes".to_string(),
        200..=299 => format!(
            "No audio stream in response; unsupported language '{}'",
            dest_lang
        ),
        s if s >= 500 => "Upstream API error, try again later".to_string(),
        _ => "Unknown cause".to_string(),
    }
}

/// Errors decoding the nested response payload
#[derive(Error, Debug)]
pub enum ParseError {
    /// A layer of the payload was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A positional field was missing or had the wrong type
    #[error("unexpected shape at {path}: expected {expected}")]
    Shape {
        /// Positional path, e.g. `response[1][0]`
        path: String,
        /// Type that was expected there
        expected: &'static str,
    },

    /// The provider reported a language code missing from the table
    #[error("unknown detected language: {0}")]
    UnknownLanguage(String),

    /// The translation payload had neither one nor two variants
    #[error("unexpected number of translation variants: {0}")]
    UnexpectedVariantCount(usize),
}

/// Invalid translator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `timeout_secs` was 0
    #[error("timeout must be greater than 0")]
    ZeroTimeout,

    /// Proxy key other than `http`, `https` or `all`
    #[error("unsupported proxy scheme: {0}")]
    ProxyScheme(String),

    /// Proxy URL rejected by reqwest
    #[error("invalid proxy url {url}: {message}")]
    ProxyUrl {
        /// The URL as configured
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Environment variable with an unparsable value
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// Config file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_cause() {
        let err = ApiError::from_response(403, "Forbidden", "en");
        assert_eq!(err.status, Some(403));
        assert!(err.to_string().contains("Bad token or upstream API changes"));
        assert!(err.to_string().starts_with("403 (Forbidden)"));
    }

    #[test]
    fn test_infer_cause_table() {
        assert_eq!(infer_cause(500, "en"), "Upstream API error, try again later");
        assert_eq!(infer_cause(503, "en"), "Upstream API error, try again later");
        assert_eq!(infer_cause(404, "en"), "Unknown cause");
        assert_eq!(infer_cause(429, "en"), "Unknown cause");
        assert!(infer_cause(200, "xx").starts_with("No audio stream in response; unsupported language"));
    }

    #[test]
    fn test_no_response_message() {
        let err = ApiError::no_response();
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "Failed to connect: timeout");
    }

    #[test]
    fn test_timeout_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let err = TranslationError::Timeout(TransportError::Timeout(Box::new(io)));
        assert_eq!(err.to_string(), "Request timeout: connect timed out");
    }
}
