//! Translation client for the web batchexecute endpoint

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{ApiError, LanguageKind, Result, TranslationError, TransportError};
use crate::core::languages;
use crate::core::models::{TranslatedResult, TranslationRequest};
use crate::core::parser;
use crate::core::rpc;
use crate::core::transport::{HttpTransport, Transport};

/// Maximum input length, in characters (exclusive)
pub const MAX_TEXT_CHARS: usize = 5000;

/// Single-shot translator: one request per call, no retries
#[derive(Clone)]
pub struct Translator {
    transport: Arc<dyn Transport>,
    config: Arc<TranslatorConfig>,
    endpoint: String,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Create a new translator over HTTP
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(TranslatorConfig::from_env()?)
    }

    /// Create a translator over a custom transport
    pub fn with_transport(config: TranslatorConfig, transport: Arc<dyn Transport>) -> Self {
        let config = config.normalized();
        let endpoint = config.endpoint();
        info!("Translator ready for {}", endpoint);

        Self {
            transport,
            config: Arc::new(config),
            endpoint,
        }
    }

    /// Normalized configuration
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Full batchexecute URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Translate `text` from `src_lang` (a code or `"auto"`) into `dest_lang`.
    ///
    /// Arguments are checked before any network I/O. Blank text returns an
    /// empty result without sending a request.
    pub async fn translate(
        &self,
        text: &str,
        src_lang: &str,
        dest_lang: &str,
    ) -> Result<TranslatedResult> {
        if !languages::is_supported_source(src_lang) {
            return Err(TranslationError::InvalidLanguage {
                kind: LanguageKind::Source,
                code: src_lang.to_string(),
            });
        }
        if !languages::is_supported(dest_lang) {
            return Err(TranslationError::InvalidLanguage {
                kind: LanguageKind::Target,
                code: dest_lang.to_string(),
            });
        }

        let length = text.chars().count();
        if length >= MAX_TEXT_CHARS {
            return Err(TranslationError::TextTooLong {
                length,
                limit: MAX_TEXT_CHARS,
            });
        }
        if text.trim().is_empty() {
            return Ok(TranslatedResult::empty(src_lang, dest_lang));
        }

        let body = rpc::build_request_body(text, src_lang, dest_lang);
        self.send_request(body, dest_lang).await
    }

    /// Translate a [`TranslationRequest`]
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslatedResult> {
        self.translate(&request.text, &request.source_lang, &request.target_lang)
            .await
    }

    /// Send the request and turn the response into a result or an error
    async fn send_request(&self, body: String, dest_lang: &str) -> Result<TranslatedResult> {
        let response = self
            .transport
            .post_form(&self.endpoint, body)
            .await
            .map_err(transport_failure)?;

        debug!("Response {} ({})", response.status, response.reason);

        let line = parser::find_marker_line(response.body)
            .await
            .map_err(transport_failure)?;

        match line {
            Some(line) => parser::parse_marker_line(&line)
                .and_then(|payload| payload.into_result(dest_lang))
                .map_err(|e| {
                    debug!("Failed to parse translation line: {}", e);
                    TranslationError::Parse(e)
                }),
            None => {
                let err = ApiError::from_response(response.status, &response.reason, dest_lang);
                debug!("No translation line in response: {}", err);
                Err(TranslationError::Api(err))
            }
        }
    }
}

/// Timeouts pass through untouched; anything else becomes a response-less API error
fn transport_failure(err: TransportError) -> TranslationError {
    debug!("{}", err);
    match err {
        TransportError::Timeout(_) => TranslationError::Timeout(err),
        TransportError::Request(_) => TranslationError::Api(ApiError::no_response()),
    }
}
