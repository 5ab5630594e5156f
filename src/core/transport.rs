//! HTTP transport used by the translator

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{ConfigError, TransportError};

/// Browser user agent sent with every request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/47.0.2526.106 Safari/537.36";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Response body as a stream of chunks
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Response head plus its unread body
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase as sent by the server
    pub reason: String,
    /// Unread body chunks
    pub body: BodyStream,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// Sends one form-encoded POST
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return once the response head has arrived
    async fn post_form(&self, url: &str, body: String) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport with browser headers.
///
/// Certificate verification is turned off on this client only. The
/// configured timeout bounds the connect phase and then every single read:
/// waiting for the response head, and each body chunk after it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    read_timeout: Duration,
}

impl HttpTransport {
    /// Build the client from the translator configuration
    pub fn new(config: &TranslatorConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        let referer = format!("{}/", config.base_url());
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer).map_err(|_| ConfigError::InvalidValue {
                key: "url_suffix",
                value: config.url_suffix.clone(),
            })?,
        );

        let timeout = Duration::from_secs(config.timeout_secs);
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .danger_accept_invalid_certs(true);

        for proxy in config.build_proxies()? {
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            read_timeout: timeout,
        })
    }
}

fn read_timed_out() -> TransportError {
    TransportError::Request(Box::new(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "read timed out",
    )))
}

/// Reason phrase on the status line, falling back to the canonical one
fn reason_phrase(response: &reqwest::Response) -> String {
    if let Some(reason) = response.extensions().get::<hyper::ext::ReasonPhrase>() {
        return String::from_utf8_lossy(reason.as_bytes()).into_owned();
    }
    response
        .status()
        .canonical_reason()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, body: String) -> Result<TransportResponse, TransportError> {
        debug!("POST {} ({} bytes)", url, body.len());

        // Connect is bounded by the client; the head gets one more read period
        let head_deadline = self.read_timeout * 2;
        let response = tokio::time::timeout(head_deadline, self.client.post(url).body(body).send())
            .await
            .map_err(|_| read_timed_out())??;

        let status = response.status().as_u16();
        let reason = reason_phrase(&response);

        let read_timeout = self.read_timeout;
        let body = stream::unfold(response.bytes_stream().boxed(), move |mut chunks| async move {
            match tokio::time::timeout(read_timeout, chunks.next()).await {
                Ok(Some(chunk)) => Some((chunk.map_err(TransportError::from), chunks)),
                Ok(None) => None,
                Err(_) => Some((Err(read_timed_out()), chunks)),
            }
        })
        .boxed();

        Ok(TransportResponse {
            status,
            reason,
            body,
        })
    }
}
