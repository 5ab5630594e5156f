//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::core::client::Translator;
use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::languages;
use crate::core::models::{TranslatedResult, TranslationRequest};

/// Application state; clones share the translator's transport
#[derive(Clone)]
pub struct AppState {
    translator: Translator,
}

impl AppState {
    /// Wrap a translator for the router
    pub fn new(translator: Translator) -> Self {
        Self { translator }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

#[derive(Serialize)]
struct LanguageInfo {
    code: &'static str,
    name: &'static str,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    /// What went wrong
    pub error: ErrorDetail,
}

/// Error message and machine-readable code
#[derive(Serialize)]
pub struct ErrorDetail {
    /// Display text of the translation error
    pub message: String,
    /// Stable code, e.g. `invalid_request` or `timeout`
    pub code: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a translation error to an HTTP status and error code
fn error_status(err: &TranslationError) -> (StatusCode, &'static str) {
    match err {
        TranslationError::InvalidLanguage { .. } | TranslationError::TextTooLong { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_request")
        }
        TranslationError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
        TranslationError::Api(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
        TranslationError::Parse(_) => (StatusCode::BAD_GATEWAY, "invalid_response"),
        TranslationError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
    }
}

fn error_response(err: TranslationError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = error_status(&err);
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail {
                message: err.to_string(),
                code: code.to_string(),
            },
        }),
    )
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Supported languages handler
async fn get_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        languages::LANGUAGES
            .iter()
            .map(|&(code, name)| LanguageInfo { code, name })
            .collect(),
    )
}

/// Translation handler
async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslationRequest>,
) -> ApiResult<TranslatedResult> {
    match state.translator.translate_request(&payload).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(error_response(e))
        }
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/languages", get(get_languages))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config: TranslatorConfig) -> anyhow::Result<()> {
    let translator = Translator::new(config)?;
    let app = router(AppState::new(translator));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{ApiError, LanguageKind, ParseError};

    #[test]
    fn test_error_status_mapping() {
        let invalid = TranslationError::InvalidLanguage {
            kind: LanguageKind::Target,
            code: "xx".to_string(),
        };
        assert_eq!(error_status(&invalid).0, StatusCode::BAD_REQUEST);

        let api = TranslationError::Api(ApiError::from_response(403, "Forbidden", "en"));
        assert_eq!(error_status(&api), (StatusCode::BAD_GATEWAY, "upstream_error"));

        let parse = TranslationError::Parse(ParseError::UnexpectedVariantCount(0));
        assert_eq!(error_status(&parse).1, "invalid_response");
    }

    #[tokio::test]
    async fn test_invalid_language_is_bad_request() {
        let translator = Translator::new(TranslatorConfig::default()).unwrap();
        let state = AppState::new(translator);
        let request = TranslationRequest::new("hello", "nope");

        let (status, body) = translate(State(state), Json(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "invalid_request");
        assert!(body.error.message.contains("nope"));
    }

    #[tokio::test]
    async fn test_router_serves_translate_errors() {
        let translator = Translator::new(TranslatorConfig::default()).unwrap();
        let app = router(AppState::new(translator));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let response = client
            .post(format!("http://{}/translate", addr))
            .json(&serde_json::json!({ "text": "hello", "target_lang": "nope" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_languages_listing() {
        let Json(list) = get_languages().await;
        assert_eq!(list.len(), languages::LANGUAGES.len());
        assert!(list.iter().any(|l| l.code == "en" && l.name == "english"));
    }
}
