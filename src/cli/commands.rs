//! CLI command definitions and handlers

use clap::Subcommand;
use tracing::info;

use crate::core::client::Translator;
use crate::core::config::TranslatorConfig;
use crate::core::languages;

/// Commands for the Google Translate client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Source language (auto-detect if not specified)
        #[arg(short, long, default_value = "auto")]
        source_lang: String,

        /// Target language (default: en)
        #[arg(short, long, default_value = "en")]
        target_lang: String,

        /// Service host suffix, e.g. com, de, co.uk
        #[arg(long)]
        suffix: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Proxy as SCHEME=URL (scheme: http, https or all); repeatable
        #[arg(long, value_parser = parse_proxy)]
        proxy: Vec<(String, String)>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported language codes
    Languages,

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Parse a `SCHEME=URL` proxy argument
fn parse_proxy(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((scheme, url)) if !scheme.is_empty() && !url.is_empty() => {
            Ok((scheme.to_string(), url.to_string()))
        }
        _ => Err(format!("expected SCHEME=URL, got '{}'", value)),
    }
}

/// Overlay CLI flags on the environment configuration
pub fn build_config(
    suffix: Option<String>,
    timeout: Option<u64>,
    proxy: Vec<(String, String)>,
) -> anyhow::Result<TranslatorConfig> {
    let mut config = TranslatorConfig::from_env()?;
    if let Some(suffix) = suffix {
        config.url_suffix = suffix;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    config.proxies.extend(proxy);
    Ok(config.normalized())
}

/// Handle translate command
pub async fn handle_translate(
    text: String,
    source_lang: String,
    target_lang: String,
    config: TranslatorConfig,
    json: bool,
) -> anyhow::Result<()> {
    let translator = Translator::new(config)?;

    info!(
        "Translating {} characters: {} -> {}",
        text.chars().count(),
        source_lang,
        target_lang
    );

    let result = translator.translate(&text, &source_lang, &target_lang).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    Ok(())
}

/// Handle languages command
pub fn handle_languages() {
    for (code, name) in languages::LANGUAGES {
        println!("{:<6} {}", code, name);
    }
}

/// Handle server command
pub async fn handle_server(
    host: String,
    port: u16,
    config: TranslatorConfig,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(host, port, config).await?;

    Ok(())
}
