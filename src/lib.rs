//! Google Translate web client
//!
//! This library translates text through the batchexecute endpoint used by
//! the Google Translate web page, and ships a CLI and a small HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    client::Translator,
    config::TranslatorConfig,
    errors::{ApiError, ParseError, TranslationError, TransportError},
    models::{Language, TranslatedResult, TranslatedText, TranslationRequest},
    transport::{HttpTransport, Transport},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
