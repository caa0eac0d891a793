//! Metadata Translator - rate-limited translation helper for metadata agents
//!
//! Forwards titles and summaries to a translation API. Calls are spaced by a
//! shared rate limiter, retried a bounded number of times, and resolved to a
//! caller-supplied fallback instead of an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod cli;

// Re-export key types for convenience
pub use core::{
    client::{HttpTranslationApi, TranslationApi},
    config::TranslatorConfig,
    errors::TranslationError,
    models::{EngineConfig, EngineParameters, TranslationMode, TranslationRequest, JAPANESE},
    preferences::{FilePreferences, PreferenceStore, Preferences, StaticPreferences},
    rate_limiter::RateLimiter,
    retry::{retry, retry_with, DEFAULT_RETRY_COUNT},
    translator::Translator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
