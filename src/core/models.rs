//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::errors::TranslationError;

/// Language code that is never translated.
pub const JAPANESE: &str = "ja";

/// Parameter key that forces the target language.
pub const TARGET_OVERRIDE_KEY: &str = "to";

/// Which metadata fields the host wants translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslationMode {
    /// Nothing is translated
    #[default]
    Disabled,
    /// Titles only
    Title,
    /// Summaries only
    Summary,
    /// Titles and summaries
    TitleAndSummary,
}

impl TranslationMode {
    /// Titles are translated in this mode
    pub fn translates_title(self) -> bool {
        matches!(self, TranslationMode::Title | TranslationMode::TitleAndSummary)
    }

    /// Summaries are translated in this mode
    pub fn translates_summary(self) -> bool {
        matches!(self, TranslationMode::Summary | TranslationMode::TitleAndSummary)
    }

    /// Anything is translated in this mode
    pub fn is_enabled(self) -> bool {
        self != TranslationMode::Disabled
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationMode::Disabled => write!(f, "Disabled"),
            TranslationMode::Title => write!(f, "Title"),
            TranslationMode::Summary => write!(f, "Summary"),
            TranslationMode::TitleAndSummary => write!(f, "Title and Summary"),
        }
    }
}

impl FromStr for TranslationMode {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "" => Ok(TranslationMode::Disabled),
            "title" => Ok(TranslationMode::Title),
            "summary" => Ok(TranslationMode::Summary),
            "title and summary" | "title & summary" => Ok(TranslationMode::TitleAndSummary),
            other => Err(TranslationError::ConfigError {
                message: format!("unknown translation mode: {}", other),
            }),
        }
    }
}

/// Extra engine parameters parsed from a `key=value,key=value` table.
///
/// Keys are kept literally. The `to` entry is lifted into
/// [`EngineParameters::target_override`] and never forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParameters {
    /// Language forced by the `to` entry
    pub target_override: Option<String>,
    /// Everything else, forwarded to the engine
    pub params: BTreeMap<String, String>,
}

impl EngineParameters {
    /// Parse a parameter table such as `appid=123,key=abc,to=zh-CN`
    pub fn parse(table: &str) -> Self {
        let mut parsed = Self::default();

        for entry in table.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let Some((key, value)) = entry.split_once('=') else {
                debug!("Skipping malformed engine parameter: {}", entry);
                continue;
            };

            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                debug!("Skipping engine parameter without key: {}", entry);
                continue;
            }

            if key == TARGET_OVERRIDE_KEY {
                parsed.target_override = (!value.is_empty()).then(|| value.to_string());
            } else {
                parsed.params.insert(key.to_string(), value.to_string());
            }
        }

        parsed
    }

    /// No override and no parameters
    pub fn is_empty(&self) -> bool {
        self.target_override.is_none() && self.params.is_empty()
    }
}

/// Engine selection resolved from preferences for one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine identifier
    pub engine: String,
    /// Parsed engine parameters
    pub parameters: EngineParameters,
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Requested target language
    pub target_lang: String,
    /// Returned when translation is skipped or fails
    pub fallback: Option<String>,
}

impl TranslationRequest {
    /// Request without a fallback
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_lang: target_lang.into(),
            fallback: None,
        }
    }

    /// Set the fallback value
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Envelope returned by the metadata server
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload on success
    pub data: Option<T>,
    /// Error details on failure
    pub error: Option<ApiErrorBody>,
}

/// Error payload inside [`ApiResponse`]
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP-like status code
    #[serde(default)]
    pub code: u16,
    /// Human-readable reason
    #[serde(default)]
    pub message: String,
}

/// Payload of a successful translate call
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateData {
    /// The translation
    pub translated_text: Option<String>,
}
