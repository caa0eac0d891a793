//! Rate-limited translator that never fails its caller

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::{HttpTranslationApi, TranslationApi};
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{EngineConfig, TranslationRequest, JAPANESE};
use crate::core::preferences::PreferenceStore;
use crate::core::rate_limiter::RateLimiter;
use crate::core::retry::{retry_with, DEFAULT_RETRY_COUNT};

/// Translates metadata text, resolving every failure to a fallback.
///
/// Preferences are read fresh on each call. Dispatches are spaced by the
/// shared [`RateLimiter`]; give two translators the same limiter to make them
/// share one budget.
pub struct Translator<A> {
    api: Arc<A>,
    preferences: Arc<dyn PreferenceStore>,
    limiter: Arc<RateLimiter>,
    max_retries: u32,
}

impl<A> Clone for Translator<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            preferences: self.preferences.clone(),
            limiter: self.limiter.clone(),
            max_retries: self.max_retries,
        }
    }
}

impl Translator<HttpTranslationApi> {
    /// Create an HTTP-backed translator
    pub fn from_config(
        config: &TranslatorConfig,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self> {
        let api = HttpTranslationApi::new(config)?;

        Ok(Self::new(api, preferences)
            .with_rate_limiter(Arc::new(RateLimiter::new(config.rate_interval())))
            .with_max_retries(config.max_retries))
    }
}

impl<A: TranslationApi> Translator<A> {
    /// Create a translator with its own one-per-second limiter
    pub fn new(api: A, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            api: Arc::new(api),
            preferences,
            limiter: Arc::new(RateLimiter::per_second()),
            max_retries: DEFAULT_RETRY_COUNT,
        }
    }

    /// Share `limiter` with other translators
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Attempts per dispatch sequence
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Translate `text` into `lang`, or return `fallback`.
    ///
    /// Returns `fallback` when the text is empty, translation is disabled,
    /// the requested language is Japanese, or every attempt failed.
    pub async fn translate(&self, text: &str, lang: &str, fallback: Option<String>) -> Option<String> {
        if text.is_empty() {
            warn!("Translation text is empty");
            return fallback;
        }

        let prefs = self.preferences.load();
        if !prefs.mode.is_enabled() {
            warn!("Translation is disabled");
            return fallback;
        }

        if lang == JAPANESE {
            warn!("Translation not applied to Japanese");
            return fallback;
        }

        let EngineConfig { engine, parameters } = prefs.engine_config();

        let lang = match parameters.target_override {
            Some(forced) => {
                info!("Force setting translation language from {} to {}", lang, forced);
                forced
            }
            None => lang.to_string(),
        };

        info!("Translate text to {}: {}", lang, text);

        let api = &*self.api;
        let (lang, engine, params) = (lang.as_str(), engine.as_str(), &parameters.params);

        // Held across every attempt so sequences never interleave.
        let permit = self.limiter.acquire().await;
        let result = retry_with(
            move || async move { api.translate(text, lang, engine, params).await.map(Some) },
            fallback,
            self.max_retries,
            TranslationError::is_retryable,
        )
        .await;
        drop(permit);

        result
    }

    /// Translate a [`TranslationRequest`], returning its fallback on failure
    pub async fn translate_request(&self, request: &TranslationRequest) -> Option<String> {
        self.translate(&request.text, &request.target_lang, request.fallback.clone())
            .await
    }

    /// Translate a title if the current mode covers titles, else keep it
    pub async fn translate_title(&self, title: &str, lang: &str) -> String {
        if !self.preferences.load().mode.translates_title() {
            return title.to_string();
        }

        self.translate(title, lang, None)
            .await
            .unwrap_or_else(|| title.to_string())
    }

    /// Translate a summary if the current mode covers summaries, else keep it
    pub async fn translate_summary(&self, summary: &str, lang: &str) -> String {
        if !self.preferences.load().mode.translates_summary() {
            return summary.to_string();
        }

        self.translate(summary, lang, None)
            .await
            .unwrap_or_else(|| summary.to_string())
    }
}
