//! Translation API client

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{ApiResponse, TranslateData};

/// Query keys owned by the client itself
const RESERVED_QUERY_KEYS: &[&str] = &["q", "to", "engine"];

/// Remote translation backend.
///
/// One call is one request; retrying and rate limiting happen in the caller.
pub trait TranslationApi: Send + Sync {
    /// Translate `text` into `lang` with `engine`, returning `translated_text`
    fn translate(
        &self,
        text: &str,
        lang: &str,
        engine: &str,
        params: &BTreeMap<String, String>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Client for a metadata server's `/v1/translate` endpoint
#[derive(Debug, Clone)]
pub struct HttpTranslationApi {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpTranslationApi {
    /// Create a new client from configuration
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            url: config.translate_url(),
            token: config.api_token.clone(),
        })
    }

    async fn send_request(
        &self,
        text: &str,
        lang: &str,
        engine: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String> {
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("to", lang), ("engine", engine)];
        for (key, value) in params {
            if RESERVED_QUERY_KEYS.contains(&key.as_str()) {
                debug!("Dropping engine parameter that shadows a request field: {}", key);
                continue;
            }
            query.push((key.as_str(), value.as_str()));
        }

        let mut request = self.client.get(&self.url).query(&query);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            parse_translated_text(&body)
        } else {
            Err(status_error(status.as_u16(), &body))
        }
    }
}

impl TranslationApi for HttpTranslationApi {
    async fn translate(
        &self,
        text: &str,
        lang: &str,
        engine: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String> {
        self.send_request(text, lang, engine, params).await
    }
}

fn transport_error(e: reqwest::Error) -> TranslationError {
    if e.is_timeout() {
        TranslationError::TimeoutError
    } else {
        TranslationError::NetworkError {
            message: e.to_string(),
        }
    }
}

/// Extract `data.translated_text` from a success body
fn parse_translated_text(body: &str) -> Result<String> {
    let response: ApiResponse<TranslateData> =
        serde_json::from_str(body).map_err(|e| TranslationError::InvalidResponseError {
            message: e.to_string(),
        })?;

    if let Some(error) = response.error {
        return Err(TranslationError::ApiError {
            status: error.code,
            message: error.message,
        });
    }

    response
        .data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| TranslationError::InvalidResponseError {
            message: "No translated_text in response".to_string(),
        })
}

fn status_error(status: u16, body: &str) -> TranslationError {
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.error)
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => TranslationError::AuthError { message },
        429 => TranslationError::RateLimitError,
        _ => TranslationError::ApiError { status, message },
    }
}
