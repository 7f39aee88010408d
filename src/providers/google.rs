/*!
 * Google Translate client.
 *
 * Talks to the keyless `translate_a/single` web endpoint and extracts the
 * translated text from its nested JSON array response.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::TranslationError;
use crate::language_utils::Language;
use super::Translator;

/// Default public endpoint of the Google Translate web API
pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate client for the keyless web endpoint
#[derive(Debug)]
pub struct GoogleTranslator {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a new client with the given endpoint and request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for a translation
    pub fn request_url(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Url, TranslationError> {
        let endpoint = if self.endpoint.is_empty() {
            DEFAULT_GOOGLE_ENDPOINT
        } else {
            self.endpoint.as_str()
        };

        Url::parse_with_params(
            endpoint,
            &[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| {
            TranslationError::RequestFailed(format!("Invalid endpoint {}: {}", endpoint, e))
        })
    }

    /// Extract the translated text from a response body
    ///
    /// The body is a nested array whose first element lists translated
    /// segments; each segment starts with its translated text.
    pub fn extract_text_from_response(body: &Value) -> Result<String, TranslationError> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TranslationError::ParseError("Missing translation segments".to_string())
            })?;

        let text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if text.is_empty() && !segments.is_empty() {
            return Err(TranslationError::ParseError(
                "Translation segments contain no text".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError> {
        let url = self.request_url(text, source, target)?;
        debug!("Requesting translation {} -> {} ({} chars)", source, target, text.chars().count());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(TranslationError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        Self::extract_text_from_response(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}
