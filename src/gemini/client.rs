use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::{GeminiConfig, RequestConfig};
use crate::error::{GeminiError, GeminiResult};

/// Client for the Gemini `generateContent` endpoint.
///
/// Every call is a single attempt. Retrying is left to the user.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    request_config: RequestConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig, request_config: RequestConfig) -> GeminiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(GeminiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            request_config,
        })
    }

    /// Generate content with the configured model.
    ///
    /// Fails with [`GeminiError::MissingApiKey`] before touching the network
    /// when no key is configured.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(
            model = %self.model,
            contents = request.contents.len(),
            "Calling Gemini generateContent"
        );

        let start = Instant::now();
        let result = self.execute_request(&url, api_key, request).await;
        let latency = start.elapsed();

        match &result {
            Ok(response) => info!(
                model = %self.model,
                latency_ms = latency.as_millis(),
                finish_reason = response.finish_reason().unwrap_or("unknown"),
                "Gemini call succeeded"
            ),
            Err(e) => error!(
                model = %self.model,
                error = %e,
                latency_ms = latency.as_millis(),
                "Gemini call failed"
            ),
        }

        result
    }

    async fn execute_request(
        &self,
        url: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeminiError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    GeminiError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Model used for generation
    pub fn model(&self) -> &str {
        &self.model
    }
}
