//! Gender-bias analysis: result schema and the analyzer seam.
//!
//! [`Analyzer`] turns text into an [`AnalysisResult`] or an
//! [`AnalysisError`]. [`GeminiAnalyzer`] is the production implementation;
//! tests drive the controller with canned analyzers instead.

/// Response schema sent with every request.
pub mod schema;
mod types;

pub use types::*;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AnalysisError, GeminiResult};
use crate::gemini::{GeminiClient, GenerateContentRequest};
use crate::prompts::{user_prompt, SYSTEM_INSTRUCTION};

/// Something that can analyze narrative text.
///
/// Results are not reproducible: the same text may yield a different
/// result on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze `text`. The caller guarantees it is non-blank.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Analyzer backed by a single Gemini `generateContent` call.
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: GeminiClient,
    temperature: Option<f64>,
}

impl GeminiAnalyzer {
    /// Wrap an existing client
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            temperature: None,
        }
    }

    /// Build the client from configuration
    pub fn from_config(config: &Config) -> GeminiResult<Self> {
        let client = GeminiClient::new(&config.gemini, config.request.clone())?;
        Ok(Self {
            client,
            temperature: config.gemini.temperature,
        })
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request sent for `text`
    pub fn build_request(&self, text: &str) -> GenerateContentRequest {
        let request = GenerateContentRequest::new(user_prompt(text))
            .with_system_instruction(SYSTEM_INSTRUCTION)
            .with_json_schema(schema::response_schema());

        match self.temperature {
            Some(t) => request.with_temperature(t),
            None => request,
        }
    }

    /// Underlying client
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        debug!(chars = text.chars().count(), "Starting analysis");

        let request = self.build_request(text);
        let response = self.client.generate_content(&request).await?;

        let reply = response.text().ok_or_else(|| {
            warn!(
                finish_reason = response.finish_reason().unwrap_or("unknown"),
                "Gemini returned no text"
            );
            AnalysisError::EmptyResponse
        })?;

        AnalysisResult::from_reply(&reply).map_err(|e| {
            warn!(error = %e, "Reply does not match the result schema");
            AnalysisError::SchemaMismatch {
                message: e.to_string(),
            }
        })
    }
}
