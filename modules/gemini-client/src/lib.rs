pub mod error;
pub(crate) mod types;

pub use error::{GeminiError, Result};
pub use types::GenerationConfig;

use std::time::Duration;

use tracing::{debug, warn};

use types::{GenerateContentRequest, GenerateContentResponse};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Clone generation can take a while for large prompts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A single text completion, with a flag for whether it was cut off by the
/// output-length ceiling. Truncation is not a hard failure; the caller decides
/// whether a shortened document is still usable.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub truncated: bool,
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            http,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single prompt and return the raw text completion.
    pub async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<Completion> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, prompt_bytes = prompt.len(), "Gemini generate request");

        let request = GenerateContentRequest::new(prompt, config);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let truncated = envelope.truncated();
        if truncated {
            warn!(model = %self.model, "Gemini response truncated at output token limit");
        }

        let text = envelope.text().ok_or(GeminiError::EmptyResponse)?;

        Ok(Completion { text, truncated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_holds_model() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL);
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[test]
    fn base_url_override_trims_slash() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL)
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
