pub mod error;

pub use error::{BrowserlessError, Result};

use std::time::Duration;

use tracing::debug;

/// Request timeout. A /function call covers navigation (30s), the network-idle
/// wait (15s), the settle delay (2s) and the in-page evaluations, so this has
/// to sit well above the sum of those bounds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let mut endpoint = format!("{}{}", self.base_url, path);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// Run a Puppeteer driver script against a fresh page via the Browserless
    /// /function endpoint. The script receives `context` as its argument and the
    /// data it returns comes back as JSON. Browserless scopes the page to this
    /// one call and tears it down on every exit path, including script throws.
    pub async fn function(
        &self,
        code: &str,
        context: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!(bytes = code.len(), "Browserless function request");

        let body = serde_json::json!({
            "code": code,
            "context": context,
        });

        let resp = self
            .client
            .post(self.endpoint("/function"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BrowserlessError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| BrowserlessError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_without_token() {
        let client = BrowserlessClient::new("http://localhost:3000/", None);
        assert_eq!(client.endpoint("/function"), "http://localhost:3000/function");
    }

    #[test]
    fn endpoint_appends_token() {
        let client = BrowserlessClient::new("http://localhost:3000", Some("abc123"));
        assert_eq!(
            client.endpoint("/content"),
            "http://localhost:3000/content?token=abc123"
        );
    }
}
