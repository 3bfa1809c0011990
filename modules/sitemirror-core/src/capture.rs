//! Page capture over a Browserless instance.
//!
//! One /function call scopes the whole capture: viewport and user agent setup,
//! navigation with the wait policy, every in-page evaluation, and the
//! screenshot. Browserless tears the page down on every exit path, including
//! driver throws, so no page resource outlives a capture.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use browserless_client::BrowserlessClient;

use crate::error::ScrapeError;
use crate::limits;
use crate::scripts;

/// Raw capture payload. Per-category evaluation results stay untyped here;
/// the assembler decodes them so a malformed category degrades on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapturedPage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub styles: Value,
    #[serde(default)]
    pub scripts: Value,
    #[serde(default)]
    pub animations: Value,
    #[serde(default)]
    pub responsive: Value,
    #[serde(default)]
    pub layout: Value,
    /// Base64-encoded full-page PNG; empty when the screenshot failed.
    #[serde(default)]
    pub screenshot: String,
}

#[async_trait]
pub trait PageCapturer: Send + Sync {
    async fn capture(&self, url: &str) -> Result<CapturedPage, ScrapeError>;
}

pub struct BrowserlessCapturer {
    client: BrowserlessClient,
    driver: String,
}

impl BrowserlessCapturer {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        info!(base_url, "Using BrowserlessCapturer");
        Self {
            client: BrowserlessClient::new(base_url, token),
            driver: scripts::driver_script(),
        }
    }
}

#[async_trait]
impl PageCapturer for BrowserlessCapturer {
    async fn capture(&self, url: &str) -> Result<CapturedPage, ScrapeError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ScrapeError::Navigation(format!("Invalid URL: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::Navigation(format!(
                "Only http/https URLs are allowed, got: {}",
                parsed.scheme()
            )));
        }

        info!(url, "Capturing page");

        let context = serde_json::json!({
            "url": url,
            "userAgent": limits::USER_AGENT,
        });

        let payload = self
            .client
            .function(&self.driver, &context)
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        serde_json::from_value(payload)
            .map_err(|e| ScrapeError::Navigation(format!("Malformed capture payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let capturer = BrowserlessCapturer::new("http://localhost:3000", None);
        let err = capturer.capture("file:///etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("Only http/https"));
    }

    #[tokio::test]
    async fn rejects_unparseable_urls() {
        let capturer = BrowserlessCapturer::new("http://localhost:3000", None);
        let err = capturer.capture("not a url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn payload_fields_all_default() {
        let page: CapturedPage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.title, "");
        assert!(page.styles.is_null());
        assert_eq!(page.screenshot, "");
    }
}
