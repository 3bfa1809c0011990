//! Scrape orchestration and fingerprint assembly.
//!
//! One capture call per scrape; every extraction reads from that single
//! already-loaded page state, so the steps run serially within the job and
//! independent jobs never share anything.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::capture::{BrowserlessCapturer, PageCapturer};
use crate::content;
use crate::error::ScrapeError;
use crate::fingerprint::{
    AnimationInfo, ResponsiveInfo, ScrapeResult, ScriptInfo, StyleInfo,
};

pub struct Scraper {
    capturer: Arc<dyn PageCapturer>,
}

impl Scraper {
    pub fn new(capturer: Arc<dyn PageCapturer>) -> Self {
        Self { capturer }
    }

    pub fn browserless(base_url: &str, token: Option<&str>) -> Self {
        Self::new(Arc::new(BrowserlessCapturer::new(base_url, token)))
    }

    /// Capture a page and assemble its fingerprint. Navigation failures abort
    /// the scrape; per-category decode failures degrade that category to its
    /// empty default.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let page = self.capturer.capture(url).await?;

        let mut content = content::extract_content(&page.html);
        content.layout = decode_category(page.layout, "layout");

        let styles: StyleInfo = decode_category(page.styles, "styles");
        let scripts: ScriptInfo = decode_category(page.scripts, "scripts");
        let animations: AnimationInfo = decode_category(page.animations, "animations");
        let responsive: ResponsiveInfo = decode_category(page.responsive, "responsive");

        info!(
            url,
            headings = content.headings.len(),
            paragraphs = content.paragraphs.len(),
            colors = styles.colors.len(),
            animations = animations.css_animations.len(),
            "Scrape complete"
        );

        Ok(ScrapeResult {
            url: url.to_string(),
            title: page.title,
            content,
            styles,
            scripts,
            animations,
            responsive,
            screenshot: page.screenshot,
        })
    }
}

/// Decode one evaluated category. A null value (evaluation returned nothing)
/// or a malformed payload yields the category's empty default with a warning;
/// sibling categories are untouched.
fn decode_category<T: DeserializeOwned + Default>(value: Value, category: &'static str) -> T {
    if value.is_null() {
        warn!(category, "Category evaluation missing, degrading to empty");
        return T::default();
    }
    match serde_json::from_value(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(category, error = %e, "Category payload malformed, degrading to empty");
            T::default()
        }
    }
}
