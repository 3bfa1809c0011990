//! Clone generation: fingerprint in, split artifact out.

use tracing::info;

use gemini_client::{GeminiClient, GenerationConfig};

use crate::context::format_context;
use crate::error::CloneError;
use crate::fingerprint::{CloneArtifact, CloneMetadata, ScrapeResult};
use crate::prompt::build_prompt;
use crate::splitter;

pub struct Cloner {
    gemini: GeminiClient,
}

impl Cloner {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Generate a clone of the fingerprinted page. One completion call per
    /// invocation; a truncated completion still yields an artifact, flagged
    /// in its metadata.
    pub async fn generate_clone(&self, scrape: &ScrapeResult) -> Result<CloneArtifact, CloneError> {
        let context = format_context(scrape);
        let prompt = build_prompt(&context);

        info!(url = %scrape.url, prompt_chars = prompt.len(), "Generating clone");

        let completion = self.gemini.generate(&prompt, GenerationConfig::default()).await?;
        let document = splitter::clean_response(&completion.text);

        let artifact = CloneArtifact {
            html: splitter::extract_html(&document),
            css: splitter::extract_css(&document),
            javascript: splitter::extract_js(&document),
            metadata: clone_metadata(scrape, self.gemini.model(), completion.truncated),
        };

        info!(
            url = %scrape.url,
            html_chars = artifact.html.len(),
            css_chars = artifact.css.len(),
            js_chars = artifact.javascript.len(),
            truncated = artifact.metadata.truncated,
            "Clone generated"
        );

        Ok(artifact)
    }
}

/// Metadata derives purely from the fingerprint and the completion, never
/// from the generated document.
pub fn clone_metadata(scrape: &ScrapeResult, model: &str, truncated: bool) -> CloneMetadata {
    CloneMetadata {
        original_url: scrape.url.clone(),
        title: scrape.title.clone(),
        generated_with: model.to_string(),
        has_animations: !scrape.animations.css_animations.is_empty(),
        has_scripts: !scrape.scripts.inline_scripts.is_empty(),
        responsive_design: scrape.responsive.viewport_meta.is_some(),
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{
        AnimationInfo, ContentInfo, CssAnimation, ResponsiveInfo, ScriptInfo, StyleInfo,
    };

    fn scrape() -> ScrapeResult {
        ScrapeResult {
            url: "https://example.com".into(),
            title: "Example".into(),
            content: ContentInfo::default(),
            styles: StyleInfo::default(),
            scripts: ScriptInfo::default(),
            animations: AnimationInfo::default(),
            responsive: ResponsiveInfo::default(),
            screenshot: String::new(),
        }
    }

    #[test]
    fn metadata_reflects_fingerprint_not_output() {
        let mut scrape = scrape();
        scrape.animations.css_animations.push(CssAnimation {
            element: "div".into(),
            animation_name: "fade".into(),
            ..Default::default()
        });
        scrape.scripts.inline_scripts.push("console.log(1)".into());
        scrape.responsive.viewport_meta = Some("width=device-width".into());

        let metadata = clone_metadata(&scrape, "gemini-2.0-flash", true);
        assert_eq!(metadata.original_url, "https://example.com");
        assert_eq!(metadata.generated_with, "gemini-2.0-flash");
        assert!(metadata.has_animations);
        assert!(metadata.has_scripts);
        assert!(metadata.responsive_design);
        assert!(metadata.truncated);
    }

    #[test]
    fn bare_fingerprint_yields_all_false() {
        let metadata = clone_metadata(&scrape(), "gemini-2.0-flash", false);
        assert!(!metadata.has_animations);
        assert!(!metadata.has_scripts);
        assert!(!metadata.responsive_design);
        assert!(!metadata.truncated);
    }

    #[test]
    fn transitions_alone_do_not_count_as_animations() {
        let mut scrape = scrape();
        scrape.animations.css_transitions.push(crate::fingerprint::CssTransition {
            element: "a".into(),
            transition: "color 0.2s".into(),
            ..Default::default()
        });
        let metadata = clone_metadata(&scrape, "gemini-2.0-flash", false);
        assert!(!metadata.has_animations);
    }
}
