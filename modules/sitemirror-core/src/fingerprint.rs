//! The structured fingerprint of a scraped page.
//!
//! A [`ScrapeResult`] is assembled once per scrape, is immutable afterwards,
//! and is owned by whoever requested the scrape. Category records deserialize
//! straight from the in-page evaluation JSON; every field defaults so a
//! malformed category degrades to empty rather than failing the scrape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    pub title: String,
    pub content: ContentInfo,
    pub styles: StyleInfo,
    pub scripts: ScriptInfo,
    pub animations: AnimationInfo,
    pub responsive: ResponsiveInfo,
    /// Full-page screenshot, base64-encoded PNG. Opaque to the pipeline.
    pub screenshot: String,
}

// =============================================================================
// Content
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentInfo {
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub images: Vec<Image>,
    pub links: Vec<Link>,
    pub sections: Vec<Section>,
    pub semantic_elements: BTreeMap<String, Vec<SemanticElement>>,
    #[serde(default)]
    pub layout: LayoutInfo,
    pub html_structure: String,
    pub original_html: String,
    /// Set when content extraction failed as a whole. Callers detect the
    /// degraded record through this field; sibling categories are unaffected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1..=6
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub tag: String,
    /// Display text, truncated with an ellipsis marker when long.
    pub text: String,
    pub id: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticElement {
    pub text: String,
    pub class: String,
    pub id: String,
    pub descendant_count: usize,
}

// =============================================================================
// Layout structure (in-page evaluation)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutInfo {
    #[serde(default)]
    pub containers: Vec<ContainerPattern>,
    #[serde(default)]
    pub navigation_patterns: Vec<NavigationPattern>,
    #[serde(default)]
    pub content_areas: Vec<ContentArea>,
    /// "grid", "flex" or "traditional"; "unknown" when the page had no body.
    #[serde(default)]
    pub layout_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerPattern {
    pub selector: String,
    #[serde(default)]
    pub max_width: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub margin: String,
    #[serde(default)]
    pub padding: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationPattern {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub flex_direction: String,
    #[serde(default)]
    pub justify_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentArea {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub grid_template_columns: String,
    #[serde(default)]
    pub flex_direction: String,
}

// =============================================================================
// Styles (in-page evaluation)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleInfo {
    /// Body computed styles, property -> value, defaults already dropped.
    #[serde(default)]
    pub body: BTreeMap<String, String>,
    /// First-match font snapshot per representative tag.
    #[serde(default)]
    pub element_fonts: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub css_rules: Vec<String>,
    #[serde(default)]
    pub inline_styles: Vec<InlineStyle>,
    /// Layout/paint computed styles for the key selectors that matched.
    #[serde(default)]
    pub computed_styles: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    pub tag: String,
    pub styles: String,
}

// =============================================================================
// Scripts (in-page evaluation)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptInfo {
    #[serde(default)]
    pub inline_scripts: Vec<String>,
    #[serde(default)]
    pub external_scripts: Vec<String>,
    #[serde(default)]
    pub global_variables: Vec<String>,
}

// =============================================================================
// Animations (in-page evaluation)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationInfo {
    #[serde(default)]
    pub css_animations: Vec<CssAnimation>,
    #[serde(default)]
    pub css_transitions: Vec<CssTransition>,
    /// Elements carrying a non-identity transform.
    #[serde(default)]
    pub animated_elements: Vec<TransformedElement>,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

impl AnimationInfo {
    pub fn is_empty(&self) -> bool {
        self.css_animations.is_empty()
            && self.css_transitions.is_empty()
            && self.animated_elements.is_empty()
            && self.keyframes.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssAnimation {
    pub element: String,
    #[serde(default)]
    pub class_name: String,
    pub animation_name: String,
    #[serde(default)]
    pub animation_duration: String,
    #[serde(default)]
    pub animation_timing_function: String,
    #[serde(default)]
    pub animation_iteration_count: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssTransition {
    pub element: String,
    #[serde(default)]
    pub class_name: String,
    pub transition: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformedElement {
    pub element: String,
    #[serde(default)]
    pub class_name: String,
    pub transform: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyframe {
    pub name: String,
    /// Rule CSS text, capped at KEYFRAME_PREVIEW_CHARS in-page.
    pub css_text: String,
}

// =============================================================================
// Responsive (in-page evaluation)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsiveInfo {
    /// Verbatim viewport meta content. `None` means no viewport tag at all,
    /// distinct from a tag with an empty content attribute.
    #[serde(default)]
    pub viewport_meta: Option<String>,
    #[serde(default)]
    pub flex_elements: Vec<FlexElement>,
    #[serde(default)]
    pub grid_elements: Vec<GridElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlexElement {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub flex_direction: String,
    #[serde(default)]
    pub justify_content: String,
    #[serde(default)]
    pub align_items: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridElement {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub grid_template_columns: String,
    #[serde(default)]
    pub grid_template_rows: String,
    #[serde(default)]
    pub gap: String,
}

// =============================================================================
// Clone artifact
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneArtifact {
    pub html: String,
    pub css: String,
    pub javascript: String,
    pub metadata: CloneMetadata,
}

/// Provenance flags computed from ScrapeResult presence checks, never from
/// what the completion model actually produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneMetadata {
    pub original_url: String,
    pub title: String,
    pub generated_with: String,
    pub has_animations: bool,
    pub has_scripts: bool,
    pub responsive_design: bool,
    /// The completion hit its output-length ceiling. Non-fatal, surfaced so
    /// the caller can retry with a narrower context.
    pub truncated: bool,
}
