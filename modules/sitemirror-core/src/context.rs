//! Rendering a fingerprint into the bounded text block the prompt carries.
//!
//! Pure projection: reads the ScrapeResult, never mutates it. Each category
//! either contributes real lines or a fixed "No X detected/found" sentinel; a
//! header without items would invite the model to invent content, so headers
//! are only emitted for non-empty data. Formatting applies its own caps,
//! independent of (and looser than) the extraction caps.

use crate::content::preview;
use crate::fingerprint::{
    AnimationInfo, ContentInfo, ResponsiveInfo, ScrapeResult, ScriptInfo, StyleInfo,
};
use crate::limits;

pub fn format_context(scrape: &ScrapeResult) -> String {
    format!(
        "WEBSITE TO CLONE:\n\
         URL: {}\n\
         Title: {}\n\
         \n\
         CONTENT:\n{}\n\
         \n\
         STYLING:\n{}\n\
         \n\
         ANIMATIONS:\n{}\n\
         \n\
         RESPONSIVE DESIGN:\n{}\n\
         \n\
         JAVASCRIPT:\n{}\n",
        scrape.url,
        scrape.title,
        format_content(&scrape.content),
        format_styles(&scrape.styles),
        format_animations(&scrape.animations),
        format_responsive(&scrape.responsive),
        format_scripts(&scrape.scripts),
    )
}

fn format_content(content: &ContentInfo) -> String {
    let mut formatted: Vec<String> = Vec::new();

    if !content.headings.is_empty() {
        formatted.push("HEADINGS:".to_string());
        for heading in content.headings.iter().take(limits::PROMPT_MAX_HEADINGS) {
            formatted.push(format!("  H{}: {}", heading.level, heading.text));
        }
    }

    if !content.paragraphs.is_empty() {
        // Full text, never truncated: the prompt demands it reappear verbatim.
        formatted.push("\nPARAGRAPHS (FULL TEXT):".to_string());
        for (i, paragraph) in content
            .paragraphs
            .iter()
            .take(limits::PROMPT_MAX_PARAGRAPHS)
            .enumerate()
        {
            formatted.push(format!("  {}. {}", i + 1, paragraph));
        }
    }

    if !content.images.is_empty() {
        formatted.push(format!("\nIMAGES: {} images found", content.images.len()));
        for image in content.images.iter().take(limits::PROMPT_MAX_IMAGES) {
            let alt = if image.alt.is_empty() { "No alt" } else { &image.alt };
            formatted.push(format!("  - Alt: '{}' Src: {}", alt, image.src));
        }
    }

    if !content.links.is_empty() {
        formatted.push("\nLINKS:".to_string());
        for link in content.links.iter().take(limits::PROMPT_MAX_LINKS) {
            formatted.push(format!("  - Text: '{}' Href: {}", link.text, link.href));
        }
    }

    if !content.semantic_elements.is_empty() {
        let tags: Vec<&str> = content
            .semantic_elements
            .keys()
            .map(String::as_str)
            .collect();
        formatted.push(format!("\nHTML STRUCTURE: {}", tags.join(", ")));
    }

    if !content.sections.is_empty() {
        formatted.push("\nSECTIONS:".to_string());
        for section in content.sections.iter().take(limits::PROMPT_MAX_SECTIONS) {
            formatted.push(format!(
                "  - {}: {}",
                section.tag,
                preview(&section.text, limits::SECTION_PREVIEW_CHARS)
            ));
        }
    }

    if formatted.is_empty() {
        "No content found".to_string()
    } else {
        formatted.join("\n")
    }
}

fn format_styles(styles: &StyleInfo) -> String {
    let mut formatted: Vec<String> = Vec::new();

    if !styles.colors.is_empty() {
        let colors: Vec<&str> = styles
            .colors
            .iter()
            .take(limits::PROMPT_MAX_COLORS)
            .map(String::as_str)
            .collect();
        formatted.push(format!("COLORS: {}", colors.join(", ")));
    }

    if !styles.element_fonts.is_empty() {
        formatted.push("\nFONT SPECIFICATIONS (USE EXACTLY):".to_string());
        for (element, font_info) in &styles.element_fonts {
            let details: Vec<String> = font_info
                .iter()
                .filter(|(_, value)| !is_default_value(value))
                .map(|(property, value)| format!("{property}: {value}"))
                .collect();
            if !details.is_empty() {
                formatted.push(format!("  {}: {}", element, details.join(", ")));
            }
        }
    }

    if !styles.fonts.is_empty() {
        let fonts: Vec<&str> = styles
            .fonts
            .iter()
            .take(limits::PROMPT_MAX_FONTS)
            .map(String::as_str)
            .collect();
        formatted.push(format!("\nALL FONT FAMILIES DETECTED: {}", fonts.join(", ")));
    }

    if !styles.body.is_empty() {
        formatted.push("\nBODY STYLES (CRITICAL - USE EXACTLY):".to_string());
        for (property, value) in &styles.body {
            if !is_default_value(value) {
                formatted.push(format!("  {property}: {value}"));
            }
        }
    }

    let font_rules: Vec<&String> = styles
        .css_rules
        .iter()
        .filter(|rule| rule.to_lowercase().contains("font"))
        .collect();
    if !font_rules.is_empty() {
        formatted.push(format!(
            "\nFONT CSS RULES: {} font-related rules found",
            font_rules.len()
        ));
        for rule in font_rules.iter().take(limits::PROMPT_MAX_FONT_RULES) {
            formatted.push(format!(
                "  - {}",
                preview(rule, limits::PROMPT_RULE_PREVIEW_CHARS)
            ));
        }
    }

    if !styles.computed_styles.is_empty() {
        let selectors: Vec<&str> = styles
            .computed_styles
            .keys()
            .map(String::as_str)
            .collect();
        formatted.push(format!("\nKEY ELEMENTS: {}", selectors.join(", ")));
    }

    if formatted.is_empty() {
        "No styles detected".to_string()
    } else {
        formatted.join("\n")
    }
}

fn format_animations(animations: &AnimationInfo) -> String {
    let mut formatted: Vec<String> = Vec::new();

    if !animations.css_animations.is_empty() {
        formatted.push(format!(
            "CSS ANIMATIONS: {} found",
            animations.css_animations.len()
        ));
    }

    if !animations.css_transitions.is_empty() {
        formatted.push(format!(
            "TRANSITIONS: {} found",
            animations.css_transitions.len()
        ));
    }

    if !animations.keyframes.is_empty() {
        let names: Vec<&str> = animations
            .keyframes
            .iter()
            .take(limits::PROMPT_MAX_KEYFRAME_NAMES)
            .map(|kf| kf.name.as_str())
            .collect();
        formatted.push(format!("KEYFRAMES: {}", names.join(", ")));
    }

    if formatted.is_empty() {
        "No animations detected".to_string()
    } else {
        formatted.join("\n")
    }
}

fn format_responsive(responsive: &ResponsiveInfo) -> String {
    let mut formatted: Vec<String> = Vec::new();

    if let Some(viewport) = responsive.viewport_meta.as_deref() {
        if !viewport.is_empty() {
            formatted.push(format!("VIEWPORT: {viewport}"));
        }
    }

    if !responsive.flex_elements.is_empty() {
        formatted.push(format!(
            "FLEX LAYOUTS: {} found",
            responsive.flex_elements.len()
        ));
    }

    if !responsive.grid_elements.is_empty() {
        formatted.push(format!(
            "GRID LAYOUTS: {} found",
            responsive.grid_elements.len()
        ));
    }

    if formatted.is_empty() {
        "No responsive features detected".to_string()
    } else {
        formatted.join("\n")
    }
}

fn format_scripts(scripts: &ScriptInfo) -> String {
    let mut formatted: Vec<String> = Vec::new();

    if !scripts.external_scripts.is_empty() {
        formatted.push(format!(
            "EXTERNAL SCRIPTS: {} found",
            scripts.external_scripts.len()
        ));
    }

    if !scripts.inline_scripts.is_empty() {
        formatted.push(format!(
            "INLINE SCRIPTS: {} found",
            scripts.inline_scripts.len()
        ));
    }

    if !scripts.global_variables.is_empty() {
        formatted.push(format!("LIBRARIES: {}", scripts.global_variables.join(", ")));
    }

    if formatted.is_empty() {
        "No JavaScript detected".to_string()
    } else {
        formatted.join("\n")
    }
}

/// Computed values that signal "unset", skipped so the prompt only carries
/// deliberate styling. Literal comparison against the sentinel table; these
/// are not general CSS semantics.
fn is_default_value(value: &str) -> bool {
    value.is_empty() || limits::STYLE_SKIP_VALUES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{Heading, Keyframe, Link};
    use std::collections::BTreeMap;

    fn empty_scrape() -> ScrapeResult {
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
    fn empty_categories_emit_sentinels_not_headers() {
        let formatted = format_context(&empty_scrape());
        assert!(formatted.contains("No content found"));
        assert!(formatted.contains("No styles detected"));
        assert!(formatted.contains("No animations detected"));
        assert!(formatted.contains("No responsive features detected"));
        assert!(formatted.contains("No JavaScript detected"));
        assert!(!formatted.contains("HEADINGS:"));
        assert!(!formatted.contains("LINKS:"));
        assert!(!formatted.contains("COLORS:"));
    }

    #[test]
    fn empty_links_no_links_header_but_headings_present() {
        let mut scrape = empty_scrape();
        scrape.content.headings.push(Heading { level: 1, text: "Title".into() });
        let formatted = format_context(&scrape);
        assert!(formatted.contains("HEADINGS:"));
        assert!(formatted.contains("  H1: Title"));
        assert!(!formatted.contains("LINKS:"));
    }

    #[test]
    fn paragraphs_rendered_full_text() {
        let mut scrape = empty_scrape();
        let long = "word ".repeat(100).trim_end().to_string();
        scrape.content.paragraphs.push(long.clone());
        let formatted = format_context(&scrape);
        assert!(formatted.contains(&format!("  1. {long}")));
    }

    #[test]
    fn formatter_caps_are_independent_of_extraction_caps() {
        let mut scrape = empty_scrape();
        for i in 0..20 {
            scrape.content.headings.push(Heading { level: 2, text: format!("H {i}") });
            scrape.content.links.push(Link {
                text: format!("link {i}"),
                href: format!("/l{i}"),
            });
        }
        let formatted = format_context(&scrape);
        assert!(formatted.contains("H 9"));
        assert!(!formatted.contains("H 10"));
        assert!(formatted.contains("link 7"));
        assert!(!formatted.contains("link 8"));
    }

    #[test]
    fn font_specifications_skip_default_values() {
        let mut scrape = empty_scrape();
        let mut h1 = BTreeMap::new();
        h1.insert("font-size".to_string(), "32px".to_string());
        h1.insert("font-style".to_string(), "normal".to_string());
        h1.insert("letter-spacing".to_string(), "normal".to_string());
        scrape.styles.element_fonts.insert("h1".into(), h1);
        let formatted = format_context(&scrape);
        assert!(formatted.contains("  h1: font-size: 32px"));
        assert!(!formatted.contains("font-style"));
    }

    #[test]
    fn element_with_only_default_fonts_omitted() {
        let mut scrape = empty_scrape();
        let mut div = BTreeMap::new();
        div.insert("font-style".to_string(), "normal".to_string());
        scrape.styles.element_fonts.insert("div".into(), div);
        let formatted = format_context(&scrape);
        assert!(!formatted.contains("  div:"));
    }

    #[test]
    fn font_rules_filtered_case_insensitively_and_previewed() {
        let mut scrape = empty_scrape();
        scrape.styles.css_rules.push("h1 { FONT-weight: bold; }".into());
        scrape.styles.css_rules.push(".box { margin: 0; }".into());
        let long_rule = format!("p {{ font-family: {}; }}", "serif, ".repeat(40));
        scrape.styles.css_rules.push(long_rule);
        let formatted = format_context(&scrape);
        assert!(formatted.contains("FONT CSS RULES: 2 font-related rules found"));
        assert!(formatted.contains("FONT-weight"));
        assert!(!formatted.contains("margin: 0"));
    }

    #[test]
    fn animations_summarized_with_keyframe_names() {
        let mut scrape = empty_scrape();
        for name in ["fade", "slide", "spin", "bounce"] {
            scrape.animations.keyframes.push(Keyframe {
                name: name.into(),
                css_text: String::new(),
            });
        }
        let formatted = format_context(&scrape);
        assert!(formatted.contains("KEYFRAMES: fade, slide, spin"));
        assert!(!formatted.contains("bounce"));
    }

    #[test]
    fn viewport_with_empty_content_not_rendered() {
        let mut scrape = empty_scrape();
        scrape.responsive.viewport_meta = Some(String::new());
        let formatted = format_context(&scrape);
        assert!(!formatted.contains("VIEWPORT:"));
        assert!(formatted.contains("No responsive features detected"));
    }

    #[test]
    fn viewport_content_rendered_verbatim() {
        let mut scrape = empty_scrape();
        scrape.responsive.viewport_meta = Some("width=device-width, initial-scale=1".into());
        let formatted = format_context(&scrape);
        assert!(formatted.contains("VIEWPORT: width=device-width, initial-scale=1"));
    }
}
