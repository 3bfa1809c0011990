//! Host-side content extraction from rendered HTML.
//!
//! Works on the raw DOM string the capture step returns; everything that needs
//! computed styles lives in the in-page scripts instead. Extraction failures
//! degrade the whole content record to `{error}` so the caller sees either a
//! fully-populated category or an explicitly failed one, never a partial mix.

use std::collections::BTreeMap;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::fingerprint::{ContentInfo, Heading, Image, Link, Section, SemanticElement};
use crate::limits;

pub fn extract_content(html: &str) -> ContentInfo {
    match build_content(html) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Content extraction failed");
            ContentInfo {
                error: Some(e.to_string()),
                ..ContentInfo::default()
            }
        }
    }
}

fn build_content(html: &str) -> anyhow::Result<ContentInfo> {
    if html.trim().is_empty() {
        anyhow::bail!("empty document");
    }

    let cleaned = strip_non_content(html);
    let doc = Html::parse_document(&cleaned);

    Ok(ContentInfo {
        headings: extract_headings(&doc),
        paragraphs: extract_paragraphs(&doc),
        images: extract_images(&doc),
        links: extract_links(&doc),
        sections: extract_sections(&doc),
        semantic_elements: extract_semantic_elements(&doc),
        // Layout comes from in-page evaluation; the assembler fills it in.
        layout: Default::default(),
        html_structure: body_html(&doc, &cleaned),
        original_html: truncate_chars(html, limits::ORIGINAL_HTML_CHARS),
        error: None,
    })
}

/// Remove script/style/noscript blocks and meta/link tags before parsing so
/// their text never surfaces as readable content.
fn strip_non_content(html: &str) -> String {
    let mut cleaned = html.to_string();
    for tag in limits::NON_CONTENT_BLOCK_TAGS {
        let re = Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")).expect("valid regex");
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    for tag in limits::NON_CONTENT_VOID_TAGS {
        let re = Regex::new(&format!(r"(?i)<{tag}[^>]*>")).expect("valid regex");
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    cleaned
}

/// All headings in document order across levels 1..6, first MAX_HEADINGS
/// non-empty entries combined (not per level).
fn extract_headings(doc: &Html) -> Vec<Heading> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
    doc.select(&selector)
        .filter_map(|element| {
            let text = element_text(&element);
            if text.is_empty() {
                return None;
            }
            let level: u8 = element.value().name()[1..].parse().ok()?;
            Some(Heading { level, text })
        })
        .take(limits::MAX_HEADINGS)
        .collect()
}

/// Paragraphs longer than MIN_PARAGRAPH_CHARS, verbatim. The full text is
/// load-bearing: it must reappear unmodified in the model's output.
fn extract_paragraphs(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("p").expect("valid selector");
    doc.select(&selector)
        .map(|element| element_text(&element))
        .filter(|text| text.chars().count() > limits::MIN_PARAGRAPH_CHARS)
        .take(limits::MAX_PARAGRAPHS)
        .collect()
}

fn extract_images(doc: &Html) -> Vec<Image> {
    let selector = Selector::parse("img").expect("valid selector");
    doc.select(&selector)
        .filter_map(|element| {
            let src = element.value().attr("src")?;
            Some(Image {
                src: src.to_string(),
                alt: element.value().attr("alt").unwrap_or("").to_string(),
            })
        })
        .take(limits::MAX_IMAGES)
        .collect()
}

fn extract_links(doc: &Html) -> Vec<Link> {
    let selector = Selector::parse("a[href]").expect("valid selector");
    doc.select(&selector)
        .filter_map(|element| {
            let text = element_text(&element);
            let href = element.value().attr("href").unwrap_or("");
            if text.is_empty() || href.is_empty() {
                return None;
            }
            Some(Link {
                text,
                href: href.to_string(),
            })
        })
        .take(limits::MAX_LINKS)
        .collect()
}

/// Main content sections, scanned tag by tag in priority order. A candidate
/// qualifies when its trimmed text length sits strictly between the section
/// bounds; the scan stops entirely once MAX_SECTIONS are collected.
fn extract_sections(doc: &Html) -> Vec<Section> {
    let mut sections = Vec::new();

    'tags: for tag in limits::SECTION_TAGS {
        let selector = Selector::parse(tag).expect("valid selector");
        for element in doc.select(&selector) {
            let text = element_text(&element);
            let len = text.chars().count();
            if len > limits::SECTION_MIN_CHARS && len < limits::SECTION_MAX_CHARS {
                sections.push(Section {
                    tag: (*tag).to_string(),
                    text: preview(&text, limits::SECTION_PREVIEW_CHARS),
                    id: element.value().attr("id").unwrap_or("").to_string(),
                    class: class_attr(&element),
                });
            }
            if sections.len() >= limits::MAX_SECTIONS {
                break 'tags;
            }
        }
    }

    sections
}

/// Up to SEMANTIC_PER_TAG instances of each semantic HTML5 element, with a
/// text preview and a descendant element count. Tags without instances get no
/// entry at all.
fn extract_semantic_elements(doc: &Html) -> BTreeMap<String, Vec<SemanticElement>> {
    let mut semantic = BTreeMap::new();

    for tag in limits::SEMANTIC_TAGS {
        let selector = Selector::parse(tag).expect("valid selector");
        let elements: Vec<SemanticElement> = doc
            .select(&selector)
            .take(limits::SEMANTIC_PER_TAG)
            .map(|element| SemanticElement {
                text: preview(&element_text(&element), limits::SEMANTIC_PREVIEW_CHARS),
                class: class_attr(&element),
                id: element.value().attr("id").unwrap_or("").to_string(),
                descendant_count: element
                    .descendants()
                    .skip(1)
                    .filter(|node| node.value().is_element())
                    .count(),
            })
            .collect();
        if !elements.is_empty() {
            semantic.insert((*tag).to_string(), elements);
        }
    }

    semantic
}

fn body_html(doc: &Html, cleaned: &str) -> String {
    let selector = Selector::parse("body").expect("valid selector");
    doc.select(&selector)
        .next()
        .map(|body| body.html())
        .unwrap_or_else(|| cleaned.to_string())
}

/// Whitespace-collapsed text of an element and its descendants.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn class_attr(element: &ElementRef) -> String {
    element
        .value()
        .attr("class")
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Char-boundary-safe truncation with an ellipsis marker.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Char-boundary-safe truncation without a marker.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><head><title>t</title></head><body>{body}</body></html>")
    }

    #[test]
    fn headings_in_document_order_across_levels() {
        let html = page("<h2>Second level</h2><h1>First level</h1><h3>Third level</h3>");
        let content = extract_content(&html);
        let levels: Vec<u8> = content.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 1, 3]);
        assert_eq!(content.headings[0].text, "Second level");
    }

    #[test]
    fn headings_capped_at_twenty_combined() {
        let mut body = String::new();
        for i in 0..15 {
            body.push_str(&format!("<h1>Heading {i}</h1><h2>Sub {i}</h2>"));
        }
        let content = extract_content(&page(&body));
        assert_eq!(content.headings.len(), limits::MAX_HEADINGS);
    }

    #[test]
    fn empty_headings_skipped() {
        let html = page("<h1>   </h1><h2>Real</h2>");
        let content = extract_content(&html);
        assert_eq!(content.headings.len(), 1);
        assert_eq!(content.headings[0].text, "Real");
    }

    #[test]
    fn short_paragraphs_dropped_long_kept_verbatim() {
        let long = "This paragraph is comfortably longer than ten characters.";
        let html = page(&format!("<p>tiny</p><p>{long}</p>"));
        let content = extract_content(&html);
        assert_eq!(content.paragraphs, vec![long.to_string()]);
    }

    #[test]
    fn paragraph_of_exactly_ten_chars_dropped() {
        // The bound is strict: length must exceed MIN_PARAGRAPH_CHARS.
        let html = page("<p>abcdefghij</p><p>abcdefghijk</p>");
        let content = extract_content(&html);
        assert_eq!(content.paragraphs, vec!["abcdefghijk".to_string()]);
    }

    #[test]
    fn paragraphs_capped_at_twenty_five() {
        let mut body = String::new();
        for i in 0..30 {
            body.push_str(&format!("<p>Paragraph number {i} with enough text</p>"));
        }
        let content = extract_content(&page(&body));
        assert_eq!(content.paragraphs.len(), limits::MAX_PARAGRAPHS);
        assert_eq!(content.paragraphs[0], "Paragraph number 0 with enough text");
    }

    #[test]
    fn script_text_never_leaks_into_paragraphs() {
        let html = page(
            "<p>Visible paragraph with plenty of text</p>\
             <script>var hidden = 'this string is long enough to pass the filter';</script>\
             <style>p { color: red; }</style>",
        );
        let content = extract_content(&html);
        assert_eq!(content.paragraphs.len(), 1);
        assert!(!content.html_structure.contains("hidden"));
        assert!(!content.html_structure.contains("color: red"));
    }

    #[test]
    fn images_require_src_and_default_alt() {
        let html = page(r#"<img src="/a.png" alt="Logo"><img alt="no src"><img src="/b.png">"#);
        let content = extract_content(&html);
        assert_eq!(content.images.len(), 2);
        assert_eq!(content.images[0], Image { src: "/a.png".into(), alt: "Logo".into() });
        assert_eq!(content.images[1].alt, "");
    }

    #[test]
    fn links_need_text_and_href() {
        let html = page(r#"<a href="/about">About</a><a href="/empty"></a><a>No href</a>"#);
        let content = extract_content(&html);
        assert_eq!(
            content.links,
            vec![Link { text: "About".into(), href: "/about".into() }]
        );
    }

    #[test]
    fn sections_respect_length_bounds_and_preview() {
        let mid = "x".repeat(300);
        let short = "too short";
        let long = "y".repeat(1200);
        let html = page(&format!(
            "<section>{mid}</section><section>{short}</section><article>{long}</article>"
        ));
        let content = extract_content(&html);
        assert_eq!(content.sections.len(), 1);
        let section = &content.sections[0];
        assert_eq!(section.tag, "section");
        assert!(section.text.ends_with("..."));
        assert_eq!(section.text.chars().count(), limits::SECTION_PREVIEW_CHARS + 3);
    }

    #[test]
    fn section_scan_stops_at_cap_across_tags() {
        let filler = "z".repeat(100);
        let mut body = String::new();
        for _ in 0..6 {
            body.push_str(&format!("<section>{filler}</section>"));
        }
        for _ in 0..6 {
            body.push_str(&format!("<article>{filler}</article>"));
        }
        let content = extract_content(&page(&body));
        assert_eq!(content.sections.len(), limits::MAX_SECTIONS);
        // Priority order: all six sections first, then two articles.
        assert_eq!(content.sections.iter().filter(|s| s.tag == "section").count(), 6);
        assert_eq!(content.sections.iter().filter(|s| s.tag == "article").count(), 2);
    }

    #[test]
    fn semantic_elements_capped_per_tag_with_descendant_counts() {
        let html = page(
            "<header class=\"top main\"><span>a</span><span>b</span></header>\
             <nav id=\"menu\">links</nav><nav>more</nav><nav>even</nav><nav>extra</nav>",
        );
        let content = extract_content(&html);
        let header = &content.semantic_elements["header"][0];
        assert_eq!(header.descendant_count, 2);
        assert_eq!(header.class, "top main");
        assert_eq!(content.semantic_elements["nav"].len(), limits::SEMANTIC_PER_TAG);
        assert!(!content.semantic_elements.contains_key("footer"));
    }

    #[test]
    fn semantic_text_previewed_at_three_hundred() {
        let long = "w".repeat(400);
        let html = page(&format!("<footer>{long}</footer>"));
        let content = extract_content(&html);
        let footer = &content.semantic_elements["footer"][0];
        assert!(footer.text.ends_with("..."));
        assert_eq!(footer.text.chars().count(), limits::SEMANTIC_PREVIEW_CHARS + 3);
    }

    #[test]
    fn original_html_capped_without_marker() {
        let long_body = "a".repeat(10_000);
        let html = page(&long_body);
        let content = extract_content(&html);
        assert_eq!(content.original_html.chars().count(), limits::ORIGINAL_HTML_CHARS);
        assert!(!content.original_html.ends_with("..."));
    }

    #[test]
    fn empty_document_degrades_to_error_record() {
        let content = extract_content("   ");
        assert!(content.error.is_some());
        assert!(content.headings.is_empty());
        assert!(content.paragraphs.is_empty());
    }

    #[test]
    fn preview_leaves_short_text_alone() {
        assert_eq!(preview("short", 200), "short");
    }
}
