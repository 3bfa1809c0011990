//! Splitting a generated HTML document into html / css / javascript parts.
//!
//! Models occasionally wrap output in markdown fences despite instructions,
//! so cleaning strips fence lines before any splitting. The three extractors
//! each read from the same cleaned document; extraction order does not matter.

use regex::Regex;

use crate::limits;

/// Strip markdown code fences from a model response. Fence lines are removed
/// wherever they appear; everything between them is kept verbatim.
pub fn clean_response(content: &str) -> String {
    let opening = Regex::new(r"(?m)^```html\s*\n").expect("valid regex");
    let closing = Regex::new(r"(?m)^```\s*$").expect("valid regex");
    let other = Regex::new(r"(?m)^```.*\n").expect("valid regex");

    let content = opening.replace_all(content, "");
    let content = closing.replace_all(&content, "");
    let content = other.replace_all(&content, "");
    content.trim().to_string()
}

/// Inner text of the first style block, or empty when the document has none.
pub fn extract_css(html: &str) -> String {
    let style_re = Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("valid regex");
    style_re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Inline script bodies joined with blank lines. Scripts referencing a CDN or
/// any absolute URL are external library loads and stay in the HTML instead.
pub fn extract_js(html: &str) -> String {
    let script_re = Regex::new(r"(?is)<script[^>]*>(.*?)</script>").expect("valid regex");
    let bodies: Vec<&str> = script_re
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !is_external_reference(body))
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .collect();
    bodies.join("\n\n")
}

/// The document with style blocks removed and inline scripts removed.
/// CDN-referencing script tags survive so the rendered page still loads its
/// libraries.
pub fn extract_html(html: &str) -> String {
    let style_re = Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex");
    let script_re = Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex");

    let without_styles = style_re.replace_all(html, "");
    let cleaned = script_re.replace_all(&without_styles, |caps: &regex::Captures| {
        let tag = caps
            .get(0)
            .map(|m| m.as_str())
            .unwrap_or_default();
        if is_external_reference(tag) {
            tag.to_string()
        } else {
            String::new()
        }
    });
    cleaned.trim().to_string()
}

fn is_external_reference(text: &str) -> bool {
    limits::CDN_MARKERS.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<html><head>\
        <style>body { margin: 0; }</style>\
        <script src=\"https://cdn.example.com/lib.js\"></script>\
        </head><body><h1>Hi</h1>\
        <script>console.log('inline');</script>\
        <script>   </script>\
        </body></html>";

    #[test]
    fn strips_fences_keeps_body() {
        let fenced = "```html\n<html><body>Hi</body></html>\n```";
        assert_eq!(clean_response(fenced), "<html><body>Hi</body></html>");
    }

    #[test]
    fn strips_fences_with_other_languages() {
        let fenced = "```xml\n<doc/>\n```\ntrailing";
        assert_eq!(clean_response(fenced), "<doc/>\n\ntrailing");
    }

    #[test]
    fn unfenced_content_passes_through() {
        assert_eq!(clean_response("<html></html>"), "<html></html>");
    }

    #[test]
    fn css_comes_from_first_style_block_only() {
        let doc = "<style>a { color: red; }</style><style>b { color: blue; }</style>";
        assert_eq!(extract_css(doc), "a { color: red; }");
    }

    #[test]
    fn css_empty_without_style_block() {
        assert_eq!(extract_css("<html><body></body></html>"), "");
    }

    #[test]
    fn js_collects_inline_skips_cdn_and_empty() {
        let js = extract_js(DOC);
        assert_eq!(js, "console.log('inline');");
    }

    #[test]
    fn js_joins_multiple_inline_scripts() {
        let doc = "<script>first();</script><script>second();</script>";
        assert_eq!(extract_js(doc), "first();\n\nsecond();");
    }

    #[test]
    fn html_drops_styles_and_inline_scripts_keeps_cdn_tags() {
        let html = extract_html(DOC);
        assert!(!html.contains("<style"));
        assert!(!html.contains("console.log"));
        assert!(html.contains("https://cdn.example.com/lib.js"));
        assert!(html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn full_split_round_trip() {
        let response = format!("```html\n{DOC}\n```");
        let cleaned = clean_response(&response);
        assert_eq!(extract_css(&cleaned), "body { margin: 0; }");
        assert_eq!(extract_js(&cleaned), "console.log('inline');");
        let html = extract_html(&cleaned);
        assert!(html.contains("cdn.example.com"));
        assert!(!html.contains("inline"));
    }
}
