//! Sampling caps and sentinel values for the fingerprint pipeline.
//!
//! Every bound lives here as a named constant so the extraction code carries no
//! inline magic numbers and the tests can assert against the table. The skip
//! values and the default-transition string are literal-value heuristics, not
//! CSS semantics; they are compared verbatim and must stay that way.

// --- Capture ---

pub const VIEWPORT_WIDTH: u32 = 1920;
pub const VIEWPORT_HEIGHT: u32 = 1080;

/// Realistic desktop user agent. Avoids bot-detection variance in what the
/// page chooses to render.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const NAVIGATION_TIMEOUT_MS: u64 = 30_000;
pub const NETWORK_IDLE_TIMEOUT_MS: u64 = 15_000;
/// Post-load wait for late-rendering JS frameworks to paint.
pub const SETTLE_DELAY_MS: u64 = 2_000;

// --- Content extraction ---

pub const MAX_HEADINGS: usize = 20;
pub const MAX_PARAGRAPHS: usize = 25;
/// Paragraphs at or below this length (trimmed chars) are dropped.
pub const MIN_PARAGRAPH_CHARS: usize = 10;
pub const MAX_IMAGES: usize = 10;
pub const MAX_LINKS: usize = 15;
pub const MAX_SECTIONS: usize = 8;
/// Section candidates must have trimmed text strictly between these bounds.
pub const SECTION_MIN_CHARS: usize = 50;
pub const SECTION_MAX_CHARS: usize = 1000;
pub const SECTION_PREVIEW_CHARS: usize = 200;
pub const SEMANTIC_PER_TAG: usize = 3;
pub const SEMANTIC_PREVIEW_CHARS: usize = 300;
pub const ORIGINAL_HTML_CHARS: usize = 8000;

/// Scanned in priority order; the scan stops entirely once MAX_SECTIONS hit.
pub const SECTION_TAGS: &[&str] = &["section", "article", "main", "div"];

pub const SEMANTIC_TAGS: &[&str] =
    &["header", "nav", "main", "section", "article", "aside", "footer"];

/// Cleared from the parse tree before readable-content extraction so
/// non-visible text never leaks into paragraphs. Block tags are removed with
/// their contents; void tags have no contents to remove.
pub const NON_CONTENT_BLOCK_TAGS: &[&str] = &["script", "style", "noscript"];
pub const NON_CONTENT_VOID_TAGS: &[&str] = &["meta", "link"];

// --- Style extraction (in-page sampling windows) ---

/// Document-order element windows, not viewport- or relevance-ranked.
/// Intentional cost bounding; may under-sample below-the-fold content.
pub const COLOR_SAMPLE_WINDOW: usize = 200;
pub const FONT_SAMPLE_WINDOW: usize = 100;
pub const MAX_COLORS: usize = 15;
pub const MAX_FONTS: usize = 10;
pub const MAX_CSS_RULES_PER_SHEET: usize = 50;

pub const FONT_SNAPSHOT_TAGS: &[&str] = &["body", "h1", "h2", "h3", "p", "a", "div"];

pub const KEY_SELECTORS: &[&str] = &[
    "header", "nav", "main", "footer", ".hero", "#hero", ".container", ".navbar",
];

/// Computed values signalling "unset/default, not a deliberate choice".
pub const STYLE_SKIP_VALUES: &[&str] = &["normal", "auto"];

// --- Script extraction ---

pub const MIN_INLINE_SCRIPT_CHARS: usize = 10;
pub const INLINE_SCRIPT_PREVIEW_CHARS: usize = 1000;

pub const GLOBAL_LIBRARY_VARS: &[&str] =
    &["jQuery", "$", "React", "Vue", "Angular", "gsap", "AOS"];

// --- Animation / responsiveness extraction ---

pub const ANIMATION_SAMPLE_WINDOW: usize = 100;
pub const RESPONSIVE_SAMPLE_WINDOW: usize = 50;
pub const KEYFRAME_PREVIEW_CHARS: usize = 500;

/// The literal computed value of an element with no transition configured.
pub const DEFAULT_TRANSITION: &str = "all 0s ease 0s";

// --- Layout structure extraction ---

pub const CONTAINER_SELECTORS: &[&str] = &[
    ".container", ".wrapper", ".content", ".main", "#main", ".page", ".site",
];

// --- Context formatting (independent of extraction caps) ---

pub const PROMPT_MAX_HEADINGS: usize = 10;
pub const PROMPT_MAX_PARAGRAPHS: usize = 8;
pub const PROMPT_MAX_IMAGES: usize = 5;
pub const PROMPT_MAX_LINKS: usize = 8;
pub const PROMPT_MAX_SECTIONS: usize = 5;
pub const PROMPT_MAX_COLORS: usize = 8;
pub const PROMPT_MAX_FONTS: usize = 5;
pub const PROMPT_MAX_FONT_RULES: usize = 5;
pub const PROMPT_RULE_PREVIEW_CHARS: usize = 150;
pub const PROMPT_MAX_KEYFRAME_NAMES: usize = 3;

// --- Response splitting ---

/// A script block matching any of these is treated as an externally-hosted
/// library reference: kept in the HTML, excluded from the JS artifact.
pub const CDN_MARKERS: &[&str] = &["cdn", "https://", "http://"];
