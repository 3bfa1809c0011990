//! In-page evaluation sources for the capture driver.
//!
//! Computed and cascaded CSS values do not exist in static HTML, so style,
//! script, animation, responsiveness and layout sampling all run inside the
//! loaded page's JS context. The snippets here emit snake_case JSON that
//! deserializes directly into the fingerprint records. Sampling windows and
//! selector tables are substituted in from [`crate::limits`] so the bounds
//! live in exactly one place.

use crate::limits;

/// Puppeteer driver for the Browserless /function endpoint. Configures the
/// viewport and user agent, navigates with the spec'd wait policy, runs every
/// page-context evaluation, and captures a full-page screenshot. A navigation
/// failure (no response or HTTP >= 400) throws, which aborts the whole
/// capture; evaluation failures degrade that category to an empty record.
const DRIVER_TEMPLATE: &str = r#"
module.exports = async ({ page, context }) => {
  await page.setViewport({ width: __VIEWPORT_WIDTH__, height: __VIEWPORT_HEIGHT__ });
  await page.setUserAgent(context.userAgent);

  const response = await page.goto(context.url, {
    waitUntil: 'domcontentloaded',
    timeout: __NAVIGATION_TIMEOUT_MS__,
  });
  if (!response || response.status() >= 400) {
    throw new Error(
      'Failed to load page: HTTP ' + (response ? response.status() : 'no response')
    );
  }

  await page.waitForNetworkIdle({ timeout: __NETWORK_IDLE_TIMEOUT_MS__ });
  await new Promise((resolve) => setTimeout(resolve, __SETTLE_DELAY_MS__));

  let title = 'Untitled';
  try {
    title = await page.title();
  } catch (e) {}

  const html = await page.content();

  const evaluate = async (fn) => {
    try {
      return await page.evaluate(fn);
    } catch (e) {
      return {};
    }
  };

  const styles = await evaluate(__STYLE_EVAL__);
  const scripts = await evaluate(__SCRIPT_EVAL__);
  const animations = await evaluate(__ANIMATION_EVAL__);
  const responsive = await evaluate(__RESPONSIVE_EVAL__);
  const layout = await evaluate(__LAYOUT_EVAL__);

  let screenshot = '';
  try {
    screenshot = await page.screenshot({ fullPage: true, encoding: 'base64' });
  } catch (e) {}

  return {
    data: { title, html, styles, scripts, animations, responsive, layout, screenshot },
    type: 'application/json',
  };
};
"#;

const STYLE_EVAL: &str = r#"() => {
  const skip = __STYLE_SKIP_VALUES__;
  const data = {
    body: {},
    element_fonts: {},
    fonts: [],
    colors: [],
    css_rules: [],
    inline_styles: [],
    computed_styles: {}
  };

  const body = document.body;
  if (body) {
    const computed = window.getComputedStyle(body);
    const bodyProps = ['background-color', 'color', 'font-family', 'font-size',
      'font-weight', 'line-height', 'margin', 'padding', 'display',
      'justify-content', 'align-items', 'min-height', 'text-align'];
    for (const prop of bodyProps) {
      const value = computed.getPropertyValue(prop);
      if (value && !skip.includes(value)) {
        data.body[prop] = value;
      }
    }
  }

  const fontProps = ['font-family', 'font-size', 'font-weight', 'font-style',
    'letter-spacing', 'line-height', 'text-align', 'color'];
  for (const tag of __FONT_SNAPSHOT_TAGS__) {
    const element = document.querySelector(tag);
    if (!element) continue;
    const computed = window.getComputedStyle(element);
    const info = {};
    for (const prop of fontProps) {
      info[prop] = computed.getPropertyValue(prop);
    }
    data.element_fonts[tag] = info;
  }

  const elements = document.querySelectorAll('*');

  const colors = new Set();
  for (let i = 0; i < Math.min(elements.length, __COLOR_SAMPLE_WINDOW__); i++) {
    const computed = window.getComputedStyle(elements[i]);
    const background = computed.backgroundColor;
    if (background && background !== 'rgba(0, 0, 0, 0)') {
      colors.add(background);
    }
    if (computed.color) {
      colors.add(computed.color);
    }
    const border = computed.borderColor;
    if (border && border !== 'rgba(0, 0, 0, 0)') {
      colors.add(border);
    }
  }
  data.colors = Array.from(colors).slice(0, __MAX_COLORS__);

  const fonts = new Set();
  for (let i = 0; i < Math.min(elements.length, __FONT_SAMPLE_WINDOW__); i++) {
    const computed = window.getComputedStyle(elements[i]);
    if (computed.fontFamily) {
      fonts.add(computed.fontFamily);
    }
  }
  data.fonts = Array.from(fonts).slice(0, __MAX_FONTS__);

  for (const sheet of document.styleSheets) {
    try {
      if (!sheet.cssRules) continue;
      const count = Math.min(sheet.cssRules.length, __MAX_CSS_RULES_PER_SHEET__);
      for (let i = 0; i < count; i++) {
        const rule = sheet.cssRules[i];
        if (rule.cssText) {
          data.css_rules.push(rule.cssText);
        }
      }
    } catch (e) {
      // Cross-origin stylesheet, skip
    }
  }

  for (const element of document.querySelectorAll('[style]')) {
    if (element.style.cssText) {
      data.inline_styles.push({
        tag: element.tagName.toLowerCase(),
        styles: element.style.cssText
      });
    }
  }

  const layoutProps = ['display', 'position', 'flex-direction', 'justify-content',
    'align-items', 'grid-template-columns', 'grid-template-rows',
    'background-color', 'color', 'font-size', 'font-weight', 'padding',
    'margin', 'border-radius', 'box-shadow', 'transition'];
  for (const selector of __KEY_SELECTORS__) {
    const element = document.querySelector(selector);
    if (!element) continue;
    const computed = window.getComputedStyle(element);
    const snapshot = {};
    for (const prop of layoutProps) {
      snapshot[prop] = computed.getPropertyValue(prop);
    }
    data.computed_styles[selector] = snapshot;
  }

  return data;
}"#;

const SCRIPT_EVAL: &str = r#"() => {
  const data = { inline_scripts: [], external_scripts: [], global_variables: [] };

  for (const script of document.querySelectorAll('script')) {
    if (script.src) {
      data.external_scripts.push(script.src);
    } else if (script.textContent && script.textContent.trim()) {
      const content = script.textContent.trim();
      if (content.length > __MIN_INLINE_SCRIPT_CHARS__ &&
          !content.startsWith('//') &&
          !content.startsWith('/*')) {
        data.inline_scripts.push(content.substring(0, __INLINE_SCRIPT_PREVIEW_CHARS__));
      }
    }
  }

  for (const name of __GLOBAL_LIBRARY_VARS__) {
    if (window[name]) {
      data.global_variables.push(name);
    }
  }

  return data;
}"#;

const ANIMATION_EVAL: &str = r#"() => {
  const data = { css_animations: [], css_transitions: [], animated_elements: [], keyframes: [] };

  const elements = document.querySelectorAll('*');
  for (let i = 0; i < Math.min(elements.length, __ANIMATION_SAMPLE_WINDOW__); i++) {
    const element = elements[i];
    const computed = window.getComputedStyle(element);

    if (computed.animationName && computed.animationName !== 'none') {
      data.css_animations.push({
        element: element.tagName.toLowerCase(),
        class_name: String(element.className),
        animation_name: computed.animationName,
        animation_duration: computed.animationDuration,
        animation_timing_function: computed.animationTimingFunction,
        animation_iteration_count: computed.animationIterationCount
      });
    }

    if (computed.transition && computed.transition !== __DEFAULT_TRANSITION__) {
      data.css_transitions.push({
        element: element.tagName.toLowerCase(),
        class_name: String(element.className),
        transition: computed.transition
      });
    }

    if (computed.transform && computed.transform !== 'none') {
      data.animated_elements.push({
        element: element.tagName.toLowerCase(),
        class_name: String(element.className),
        transform: computed.transform
      });
    }
  }

  for (const sheet of document.styleSheets) {
    try {
      if (!sheet.cssRules) continue;
      for (const rule of sheet.cssRules) {
        if (rule.type === CSSRule.KEYFRAMES_RULE) {
          data.keyframes.push({
            name: rule.name,
            css_text: rule.cssText.substring(0, __KEYFRAME_PREVIEW_CHARS__)
          });
        }
      }
    } catch (e) {
      // Cross-origin stylesheet, skip
    }
  }

  return data;
}"#;

const RESPONSIVE_EVAL: &str = r#"() => {
  const data = { viewport_meta: null, flex_elements: [], grid_elements: [] };

  const viewport = document.querySelector('meta[name="viewport"]');
  if (viewport) {
    data.viewport_meta = viewport.getAttribute('content');
  }

  const elements = document.querySelectorAll('*');
  for (let i = 0; i < Math.min(elements.length, __RESPONSIVE_SAMPLE_WINDOW__); i++) {
    const element = elements[i];
    const computed = window.getComputedStyle(element);

    if (computed.display === 'flex' || computed.display === 'inline-flex') {
      data.flex_elements.push({
        tag: element.tagName.toLowerCase(),
        class_name: String(element.className),
        flex_direction: computed.flexDirection,
        justify_content: computed.justifyContent,
        align_items: computed.alignItems
      });
    }

    if (computed.display === 'grid' || computed.display === 'inline-grid') {
      data.grid_elements.push({
        tag: element.tagName.toLowerCase(),
        class_name: String(element.className),
        grid_template_columns: computed.gridTemplateColumns,
        grid_template_rows: computed.gridTemplateRows,
        gap: computed.gap
      });
    }
  }

  return data;
}"#;

const LAYOUT_EVAL: &str = r#"() => {
  const data = { containers: [], navigation_patterns: [], content_areas: [], layout_type: 'unknown' };

  for (const selector of __CONTAINER_SELECTORS__) {
    const element = document.querySelector(selector);
    if (!element) continue;
    const computed = window.getComputedStyle(element);
    data.containers.push({
      selector: selector,
      max_width: computed.maxWidth,
      width: computed.width,
      margin: computed.margin,
      padding: computed.padding
    });
  }

  for (const nav of document.querySelectorAll('nav, .navbar, .navigation, .menu')) {
    const computed = window.getComputedStyle(nav);
    data.navigation_patterns.push({
      tag: nav.tagName.toLowerCase(),
      class_name: String(nav.className),
      position: computed.position,
      display: computed.display,
      flex_direction: computed.flexDirection,
      justify_content: computed.justifyContent
    });
  }

  for (const area of document.querySelectorAll('main, .content, .main-content, #content')) {
    const computed = window.getComputedStyle(area);
    data.content_areas.push({
      tag: area.tagName.toLowerCase(),
      class_name: String(area.className),
      display: computed.display,
      grid_template_columns: computed.gridTemplateColumns,
      flex_direction: computed.flexDirection
    });
  }

  const body = document.body;
  if (body) {
    const display = window.getComputedStyle(body).display;
    if (display === 'grid') {
      data.layout_type = 'grid';
    } else if (display === 'flex') {
      data.layout_type = 'flex';
    } else {
      data.layout_type = 'traditional';
    }
  }

  return data;
}"#;

fn js_string_array(items: &[&str]) -> String {
    serde_json::to_string(items).expect("string slice serializes")
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).expect("string serializes")
}

/// Assemble the full driver script with every evaluation snippet and bound
/// substituted in.
pub fn driver_script() -> String {
    let mut script = DRIVER_TEMPLATE
        .replace("__STYLE_EVAL__", STYLE_EVAL)
        .replace("__SCRIPT_EVAL__", SCRIPT_EVAL)
        .replace("__ANIMATION_EVAL__", ANIMATION_EVAL)
        .replace("__RESPONSIVE_EVAL__", RESPONSIVE_EVAL)
        .replace("__LAYOUT_EVAL__", LAYOUT_EVAL);

    let substitutions: &[(&str, String)] = &[
        ("__VIEWPORT_WIDTH__", limits::VIEWPORT_WIDTH.to_string()),
        ("__VIEWPORT_HEIGHT__", limits::VIEWPORT_HEIGHT.to_string()),
        ("__NAVIGATION_TIMEOUT_MS__", limits::NAVIGATION_TIMEOUT_MS.to_string()),
        ("__NETWORK_IDLE_TIMEOUT_MS__", limits::NETWORK_IDLE_TIMEOUT_MS.to_string()),
        ("__SETTLE_DELAY_MS__", limits::SETTLE_DELAY_MS.to_string()),
        ("__STYLE_SKIP_VALUES__", js_string_array(limits::STYLE_SKIP_VALUES)),
        ("__FONT_SNAPSHOT_TAGS__", js_string_array(limits::FONT_SNAPSHOT_TAGS)),
        ("__KEY_SELECTORS__", js_string_array(limits::KEY_SELECTORS)),
        ("__COLOR_SAMPLE_WINDOW__", limits::COLOR_SAMPLE_WINDOW.to_string()),
        ("__FONT_SAMPLE_WINDOW__", limits::FONT_SAMPLE_WINDOW.to_string()),
        ("__MAX_COLORS__", limits::MAX_COLORS.to_string()),
        ("__MAX_FONTS__", limits::MAX_FONTS.to_string()),
        ("__MAX_CSS_RULES_PER_SHEET__", limits::MAX_CSS_RULES_PER_SHEET.to_string()),
        ("__MIN_INLINE_SCRIPT_CHARS__", limits::MIN_INLINE_SCRIPT_CHARS.to_string()),
        ("__INLINE_SCRIPT_PREVIEW_CHARS__", limits::INLINE_SCRIPT_PREVIEW_CHARS.to_string()),
        ("__GLOBAL_LIBRARY_VARS__", js_string_array(limits::GLOBAL_LIBRARY_VARS)),
        ("__ANIMATION_SAMPLE_WINDOW__", limits::ANIMATION_SAMPLE_WINDOW.to_string()),
        ("__RESPONSIVE_SAMPLE_WINDOW__", limits::RESPONSIVE_SAMPLE_WINDOW.to_string()),
        ("__KEYFRAME_PREVIEW_CHARS__", limits::KEYFRAME_PREVIEW_CHARS.to_string()),
        ("__DEFAULT_TRANSITION__", js_string(limits::DEFAULT_TRANSITION)),
        ("__CONTAINER_SELECTORS__", js_string_array(limits::CONTAINER_SELECTORS)),
    ];
    for (placeholder, value) in substitutions {
        script = script.replace(placeholder, value);
    }

    script
}
