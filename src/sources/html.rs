// Minimal HTML reading for the scrapers.
//
// The pages we scrape only need three things: find the first element with a
// given class, list an element's direct children, and pull the text out of
// an element. A forgiving tag scanner over regex-lite covers that without a
// full DOM. Unclosed elements run to the end of their parent, the way
// lenient parsers treat them.

use std::ops::Range;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[!?][^>]*>").expect("valid declaration regex"));
static RE_RAW_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid raw text regex")
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("valid tag regex")
});
static RE_CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid class attribute regex")
});
static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid entity regex")
});

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone)]
struct Tag {
    name: String,
    class: String,
    closing: bool,
    self_closing: bool,
    span: Range<usize>,
}

/// An element located in an [`HtmlDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub name: String,
    /// Raw `class` attribute value ("" if none)
    pub class: String,
    /// Byte range of the content between the opening and closing tags
    inner: Range<usize>,
    /// Indices of the tags inside the element
    tags: Range<usize>,
    /// First tag index after the element
    next_tag: usize,
}

/// A scanned HTML page.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    tags: Vec<Tag>,
}

impl HtmlDocument {
    /// Scan `html`, dropping comments, declarations and script/style bodies.
    pub fn parse(html: &str) -> Self {
        let source = RE_COMMENT.replace_all(html, "");
        let source = RE_RAW_TEXT.replace_all(&source, "");
        let source = RE_DECLARATION.replace_all(&source, "").into_owned();

        let tags = RE_TAG
            .captures_iter(&source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let attrs = caps.get(3).map_or("", |m| m.as_str());
                Some(Tag {
                    name: caps.get(2)?.as_str().to_ascii_lowercase(),
                    class: class_attribute(attrs),
                    closing: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
                    self_closing: attrs.trim_end().ends_with('/'),
                    span: whole.range(),
                })
            })
            .collect();

        Self { source, tags }
    }

    /// First element carrying `class` as one of its whitespace-separated
    /// class names.
    pub fn find_by_class(&self, class: &str) -> Option<Element> {
        self.find_first(|t| t.class.split_whitespace().any(|c| c == class))
    }

    /// First element whose `class` attribute contains `needle` anywhere.
    ///
    /// For exports whose class names vary around a stable stem, like
    /// `firstName` in `"field firstNameValue"`, or a multi-class needle like
    /// `"value attachment"`.
    pub fn find_by_class_containing(&self, needle: &str) -> Option<Element> {
        self.find_first(|t| t.class.contains(needle))
    }

    fn find_first(&self, matches: impl Fn(&Tag) -> bool) -> Option<Element> {
        self.tags
            .iter()
            .position(|t| !t.closing && matches(t))
            .map(|i| self.element_at(i, self.tags.len(), self.source.len()))
    }

    /// Direct child elements of `element`, in document order.
    pub fn children(&self, element: &Element) -> Vec<Element> {
        let mut children = Vec::new();
        let mut i = element.tags.start;
        while i < element.tags.end {
            if self.tags[i].closing {
                i += 1;
                continue;
            }
            let child = self.element_at(i, element.tags.end, element.inner.end);
            i = child.next_tag.max(i + 1);
            children.push(child);
        }
        children
    }

    /// All text inside `element`, concatenated, with entities decoded.
    pub fn text(&self, element: &Element) -> String {
        self.text_nodes(element).concat()
    }

    /// All text nodes inside `element`, joined with `separator`.
    pub fn text_with_separator(&self, element: &Element, separator: &str) -> String {
        self.text_nodes(element).join(separator)
    }

    fn text_nodes(&self, element: &Element) -> Vec<String> {
        let mut nodes = Vec::new();
        let mut pos = element.inner.start;
        for tag in &self.tags[element.tags.clone()] {
            push_text_node(&mut nodes, &self.source[pos..tag.span.start]);
            pos = tag.span.end;
        }
        if pos < element.inner.end {
            push_text_node(&mut nodes, &self.source[pos..element.inner.end]);
        }
        nodes
    }

    /// Build the element opened by tag `open`, looking no further than tag
    /// index `limit` / byte offset `end` for its closing tag.
    fn element_at(&self, open: usize, limit: usize, end: usize) -> Element {
        let tag = &self.tags[open];
        let empty = |at: usize| Element {
            name: tag.name.clone(),
            class: tag.class.clone(),
            inner: at..at,
            tags: open + 1..open + 1,
            next_tag: open + 1,
        };

        if tag.closing || tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str()) {
            return empty(tag.span.end);
        }

        let mut depth = 0usize;
        for j in open + 1..limit {
            let other = &self.tags[j];
            if other.name != tag.name || other.self_closing {
                continue;
            }
            if !other.closing {
                depth += 1;
            } else if depth == 0 {
                return Element {
                    name: tag.name.clone(),
                    class: tag.class.clone(),
                    inner: tag.span.end..other.span.start,
                    tags: open + 1..j,
                    next_tag: j + 1,
                };
            } else {
                depth -= 1;
            }
        }

        Element {
            name: tag.name.clone(),
            class: tag.class.clone(),
            inner: tag.span.end..end.max(tag.span.end),
            tags: open + 1..limit,
            next_tag: limit,
        }
    }
}

fn push_text_node(nodes: &mut Vec<String>, raw: &str) {
    if !raw.is_empty() {
        nodes.push(decode_entities(raw));
    }
}

fn class_attribute(attrs: &str) -> String {
    RE_CLASS_ATTR
        .captures(attrs)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Decode the HTML entities that show up in scraped text.
///
/// Numeric references decode to their code point. Unknown named entities
/// are left as written. `&nbsp;` becomes a plain space.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    RE_ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            decode_entity(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| c.to_string());
    }
    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<!-- <div class="target">commented out</div> -->
<div class="wrapper target extra">
  <p>First <b>bold</b> paragraph.</p>
  <table><tr><td>skipped</td></tr></table>
  <ul><li>one</li><li>two</li></ul>
  <div class="target">nested</div>
  <br>
  <p>Second &amp; last</p>
</div>
<script>var x = "<p>not text</p>";</script>
</body></html>"#;

    #[test]
    fn test_find_by_class_skips_comments() {
        let doc = HtmlDocument::parse(PAGE);
        let el = doc.find_by_class("target").unwrap();
        assert_eq!(el.name, "div");
        assert_eq!(el.class, "wrapper target extra");
    }

    #[test]
    fn test_children_are_direct_only() {
        let doc = HtmlDocument::parse(PAGE);
        let el = doc.find_by_class("wrapper").unwrap();
        let names: Vec<String> = doc.children(&el).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["p", "table", "ul", "div", "br", "p"]);
    }

    #[test]
    fn test_nested_same_name_elements_close_correctly() {
        let doc = HtmlDocument::parse(PAGE);
        let el = doc.find_by_class("wrapper").unwrap();
        let text = doc.text(&el);
        assert!(text.contains("nested"));
        assert!(text.contains("Second & last"));
        assert!(!text.contains("not text"));
    }

    #[test]
    fn test_text_concatenates_inline_tags() {
        let doc = HtmlDocument::parse(PAGE);
        let el = doc.find_by_class("wrapper").unwrap();
        let first = &doc.children(&el)[0];
        assert_eq!(doc.text(first), "First bold paragraph.");
    }

    #[test]
    fn test_text_with_separator() {
        let doc = HtmlDocument::parse("<div class=\"jd\"><h3>Who You Are</h3><p>Rust</p></div>");
        let el = doc.find_by_class("jd").unwrap();
        assert_eq!(doc.text_with_separator(&el, "\n"), "Who You Are\nRust");
    }

    #[test]
    fn test_unclosed_element_runs_to_parent_end() {
        let doc = HtmlDocument::parse("<div class='box'><p>open<p>again</div><p>after</p>");
        let el = doc.find_by_class("box").unwrap();
        assert_eq!(doc.text(&el), "openagain");
        assert!(!doc.text(&el).contains("after"));
    }

    #[test]
    fn test_missing_class_is_none() {
        let doc = HtmlDocument::parse(PAGE);
        assert!(doc.find_by_class("job_description").is_none());
    }

    #[test]
    fn test_find_by_class_matches_whole_class_names() {
        let doc = HtmlDocument::parse(
            r#"<div class="job_description_header">Apply now</div>
<div class="main job_description"><p>Operate clusters.</p></div>"#,
        );
        let el = doc.find_by_class("job_description").unwrap();
        assert_eq!(el.class, "main job_description");
        assert_eq!(doc.text(&el), "Operate clusters.");
        assert!(doc.find_by_class("job").is_none());
    }

    #[test]
    fn test_find_by_class_containing_matches_substrings() {
        let doc = HtmlDocument::parse(
            r#"<div class="field firstNameValue">Jane</div><div class="value attachment">CV</div>"#,
        );
        let first = doc.find_by_class_containing("firstName").unwrap();
        assert_eq!(doc.text(&first), "Jane");
        let resume = doc.find_by_class_containing("value attachment").unwrap();
        assert_eq!(doc.text(&resume), "CV");
        assert!(doc.find_by_class("firstName").is_none());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("AI &amp; ML"), "AI & ML");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
        assert_eq!(decode_entities("no entities"), "no entities");
    }
}
