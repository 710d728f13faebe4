//! Tolerant HTML scanning helpers.
//!
//! Chart pages are not well-formed enough for a strict parser to be worth
//! it, so extraction works on local scans: find an opening tag, find its
//! matching close by counting same-name nesting, and read text out of the
//! block. Tag and attribute names are matched case-insensitively.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("static regex"));
static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("static regex"));
static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").expect("static regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"));
static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<br\s*/?>|</?(p|div|li|ul|ol|dl|dt|dd|tr|td|th|table|h[1-6]|section|article|header|footer|nav)\b[^>]*>",
    )
    .expect("static regex")
});

/// One element found in a document: its name, raw attribute text and inner HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub name: String,
    attrs: &'a str,
    pub inner: &'a str,
}

impl<'a> Element<'a> {
    /// Value of an attribute, entity-decoded. Names are case-insensitive.
    pub fn attr(&self, key: &str) -> Option<String> {
        parse_attributes(self.attrs)
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| decode_entities(&value))
    }

    /// True when any class token contains `fragment`.
    pub fn has_class(&self, fragment: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c.contains(fragment)))
            .unwrap_or(false)
    }

    /// Visible text of the element, whitespace collapsed.
    pub fn text(&self) -> String {
        text_content(self.inner)
    }

    /// Descendant elements with the given tag name, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<Element<'a>> {
        elements_by_tag(self.inner, tag)
    }

    /// Descendant elements with a class token containing `fragment`.
    pub fn descendants_by_class(&self, fragment: &str) -> Vec<Element<'a>> {
        elements_by_class(self.inner, fragment)
    }
}

/// All elements named `tag`, including nested ones, in document order.
pub fn elements_by_tag<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    let tag = tag.to_ascii_lowercase();
    scan(html, |name, _| name == tag)
}

/// All elements whose class attribute has a token containing `fragment`.
pub fn elements_by_class<'a>(html: &'a str, fragment: &str) -> Vec<Element<'a>> {
    scan(html, |_, attrs| {
        parse_attributes(attrs)
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("class"))
            .any(|(_, value)| value.split_whitespace().any(|c| c.contains(fragment)))
    })
}

/// All elements carrying attribute `name`, whatever its value.
pub fn elements_with_attr<'a>(html: &'a str, name: &str) -> Vec<Element<'a>> {
    scan(html, |_, attrs| {
        parse_attributes(attrs)
            .iter()
            .any(|(attr, _)| attr.eq_ignore_ascii_case(name))
    })
}

/// Strip tags, decode entities and collapse whitespace.
pub fn text_content(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    collapse_whitespace(&decode_entities(&without_tags))
}

/// Split a page into visible text lines.
///
/// Scripts, styles and comments are removed; block-level tags and `<br>`
/// become line breaks; every line is trimmed and whitespace-collapsed.
/// Empty lines are dropped.
pub fn text_lines(html: &str) -> Vec<String> {
    let cleaned = COMMENT.replace_all(html, "");
    let cleaned = SCRIPT.replace_all(&cleaned, "");
    let cleaned = STYLE.replace_all(&cleaned, "");
    let broken = BLOCK_BREAK.replace_all(&cleaned, "\n");
    let text = TAG.replace_all(&broken, " ");
    let text = decode_entities(&text);

    text.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Decode named entities commonly found on chart pages plus numeric ones.
/// Unknown entities are left untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    "middot" => Some('·'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Walk every opening tag and collect those accepted by `matches(name, attrs)`.
fn scan<'a, F>(html: &'a str, matches: F) -> Vec<Element<'a>>
where
    F: Fn(&str, &str) -> bool,
{
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find('<') {
        let at = pos + offset;
        let Some(open) = parse_open_tag(&lower, at) else {
            pos = at + 1;
            continue;
        };
        let attrs = &html[open.attrs_start..open.attrs_end];

        if matches(&open.name, attrs) {
            let inner = if open.self_closing || VOID_ELEMENTS.contains(&open.name.as_str()) {
                ""
            } else {
                let inner_end = find_close(&lower, &open.name, open.end)
                    .or_else(|| find_tag_start(&lower, &format!("<{}", open.name), open.end))
                    .unwrap_or(bytes.len());
                &html[open.end..inner_end]
            };
            found.push(Element {
                name: open.name.clone(),
                attrs,
                inner,
            });
        }
        pos = open.end;
    }

    found
}

struct OpenTag {
    name: String,
    attrs_start: usize,
    attrs_end: usize,
    end: usize,
    self_closing: bool,
}

fn parse_open_tag(lower: &str, at: usize) -> Option<OpenTag> {
    let bytes = lower.as_bytes();
    let name_start = at + 1;
    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }
    let mut i = name_start;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = lower[name_start..i].to_string();
    let attrs_start = i;

    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => break,
            None => {}
        }
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }

    let self_closing = i > attrs_start && bytes[i - 1] == b'/';
    let attrs_end = if self_closing { i - 1 } else { i };
    Some(OpenTag {
        name,
        attrs_start,
        attrs_end,
        end: i + 1,
        self_closing,
    })
}

/// Offset of the `</name` that closes an element whose content starts at `from`.
fn find_close(lower: &str, name: &str, from: usize) -> Option<usize> {
    let open_pat = format!("<{name}");
    let close_pat = format!("</{name}");
    let mut depth = 1usize;
    let mut pos = from;

    loop {
        let next_close = find_tag_start(lower, &close_pat, pos)?;
        match find_tag_start(lower, &open_pat, pos) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos = next_open + open_pat.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + close_pat.len();
            }
        }
    }
}

/// Find `pattern` (`<name` or `</name`) followed by a non-name byte.
fn find_tag_start(lower: &str, pattern: &str, from: usize) -> Option<usize> {
    let bytes = lower.as_bytes();
    let mut pos = from;
    while let Some(offset) = lower.get(pos..)?.find(pattern) {
        let at = pos + offset;
        let after = at + pattern.len();
        if bytes.get(after).map_or(true, |b| !is_name_byte(*b)) {
            return Some(at);
        }
        pos = after;
    }
    None
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = raw.chars().collect();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == '/') {
            i += 1;
        }
        let name_start = i;
        while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '=' && chars[i] != '/'
        {
            i += 1;
        }
        if name_start == i {
            i += 1;
            continue;
        }
        let name: String = chars[name_start..i].iter().collect();

        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i < chars.len() && (chars[i] == '"' || chars[i] == '\'') {
                let quote = chars[i];
                i += 1;
                let value_start = i;
                while i < chars.len() && chars[i] != quote {
                    i += 1;
                }
                value = chars[value_start..i].iter().collect();
                i += 1;
            } else {
                let value_start = i;
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                value = chars[value_start..i].iter().collect();
            }
        }
        attrs.push((name.to_ascii_lowercase(), value));
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_same_name_elements_close_correctly() {
        let html = r#"<div class="outer"><div>inner</div> tail</div><div>next</div>"#;
        let outer = elements_by_class(html, "outer");
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].inner, "<div>inner</div> tail");
        assert_eq!(outer[0].text(), "inner tail");
    }

    #[test]
    fn test_case_insensitive_tags_and_attributes() {
        let html = r#"<UL><LI CLASS="Row"><A HREF='/song/1'>One</A></LI></UL>"#;
        let items = elements_by_tag(html, "li");
        assert_eq!(items.len(), 1);
        let anchor = &items[0].descendants_by_tag("a")[0];
        assert_eq!(anchor.attr("href").as_deref(), Some("/song/1"));
        assert_eq!(anchor.text(), "One");
    }

    #[test]
    fn test_unclosed_items_end_at_next_sibling() {
        let html = "<ul><li>one<li>two</ul>";
        let items = elements_by_tag(html, "li");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), "one");
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let html = r#"<a title="a > b" href="x">T</a>"#;
        let anchors = elements_by_tag(html, "a");
        assert_eq!(anchors[0].attr("title").as_deref(), Some("a > b"));
        assert_eq!(anchors[0].text(), "T");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("R&amp;B &#38; &#x4E2D;&nbsp;x"), "R&B & 中 x");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_text_lines_drops_scripts_and_breaks_blocks() {
        let html = "<html><head><script>var a = '<li>';</script><style>p{}</style></head>\
                    <body><p>First  line</p><!-- hidden --><div>Second<br/>Third</div></body></html>";
        assert_eq!(text_lines(html), vec!["First line", "Second", "Third"]);
    }

    #[test]
    fn test_elements_with_attr_ignores_value() {
        let html = r#"<div data-index="0">a</div><div data-index>b</div><div data-id="2">c</div>"#;
        let rows = elements_with_attr(html, "data-index");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text(), "b");
    }

    #[test]
    fn test_class_fragment_matches_token_substring() {
        let html = r#"<span class="pc_temp_time wide">3:45</span>"#;
        let spans = elements_by_tag(html, "span");
        assert!(spans[0].has_class("time"));
        assert!(!spans[0].has_class("duration"));
    }
}
