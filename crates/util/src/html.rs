//! Regex-based helpers for pulling tags, attributes and text out of HTML
//! strings. These do not parse HTML; they match flat tag shapes.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use thiserror::Error;

/// Tags matched as `<tag ...>` or `<tag .../>` with no closing tag.
pub const VOID_TAGS: [&str; 7] = ["br", "hr", "img", "input", "param", "meta", "link"];

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("INVALID_PATTERN: {0}")]
    Pattern(#[from] regex::Error),
}

fn tag_regex(tag: &str) -> Result<Regex, HtmlError> {
    let name = regex::escape(tag);
    let source = if VOID_TAGS.contains(&tag.to_ascii_lowercase().as_str()) {
        format!(r"(?i)<{name}(?:\s[^<>]*)?/?>")
    } else {
        format!(r"(?i)<{name}(?:\s[^<>]*)?>[\s\S]*?</{name}\s*>")
    };
    Ok(Regex::new(&source)?)
}

/// `key="value"` or `key='value'`, with the value matched literally.
fn attr_filter_regex(key: &str, value: &str) -> Result<Regex, HtmlError> {
    let key = regex::escape(key);
    let value = regex::escape(value);
    Ok(Regex::new(&format!(
        r#"(?i)\s{key}\s*=\s*(?:"{value}"|'{value}')"#
    ))?)
}

fn attr_value_regex(attr: &str) -> Result<Regex, HtmlError> {
    let attr = regex::escape(attr);
    Ok(Regex::new(&format!(
        r#"(?i)\s{attr}\s*=\s*(?:"([^"]+?)"|'([^']+?)')"#
    ))?)
}

/// Every `tag` element in `source`, optionally narrowed to the elements that
/// carry all of the given `(attribute, value)` pairs. Pairs with an empty
/// value are ignored.
///
/// Paired tags match lazily up to the first closing tag, so nested elements
/// of the same name are cut short.
///
/// ```
/// use zutil::html::get_tags_from_html;
///
/// let source = r#"<div class="c"><span>123</span><img src="/a.jpg"><img src="/b.jpg"/></div>"#;
/// let imgs = get_tags_from_html(source, "img", &[]).unwrap();
/// assert_eq!(imgs, vec![r#"<img src="/a.jpg">"#, r#"<img src="/b.jpg"/>"#]);
///
/// let spans = get_tags_from_html(source, "span", &[]).unwrap();
/// assert_eq!(spans, vec!["<span>123</span>"]);
/// ```
pub fn get_tags_from_html(
    source: &str,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Vec<String>, HtmlError> {
    if source.is_empty() {
        warn!("get_tags_from_html: empty source");
        return Ok(Vec::new());
    }
    if tag.is_empty() {
        warn!("get_tags_from_html: empty tag");
        return Ok(Vec::new());
    }

    let mut found: Vec<String> = tag_regex(tag)?
        .find_iter(source)
        .map(|m| m.as_str().to_string())
        .collect();

    let filters = attrs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| attr_filter_regex(key, value))
        .collect::<Result<Vec<_>, _>>()?;
    if !filters.is_empty() {
        found.retain(|element| filters.iter().all(|filter| filter.is_match(element)));
    }
    Ok(found)
}

/// The value of `attr` on every matched `tag` element; `""` for elements
/// that do not carry it.
///
/// ```
/// use zutil::html::get_attr_from_html;
///
/// let source = r#"<img src="/enen.jpg"><div><img src='/haha.jpg'><img alt="x"></div>"#;
/// let srcs = get_attr_from_html(source, "img", "src", &[]).unwrap();
/// assert_eq!(srcs, vec!["/enen.jpg", "/haha.jpg", ""]);
/// ```
pub fn get_attr_from_html(
    source: &str,
    tag: &str,
    attr: &str,
    attrs: &[(&str, &str)],
) -> Result<Vec<String>, HtmlError> {
    if attr.is_empty() {
        warn!("get_attr_from_html: empty attr");
        return Ok(Vec::new());
    }
    let elements = get_tags_from_html(source, tag, attrs)?;
    let value_re = attr_value_regex(attr)?;
    Ok(elements
        .iter()
        .map(|element| {
            value_re
                .captures(element)
                .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
                .map_or_else(String::new, |m| m.as_str().to_string())
        })
        .collect())
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<style[^>]*>[\s\S]*?</style>|<[^>]*>").unwrap())
}

/// Strip `<style>` blocks and every tag, leaving the text content.
///
/// ```
/// use zutil::html::get_pure_text_from_html;
///
/// let source = "<style>p { color: red }</style><div><img src=\"/a.jpg\"><span>456</span></div>";
/// assert_eq!(get_pure_text_from_html(source), "456");
/// ```
pub fn get_pure_text_from_html(source: &str) -> String {
    markup_regex().replace_all(source, "").into_owned()
}

/// Escape `& < > ' "` for safe inclusion in HTML text or attribute values.
///
/// ```
/// use zutil::html::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
/// );
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
