//! Regex-driven text extraction for scraped pages.
//!
//! A scrape provider is a URL template plus a set of patterns; these functions
//! are the primitives it applies to the fetched body. Every pattern's capture
//! group 1 is the value of interest, trimmed of surrounding whitespace.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static LINE_BREAK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>")
        .expect("Failed to compile line break regex")
});

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile HTML tag regex"));

static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Failed to compile HTML comment regex"));

static HTML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("Failed to compile HTML entity regex")
});

/// Compile `pattern`, with `.` matching newlines when `dot_all` is set.
pub fn compile(pattern: &str, dot_all: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(dot_all)
        .build()
}

/// First capture group of the first match, trimmed.
///
/// Returns `None` when the input is absent, the pattern does not match, or the
/// pattern does not compile (logged at warn).
///
/// ```
/// use reverse_lookup::extract::first_match;
///
/// assert_eq!(first_match(Some("Name: Alice\n"), "Name: (.+)", false), Some("Alice".to_string()));
/// assert_eq!(first_match(None, "Name: (.+)", false), None);
/// ```
pub fn first_match(input: Option<&str>, pattern: &str, dot_all: bool) -> Option<String> {
    let input = input?;
    let regex = compile_or_warn(pattern, dot_all)?;
    first_capture(input, &regex)
}

/// First capture group of every non-overlapping match, in document order.
///
/// An absent input, no match, or an invalid pattern all give an empty vector.
pub fn all_matches(input: Option<&str>, pattern: &str, dot_all: bool) -> Vec<String> {
    let Some(input) = input else {
        return Vec::new();
    };
    match compile_or_warn(pattern, dot_all) {
        Some(regex) => all_captures(input, &regex),
        None => Vec::new(),
    }
}

/// [`first_match`] against an already compiled pattern.
pub fn first_capture(input: &str, regex: &Regex) -> Option<String> {
    regex
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// [`all_matches`] against an already compiled pattern.
///
/// Matches without a group 1 participating are skipped.
pub fn all_captures(input: &str, regex: &Regex) -> Vec<String> {
    regex
        .captures_iter(input)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

fn compile_or_warn(pattern: &str, dot_all: bool) -> Option<Regex> {
    match compile(pattern, dot_all) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern = %pattern, "Invalid extraction pattern: {}", e);
            None
        }
    }
}

/// Reduce an HTML fragment to plain text.
///
/// Block ends (`<br>`, `</p>`, `</div>`, `</li>`) become line breaks, other tags
/// and comments are dropped, whitespace inside each line is collapsed, and
/// entities are decoded. Not a DOM parser.
///
/// ```
/// use reverse_lookup::extract::html_to_text;
///
/// assert_eq!(html_to_text(Some("<b>Smith &amp; Sons</b>")), Some("Smith & Sons".to_string()));
/// ```
pub fn html_to_text(input: Option<&str>) -> Option<String> {
    let input = input?;

    let without_comments = HTML_COMMENT.replace_all(input, "");
    let with_breaks = LINE_BREAK_TAG.replace_all(&without_comments, "\n");
    let stripped = HTML_TAG.replace_all(&with_breaks, " ");

    let collapsed = stripped
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");

    let decoded = decode_entities(&collapsed);
    Some(decoded.trim().to_string())
}

/// Decode named, decimal, and hex character references.
///
/// Unknown names and invalid code points are left as written.
pub fn decode_entities(input: &str) -> String {
    HTML_ENTITY
        .replace_all(input, |caps: &regex::Captures| {
            let body = &caps[1];
            decode_entity(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        _ => return None,
    };
    Some(decoded.to_string())
}
