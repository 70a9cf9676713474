//! Shared helpers for wiki markup rendering.

use std::borrow::Cow;
use std::sync::LazyLock;

use pulldown_cmark::HeadingLevel;
use regex::{Captures, Regex};

/// HTML character references: `&#NNN;`, `&#xHH;` and named `&name;`.
///
/// The trailing semicolon is optional.
static CHARACTER_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&(#\d+|#x[0-9a-f]+|\w+);?").unwrap());

/// Single newlines, optionally preceded by a carriage return.
static NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Extract the language hint from a code fence info string.
///
/// The hint is the first whitespace-separated token; anything after it
/// (attributes, titles) is ignored.
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

/// Replace every newline with `replacement` and trim the result.
#[must_use]
pub fn replace_newlines(text: &str, replacement: &str) -> String {
    NEWLINE
        .replace_all(text, regex::NoExpand(replacement))
        .trim()
        .to_owned()
}

/// Decode HTML character references back to literal characters.
///
/// Handles `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&colon;` and numeric
/// references in decimal and hex form. Unknown names and invalid code points
/// are left untouched.
///
/// # Examples
///
/// ```
/// use md2confl_renderer::unescape_html;
///
/// assert_eq!(unescape_html("a &amp; b &lt;c&gt;"), "a & b <c>");
/// assert_eq!(unescape_html("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_html("&nbsp;"), "&nbsp;");
/// ```
#[must_use]
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    CHARACTER_REFERENCE.replace_all(text, |caps: &Captures<'_>| {
        let reference = caps[1].to_lowercase();
        let decoded = match reference.as_str() {
            "colon" => Some(':'),
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            numeric => decode_numeric(numeric),
        };
        decoded.map_or_else(|| caps[0].to_owned(), String::from)
    })
}

fn decode_numeric(reference: &str) -> Option<char> {
    let code = if let Some(hex) = reference.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        reference.strip_prefix('#')?.parse().ok()?
    };
    char::from_u32(code)
}
