//! HTML tag stripping for free-text fields.

use std::sync::LazyLock;

use regex::Regex;

/// Matches comments and anything that looks like an opening or closing tag.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!][^<>]*>").expect("valid regex"));

/// Remove HTML tags and comments, keeping the text between them.
///
/// A bare `<` that does not open a tag (as in `a < b`) is kept.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Strip tags and surrounding whitespace.
pub fn clean_text(input: &str) -> String {
    strip_tags(input).trim().to_string()
}
