//! Description normalization for the secondary match key.

use std::sync::LazyLock;

use regex::Regex;

use portrisk_core::types::fold_label;

/// A dotted variable code (`1.5`, `2.10.1`) ending in whitespace, a
/// separator or the end of text. Bare leading numbers (`5G`) are content.
static RE_LEADING_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*\d+(?:\.\d+)+(?:\s*[-–:.]\s*|\s+|$)").ok());
static RE_TRAILING_BRACKET: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*\[[^\]]*\]?\s*$").ok());

/// Strip a leading variable code and a trailing `[period]` suffix, fold case
/// and accents, collapse whitespace and drop trailing punctuation.
///
/// `"1.5 Congestionamento  Portuário. [Curto prazo]"` → `"congestionamento portuario"`.
pub fn normalize_description(text: &str) -> String {
    let mut s = text.to_string();
    if let Some(re) = RE_TRAILING_BRACKET.as_ref() {
        s = re.replace(&s, "").into_owned();
    }
    if let Some(re) = RE_LEADING_CODE.as_ref() {
        s = re.replace(&s, "").into_owned();
    }
    fold_label(&s)
        .trim_end_matches(|c: char| c == '.' || c == ';' || c == ':' || c.is_whitespace())
        .to_string()
}
