//! URL slug helpers.

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static DASH_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn non_word_regex() -> &'static Regex {
    // ASCII word characters only, so slugs stay URL-safe without encoding
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("Invalid non-word regex"))
}

fn dash_run_regex() -> &'static Regex {
    DASH_RUN_REGEX.get_or_init(|| Regex::new(r"-{2,}").expect("Invalid dash regex"))
}

/// Turn arbitrary text into a URL slug.
///
/// Lower-cases, replaces whitespace runs with `-`, drops everything that is
/// not an ASCII word character or `-`, collapses repeated dashes and trims
/// dashes from both ends.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = whitespace_regex().replace_all(&lowered, "-");
    let cleaned = non_word_regex().replace_all(&dashed, "");
    let collapsed = dash_run_regex().replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

/// Whether `slug` is already in canonical slug form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

/// Whether `slug` can be looked up as a single path segment.
///
/// Content source slugs are matched exactly, so case and non-ASCII letters
/// pass. Only values that could escape the segment are refused: empty,
/// dot segments, separators and control characters.
pub fn is_routable_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug
            .chars()
            .any(|ch| ch == '/' || ch == '\\' || ch.is_control())
}
