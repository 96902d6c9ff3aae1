use once_cell::sync::Lazy;
use regex::Regex;

static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r?\n)+").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalize raw extracted text into the canonical form the chunker expects.
///
/// Runs of newlines become a single newline, runs of spaces/tabs become a
/// single space, surrounding whitespace is trimmed and typographic quotes are
/// mapped to their straight ASCII counterparts. Never fails; empty input
/// yields an empty string.
pub fn normalize_text(text: &str) -> String {
    let collapsed_newlines = NEWLINE_RUNS.replace_all(text, "\n");
    let trimmed = collapsed_newlines.trim();
    let collapsed_spaces = SPACE_RUNS.replace_all(trimmed, " ");

    collapsed_spaces.chars().map(canonical_quote).collect()
}

fn canonical_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
        other => other,
    }
}
