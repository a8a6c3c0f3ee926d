//! Text utilities shared by the locator and the corrector.
//!
//! Offsets handed around here are byte offsets into a `&str` and always sit on a
//! char boundary. Window widths are counted in characters so a window can never
//! split a multi-byte character.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Characters scanned on each side of a mention when looking for a duration.
pub const WINDOW_CHARS: usize = 50;

/// Units accepted after a numeral: year, years, yr, yrs, yoe.
const UNIT_PATTERN: &str = r"(?:years?|yrs?|yoe)";

/// Delimiters that end a window on the left of a mention.
const LEADING_DELIMITERS: [char; 4] = [',', ';', '\n', '.'];

/// Delimiters that end a window on the right of a mention. Matched literally.
const TRAILING_DELIMITERS: [&str; 6] = [",", ";", "\n", ".", " and ", " or "];

/// "5 years", "10+ yrs", "3yoe", ... with the numeral captured.
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)([0-9]+)\+?\s*{UNIT_PATTERN}"))
        .expect("duration pattern must compile")
});

/// A duration expression found inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub years: u32,
    /// Byte offset of the expression within the searched slice.
    pub offset: usize,
}

/// Byte offset `n` characters before `from`, clamped to the start of `text`.
pub fn retreat_chars(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `from`, clamped to the end of `text`.
pub fn advance_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

/// Number of characters between two byte offsets, in either order.
pub fn char_distance(text: &str, a: usize, b: usize) -> usize {
    text[a.min(b)..a.max(b)].chars().count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn has_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Case-insensitive search for `literal` as a whole word.
///
/// The literal is escaped, so "C++" or "C#" match as written. A hit only counts
/// when the characters on both sides are non-word characters or string edges.
pub fn find_whole_word(text: &str, literal: &str) -> Vec<Range<usize>> {
    if literal.trim().is_empty() {
        return vec![];
    }
    let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(literal))) else {
        return vec![];
    };

    let mut found = Vec::new();
    let mut cursor = 0;
    while cursor <= text.len() {
        let Some(m) = pattern.find_at(text, cursor) else {
            break;
        };
        if has_word_boundaries(text, m.start(), m.end()) {
            found.push(m.range());
            cursor = m.end();
        } else {
            // Rejected hits may still overlap a valid one further on.
            cursor = advance_chars(text, m.start(), 1);
            if cursor == m.start() {
                break;
            }
        }
    }
    found
}

/// Window reaching `WINDOW_CHARS` before `start` and `WINDOW_CHARS` past the
/// first `span_chars` characters from `start`, clipped to the text.
pub fn raw_window(text: &str, start: usize, span_chars: usize) -> Range<usize> {
    let window_start = retreat_chars(text, start, WINDOW_CHARS);
    let window_end = advance_chars(text, start, span_chars + WINDOW_CHARS);
    window_start..window_end
}

/// Window around a mention occupying `mention`, narrowed to the nearest
/// delimiter on each side so a neighbouring list item cannot leak in.
pub fn trimmed_window(text: &str, mention: Range<usize>) -> Range<usize> {
    let mut start = retreat_chars(text, mention.start, WINDOW_CHARS);
    let mut end = advance_chars(text, mention.end, WINDOW_CHARS);

    if let Some(i) = text[start..mention.start].rfind(|c: char| LEADING_DELIMITERS.contains(&c)) {
        // All leading delimiters are single-byte.
        start += i + 1;
    }

    if let Some(cut) = trailing_cut(&text[mention.end..end]) {
        end = mention.end + cut;
    }

    start..end
}

/// Where the right side of a window stops, relative to the mention end.
///
/// A comma or semicolon sitting right after the mention and followed by a
/// duration ("Vue, 3 years") introduces that mention's own claim, so the cut
/// moves on to the next delimiter.
fn trailing_cut(after: &str) -> Option<usize> {
    let (i, delimiter) = next_trailing_delimiter(after, 0)?;
    let introduces_claim = matches!(delimiter, "," | ";")
        && after[..i].trim().is_empty()
        && starts_with_duration(&after[i + delimiter.len()..]);
    if introduces_claim {
        return next_trailing_delimiter(after, i + delimiter.len()).map(|(j, _)| j);
    }
    Some(i)
}

fn next_trailing_delimiter(after: &str, from: usize) -> Option<(usize, &'static str)> {
    after[from..].char_indices().find_map(|(i, _)| {
        TRAILING_DELIMITERS
            .iter()
            .find(|d| after[from + i..].starts_with(**d))
            .map(|d| (from + i, *d))
    })
}

fn starts_with_duration(s: &str) -> bool {
    DURATION_PATTERN
        .find(s.trim_start())
        .is_some_and(|m| m.start() == 0)
}

/// Every duration expression in `slice`, in left-to-right order.
/// Numerals that do not fit a `u32` are skipped.
pub fn durations(slice: &str) -> impl Iterator<Item = Duration> + '_ {
    DURATION_PATTERN.captures_iter(slice).filter_map(|caps| {
        let whole = caps.get(0)?;
        let years = caps.get(1)?.as_str().parse::<u32>().ok()?;
        Some(Duration {
            years,
            offset: whole.start(),
        })
    })
}

/// Pattern for one specific duration, e.g. `15` → "15 years", "15+ yrs".
/// The numeral must start on a word boundary so "115 years" is not a hit for 15.
pub fn exact_duration_pattern(years: u32) -> Regex {
    Regex::new(&format!(r"(?i)\b{years}\+?\s*{UNIT_PATTERN}"))
        .expect("numeric duration pattern must compile")
}
