//! Mention & requirement locator.
//!
//! Pass 1 finds every whole-word occurrence of each technology's name and
//! aliases. Pass 2 looks for the closest duration expression ("10+ years")
//! in a delimiter-trimmed window around each mention and checks it against
//! the technology's release year.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::technology::Technology;
use crate::scanner::text;

/// Two mentions of the same technology closer than this many characters are
/// one occurrence (e.g. a name and an alias hitting the same spot).
pub const MENTION_DEDUP_DISTANCE: usize = 10;

/// A located occurrence of a technology's name or alias.
#[derive(Debug, Clone)]
struct Mention<'a> {
    technology: &'a Technology,
    position: usize,
    matched_text: &'a str,
}

impl Mention<'_> {
    fn span(&self) -> Range<usize> {
        self.position..self.position + self.matched_text.len()
    }
}

/// An experience claim tied to a technology, judged against its release year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRequirement {
    pub technology: Technology,
    pub requested_years: u32,
    /// Byte offset of the mention the claim was attributed to.
    pub found_index: usize,
    pub max_possible_years: i32,
    pub is_valid: bool,
}

/// Scans `text` for experience requirements on catalog technologies.
///
/// At most one requirement per technology name is returned: the one with the
/// highest requested years. Results follow catalog order, not text order.
pub fn locate(text: &str, catalog: &[Technology], current_year: i32) -> Vec<ParsedRequirement> {
    let mentions = dedup_mentions(text, find_mentions(text, catalog));

    let mut results: Vec<ParsedRequirement> = Vec::new();
    let mut slot_by_name: HashMap<&str, usize> = HashMap::new();

    for mention in &mentions {
        let Some(requested_years) = closest_duration(text, mention) else {
            continue;
        };

        let max_possible_years = mention.technology.max_possible_years(current_year);
        let candidate = ParsedRequirement {
            technology: mention.technology.clone(),
            requested_years,
            found_index: mention.position,
            max_possible_years,
            is_valid: i64::from(requested_years) <= i64::from(max_possible_years),
        };

        match slot_by_name.get(mention.technology.name.as_str()) {
            Some(&slot) => {
                if candidate.requested_years > results[slot].requested_years {
                    results[slot] = candidate;
                }
            }
            None => {
                slot_by_name.insert(mention.technology.name.as_str(), results.len());
                results.push(candidate);
            }
        }
    }

    debug!(
        mentions = mentions.len(),
        requirements = results.len(),
        invalid = results.iter().filter(|r| !r.is_valid).count(),
        "located requirements"
    );

    results
}

/// Pass 1: every name/alias hit, in catalog order then name order then text order.
fn find_mentions<'a>(text: &'a str, catalog: &'a [Technology]) -> Vec<Mention<'a>> {
    let mut mentions = Vec::new();
    for technology in catalog {
        for name in technology.search_names() {
            for hit in text::find_whole_word(text, name) {
                mentions.push(Mention {
                    technology,
                    position: hit.start,
                    matched_text: &text[hit],
                });
            }
        }
    }
    mentions
}

/// Keeps a mention only if no earlier mention of the same technology lies
/// within `MENTION_DEDUP_DISTANCE` of it.
fn dedup_mentions<'a>(text: &str, mentions: Vec<Mention<'a>>) -> Vec<Mention<'a>> {
    let keep: Vec<bool> = mentions
        .iter()
        .enumerate()
        .map(|(index, mention)| {
            let first = mentions.iter().position(|other| {
                other.technology.name == mention.technology.name
                    && text::char_distance(text, other.position, mention.position)
                        < MENTION_DEDUP_DISTANCE
            });
            first == Some(index)
        })
        .collect();

    mentions
        .into_iter()
        .zip(keep)
        .filter_map(|(mention, keep)| keep.then_some(mention))
        .collect()
}

/// Pass 2: the duration expression nearest to the mention inside its window,
/// measured in characters. Ties go to the leftmost candidate.
fn closest_duration(text: &str, mention: &Mention<'_>) -> Option<u32> {
    let window = text::trimmed_window(text, mention.span());
    let slice = &text[window.clone()];
    let anchor = mention.position - window.start;

    text::durations(slice)
        .min_by_key(|duration| text::char_distance(slice, duration.offset, anchor))
        .map(|duration| duration.years)
}
