//! Corrector: rewrites impossible experience claims down to the maximum
//! possible duration and records every edit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scanner::locator::ParsedRequirement;
use crate::scanner::text;

/// One substitution applied to the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub technology: String,
    pub original: u32,
    pub corrected: i32,
    /// Anchor offset of the technology mention in the original text.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub corrected_text: String,
    /// Ordered by descending `position`, the order edits were applied in.
    pub changelog: Vec<ChangelogEntry>,
}

/// Replaces each invalid requirement's duration with its maximum possible value.
///
/// Requirements are patched right to left so that every edit happens after the
/// anchors still to be processed. A requirement whose duration can no longer be
/// found near its anchor is skipped and leaves the text untouched.
pub fn correct(text: &str, requirements: &[ParsedRequirement]) -> Correction {
    let mut invalid: Vec<&ParsedRequirement> =
        requirements.iter().filter(|r| !r.is_valid).collect();
    invalid.sort_by(|a, b| b.found_index.cmp(&a.found_index));

    let mut corrected_text = text.to_string();
    let mut changelog = Vec::new();

    for requirement in invalid {
        match patch(&corrected_text, requirement) {
            Some(patched) => {
                corrected_text = patched;
                changelog.push(ChangelogEntry {
                    technology: requirement.technology.name.clone(),
                    original: requirement.requested_years,
                    corrected: requirement.max_possible_years,
                    position: requirement.found_index,
                });
            }
            None => debug!(
                technology = %requirement.technology.name,
                position = requirement.found_index,
                "no matching duration near anchor, skipping correction"
            ),
        }
    }

    Correction {
        corrected_text,
        changelog,
    }
}

/// Rewrites the first occurrence of the requested duration inside the window
/// around `found_index`. Only the numeral changes; `+`, spacing and unit stay.
fn patch(text: &str, requirement: &ParsedRequirement) -> Option<String> {
    let anchor = requirement.found_index;
    if anchor > text.len() || !text.is_char_boundary(anchor) {
        return None;
    }

    let span_chars = requirement.technology.name.chars().count();
    let window = text::raw_window(text, anchor, span_chars);

    let pattern = text::exact_duration_pattern(requirement.requested_years);
    let hit = pattern.find(&text[window.clone()])?;

    let numeral_start = window.start + hit.start();
    let numeral_end = numeral_start + requirement.requested_years.to_string().len();

    let replacement = requirement.max_possible_years.to_string();
    let mut patched =
        String::with_capacity(text.len() - (numeral_end - numeral_start) + replacement.len());
    patched.push_str(&text[..numeral_start]);
    patched.push_str(&replacement);
    patched.push_str(&text[numeral_end..]);
    Some(patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::technology::Technology;
    use crate::scanner::locator::locate;

    fn requirement(name: &str, requested: u32, found_index: usize, max: i32) -> ParsedRequirement {
        ParsedRequirement {
            technology: Technology::new(name, 2024 - max),
            requested_years: requested,
            found_index,
            max_possible_years: max,
            is_valid: i64::from(requested) <= i64::from(max),
        }
    }

    #[test]
    fn test_langchain_scenario() {
        let text = "Looking for a LangChain expert with 10+ years of experience";
        let catalog = vec![Technology::new("LangChain", 2022)];
        let requirements = locate(text, &catalog, 2024);

        let correction = correct(text, &requirements);

        assert_eq!(
            correction.corrected_text,
            "Looking for a LangChain expert with 2+ years of experience"
        );
        assert_eq!(
            correction.changelog,
            vec![ChangelogEntry {
                technology: "LangChain".to_string(),
                original: 10,
                corrected: 2,
                position: 14,
            }]
        );
    }

    #[test]
    fn test_valid_requirements_are_left_alone() {
        let text = "React 5 years";
        let correction = correct(text, &[requirement("React", 5, 0, 11)]);
        assert_eq!(correction.corrected_text, text);
        assert!(correction.changelog.is_empty());
    }

    #[test]
    fn test_right_to_left_keeps_left_anchor_valid() {
        // Anchors at 10 and 56; the right edit shrinks the text by one byte.
        let text = "Need some React with 15 years and then some more filler Go 20 years";
        assert_eq!(&text[10..15], "React");
        assert_eq!(&text[56..58], "Go");

        let requirements = vec![
            requirement("React", 15, 10, 11),
            requirement("Go", 20, 56, 9),
        ];
        let correction = correct(text, &requirements);

        assert_eq!(
            correction.corrected_text,
            "Need some React with 11 years and then some more filler Go 9 years"
        );
        let positions: Vec<usize> = correction.changelog.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![56, 10]);
    }

    #[test]
    fn test_longer_replacement_does_not_disturb_earlier_edits() {
        let text = "Go 200 years; Rust 300 years";
        let requirements = vec![
            requirement("Go", 200, 0, 15),
            requirement("Rust", 300, 14, 1000),
        ];
        // Rust is valid here, so only Go changes.
        let correction = correct(text, &requirements);
        assert_eq!(correction.corrected_text, "Go 15 years; Rust 300 years");
    }

    #[test]
    fn test_preserves_plus_spacing_and_unit_case() {
        let text = "Kotlin 20+   YRS";
        let correction = correct(text, &[requirement("Kotlin", 20, 0, 13)]);
        assert_eq!(correction.corrected_text, "Kotlin 13+   YRS");
    }

    #[test]
    fn test_only_first_occurrence_in_window_is_replaced() {
        let text = "Rust 12 years, not 12 years";
        let correction = correct(text, &[requirement("Rust", 12, 0, 9)]);
        assert_eq!(correction.corrected_text, "Rust 9 years, not 12 years");
    }

    #[test]
    fn test_missing_duration_is_skipped_silently() {
        let text = "Rust experience required";
        let correction = correct(text, &[requirement("Rust", 12, 0, 9)]);
        assert_eq!(correction.corrected_text, text);
        assert!(correction.changelog.is_empty());
    }

    #[test]
    fn test_anchor_outside_text_is_skipped() {
        let text = "Rust 12 years";
        let correction = correct(text, &[requirement("Rust", 12, 500, 9)]);
        assert_eq!(correction.corrected_text, text);
        assert!(correction.changelog.is_empty());
    }

    #[test]
    fn test_duration_far_outside_window_is_not_touched() {
        let text = format!("Rust {} 12 years", "x".repeat(80));
        let correction = correct(&text, &[requirement("Rust", 12, 0, 9)]);
        assert_eq!(correction.corrected_text, text);
    }

    #[test]
    fn test_rescan_of_corrected_text_is_clean() {
        let catalog = vec![
            Technology::new("React", 2013),
            Technology::new("Python", 1991),
            Technology::new("LangChain", 2022),
        ];
        let text = "React 15 years, Python 40 years; LangChain 10+ yrs";
        let requirements = locate(text, &catalog, 2024);
        assert_eq!(requirements.iter().filter(|r| !r.is_valid).count(), 3);

        let correction = correct(text, &requirements);
        assert_eq!(
            correction.corrected_text,
            "React 11 years, Python 33 years; LangChain 2+ yrs"
        );

        let rescanned = locate(&correction.corrected_text, &catalog, 2024);
        assert_eq!(rescanned.len(), 3);
        assert!(rescanned.iter().all(|r| r.is_valid));
    }

    #[test]
    fn test_no_match_passthrough() {
        let text = "A job with no technologies, 10 years though";
        let requirements = locate(text, &[Technology::new("Rust", 2015)], 2024);
        assert!(requirements.is_empty());

        let correction = correct(text, &requirements);
        assert_eq!(correction.corrected_text, text);
        assert!(correction.changelog.is_empty());
    }

    #[test]
    fn test_multibyte_text_is_patched_on_char_boundaries() {
        let text = "Équipe «Rust» — 12 années? Non: 12 years ✓";
        let anchor = text.find("Rust").unwrap();
        let correction = correct(text, &[requirement("Rust", 12, anchor, 9)]);
        assert_eq!(
            correction.corrected_text,
            "Équipe «Rust» — 12 années? Non: 9 years ✓"
        );
    }
}
