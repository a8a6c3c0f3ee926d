//! Catalog search and the "<name> <years>" quick check.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::technology::Technology;

/// "react 12" → ("react", "12"). Applied to the lowercased, trimmed query.
static QUICK_CHECK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([0-9]+)$").expect("quick check pattern must compile"));

/// Verdict for a single "<name> <years>" query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCheck {
    pub technology: Technology,
    pub requested_years: u32,
    pub max_possible_years: i32,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub technologies: Vec<Technology>,
    pub quick_check: Option<QuickCheck>,
}

fn matches_query(technology: &Technology, needle: &str) -> bool {
    technology
        .search_names()
        .any(|name| name.to_lowercase().contains(needle))
}

/// Case-insensitive substring match on name or any alias. A blank query
/// returns the whole catalog.
pub fn filter(catalog: &[Technology], query: &str) -> Vec<Technology> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.to_vec();
    }
    catalog
        .iter()
        .filter(|technology| matches_query(technology, &needle))
        .cloned()
        .collect()
}

/// Resolves "<name> <years>" to the first matching technology and judges the claim.
pub fn quick_check(catalog: &[Technology], query: &str, current_year: i32) -> Option<QuickCheck> {
    let query = query.trim().to_lowercase();
    let caps = QUICK_CHECK_PATTERN.captures(&query)?;
    let name = caps.get(1)?.as_str().trim();
    let requested_years = caps.get(2)?.as_str().parse::<u32>().ok()?;

    let technology = catalog.iter().find(|t| matches_query(t, name))?;
    let max_possible_years = technology.max_possible_years(current_year);

    Some(QuickCheck {
        technology: technology.clone(),
        requested_years,
        max_possible_years,
        is_valid: i64::from(requested_years) <= i64::from(max_possible_years),
    })
}

/// Search-box behaviour: a resolvable quick check narrows the list to its
/// technology; anything else falls back to plain filtering.
pub fn search(catalog: &[Technology], query: &str, current_year: i32) -> SearchOutcome {
    match quick_check(catalog, query, current_year) {
        Some(check) => SearchOutcome {
            technologies: vec![check.technology.clone()],
            quick_check: Some(check),
        },
        None => SearchOutcome {
            technologies: filter(catalog, query),
            quick_check: None,
        },
    }
}
