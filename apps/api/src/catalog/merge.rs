use std::collections::HashMap;

use crate::models::technology::Technology;

/// Flattens per-source batches into one catalog keyed by `name`.
///
/// The last record for a name wins, but the name keeps the position where it
/// first appeared.
pub fn merge_last_wins<I>(batches: I) -> Vec<Technology>
where
    I: IntoIterator<Item = Vec<Technology>>,
{
    let mut merged: Vec<Technology> = Vec::new();
    let mut slot_by_name: HashMap<String, usize> = HashMap::new();

    for technology in batches.into_iter().flatten() {
        match slot_by_name.get(&technology.name) {
            Some(&slot) => merged[slot] = technology,
            None => {
                slot_by_name.insert(technology.name.clone(), merged.len());
                merged.push(technology);
            }
        }
    }

    merged
}
