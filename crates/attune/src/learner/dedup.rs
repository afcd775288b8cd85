//! Co-occurrence deduplication
//!
//! Once the combined evidence for an entity crosses a threshold, the map
//! commits to its single strongest association: the top container per
//! entity survives untouched and every other container key is deleted.
//! Losing counts are discarded, never merged. This keeps co-occurrence
//! maps bounded.

use std::collections::BTreeMap;

use crate::learner::state::DEDUP_MIN_TOTAL;

/// Build a composite co-occurrence key.
pub(crate) fn cohit_key(entity: &str, container: &str) -> String {
    format!("{entity}:{container}")
}

/// Collapse redundant co-occurrence edges in one map.
///
/// Entities present in 2+ containers whose summed count reaches
/// [`DEDUP_MIN_TOTAL`] keep only their highest-count container (ties broken
/// by container name ascending). Keys that do not split into exactly two
/// components are skipped silently.
pub(crate) fn dedup_cohits(map: &mut BTreeMap<String, u32>) {
    let mut by_entity: BTreeMap<&str, Vec<(&str, u32)>> = BTreeMap::new();
    for (key, count) in map.iter() {
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() != 2 {
            continue;
        }
        by_entity.entry(parts[0]).or_default().push((parts[1], *count));
    }

    let mut losers: Vec<String> = Vec::new();
    for (entity, mut containers) in by_entity {
        if containers.len() < 2 {
            continue;
        }
        let total: u32 = containers.iter().map(|(_, count)| count).sum();
        if total < DEDUP_MIN_TOTAL {
            continue;
        }
        containers.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (name, _) in &containers[1..] {
            losers.push(cohit_key(entity, name));
        }
    }

    for key in losers {
        map.remove(&key);
    }
}
