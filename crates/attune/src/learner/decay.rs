//! Decay engine
//!
//! Two deliberately distinct numeric regimes: domain hits decay as floats
//! with no truncation (long memory through fractional hits), while every
//! other counter decays as `trunc(count * rate)` with entries deleted at
//! zero — the dominant removal mechanism for low-activity keys.

use std::collections::BTreeMap;

use crate::learner::state::{DECAY_RATE, DomainMeta};

/// Apply truncated integer decay to a counter map.
///
/// `new = trunc(count * 0.90)` toward zero; entries reaching 0 are deleted.
pub(crate) fn decay_counters(map: &mut BTreeMap<String, u32>) {
    map.retain(|_, count| {
        let next = (f64::from(*count) * DECAY_RATE).trunc() as u32;
        *count = next;
        next > 0
    });
}

/// Apply float decay to all domain hit accumulators.
///
/// Returns the number of domains decayed.
pub(crate) fn decay_domain_hits(domains: &mut BTreeMap<String, DomainMeta>) -> usize {
    for dm in domains.values_mut() {
        dm.hits *= DECAY_RATE;
    }
    domains.len()
}
