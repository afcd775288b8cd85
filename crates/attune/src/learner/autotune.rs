//! Autotune pipeline
//!
//! One cycle runs the phases below in strict order over accumulated state.
//! Each phase sees the results of the phases before it within the same
//! cycle, so the ordering is load-bearing:
//!
//!  1. lifecycle transitions (stale flagging, deprecation, reactivation,
//!     seeded-deprecated removal, cycle snapshot)
//!  2. domain-hit decay (float)
//!  3. co-occurrence dedup, both maps (on un-decayed counts)
//!  4. domain ranking: promotion / prune / demotion
//!  5. bigram decay
//!  6. file-hit decay
//!  7. co-occurrence decay, both maps
//!  8. keyword blocklist scan
//!  9. keyword-hit decay
//! 10. term-hit decay

use crate::learner::state::{
    CORE_DOMAINS_MAX, DomainSource, DomainState, Learner, LearnerState, NOISE_THRESHOLD,
    PRUNE_FLOOR, SEEDED_REMOVAL_MIN_LEARNED, Tier,
};
use crate::learner::{decay, dedup};

/// Summary of what one autotune cycle changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutotuneReport {
    /// Domains promoted context -> core
    pub promoted: usize,
    /// Domains demoted core -> context
    pub demoted: usize,
    /// Domains whose hits were decayed
    pub decayed: usize,
    /// Domains removed below the prune floor
    pub pruned: usize,
}

impl Learner {
    /// Run one full autotune cycle.
    ///
    /// Must run to completion atomically with respect to ingest: the
    /// intermediate states (decayed but not yet ranked, flagged but not
    /// yet snapshotted) are not valid resting states.
    pub fn autotune(&mut self) -> AutotuneReport {
        let state = &mut self.state;
        let mut report = AutotuneReport::default();

        flag_stale_domains(state);
        deprecate_persistent_stale(state);
        reactivate_domains(state);
        remove_deprecated_seeded(state);
        snapshot_cycle_hits(state);

        report.decayed = decay::decay_domain_hits(&mut state.domain_meta);

        dedup::dedup_cohits(&mut state.cohit_kw_term);
        dedup::dedup_cohits(&mut state.cohit_term_domain);

        let (promoted, demoted, pruned) = curate_tiers(state);
        report.promoted = promoted;
        report.demoted = demoted;
        report.pruned = pruned;

        decay::decay_counters(&mut state.bigrams);
        decay::decay_counters(&mut state.file_hits);
        decay::decay_counters(&mut state.cohit_kw_term);
        decay::decay_counters(&mut state.cohit_term_domain);

        blocklist_noisy_keywords(state);
        decay::decay_counters(&mut state.keyword_hits);
        decay::decay_counters(&mut state.term_hits);

        tracing::debug!(
            prompt = state.prompt_count,
            promoted = report.promoted,
            demoted = report.demoted,
            decayed = report.decayed,
            pruned = report.pruned,
            "autotune cycle complete"
        );
        report
    }
}

/// Any domain that saw no hits last cycle and is active or stale becomes
/// (or stays) stale, accruing a stale cycle.
fn flag_stale_domains(state: &mut LearnerState) {
    for dm in state.domain_meta.values_mut() {
        if dm.hits_last_cycle == 0.0
            && matches!(dm.state, DomainState::Active | DomainState::Stale)
        {
            dm.state = DomainState::Stale;
            dm.stale_cycles += 1;
        }
    }
}

/// Stale for 2+ consecutive cycles -> deprecated.
fn deprecate_persistent_stale(state: &mut LearnerState) {
    for dm in state.domain_meta.values_mut() {
        if dm.state == DomainState::Stale && dm.stale_cycles >= 2 {
            dm.state = DomainState::Deprecated;
        }
    }
}

/// Any non-active domain that saw hits last cycle returns to active.
///
/// Runs after deprecation, so reactivation overrides a deprecation issued
/// earlier in the same cycle.
fn reactivate_domains(state: &mut LearnerState) {
    for dm in state.domain_meta.values_mut() {
        if dm.hits_last_cycle > 0.0 && dm.state != DomainState::Active {
            dm.state = DomainState::Active;
            dm.stale_cycles = 0;
        }
    }
}

/// Once enough learned domains exist, deprecated seeded domains are deleted
/// outright. Irrecoverable.
fn remove_deprecated_seeded(state: &mut LearnerState) {
    let learned = state
        .domain_meta
        .values()
        .filter(|dm| dm.source == DomainSource::Learned)
        .count();
    if learned < SEEDED_REMOVAL_MIN_LEARNED {
        return;
    }
    state.domain_meta.retain(|name, dm| {
        let drop = dm.state == DomainState::Deprecated && dm.source == DomainSource::Seeded;
        if drop {
            tracing::debug!(domain = %name, "removing deprecated seeded domain");
        }
        !drop
    });
}

/// Record each domain's pre-decay hits for next cycle's stale and
/// reactivation checks.
fn snapshot_cycle_hits(state: &mut LearnerState) {
    for dm in state.domain_meta.values_mut() {
        dm.hits_last_cycle = dm.hits;
    }
}

/// Rank non-deprecated domains by decayed hits descending (ties by name
/// ascending) and apply tier rules in a single pass: promotion inside the
/// core cut, prune-or-demote below it. The two branches are mutually
/// exclusive for a given domain within one cycle.
fn curate_tiers(state: &mut LearnerState) -> (usize, usize, usize) {
    let mut ranked: Vec<(String, f64)> = state
        .domain_meta
        .iter()
        .filter(|(_, dm)| dm.state != DomainState::Deprecated)
        .map(|(name, dm)| (name.clone(), dm.hits))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let (mut promoted, mut demoted, mut pruned) = (0, 0, 0);
    for (rank, (name, hits)) in ranked.iter().enumerate() {
        if rank < CORE_DOMAINS_MAX {
            if let Some(dm) = state.domain_meta.get_mut(name) {
                if dm.tier == Tier::Context {
                    dm.tier = Tier::Core;
                    promoted += 1;
                }
            }
        } else if *hits < PRUNE_FLOOR {
            if state.domain_meta.remove(name).is_some() {
                tracing::debug!(domain = %name, hits, "pruning domain below floor");
                pruned += 1;
            }
        } else if let Some(dm) = state.domain_meta.get_mut(name) {
            if dm.tier == Tier::Core {
                dm.tier = Tier::Context;
                demoted += 1;
            }
        }
    }
    (promoted, demoted, pruned)
}

/// Keywords with counts strictly above the noise ceiling move to the
/// permanent blocklist and leave the hit map, ahead of keyword decay.
fn blocklist_noisy_keywords(state: &mut LearnerState) {
    let noisy: Vec<String> = state
        .keyword_hits
        .iter()
        .filter(|(_, count)| **count > NOISE_THRESHOLD)
        .map(|(kw, _)| kw.clone())
        .collect();
    for kw in noisy {
        tracing::debug!(keyword = %kw, "blocklisting noisy keyword");
        state.keyword_hits.remove(&kw);
        state.keyword_blocklist.insert(kw);
    }
}
