//! Learner state aggregate and domain metadata
//!
//! All hit counters use `u32` counts decayed by `trunc(count * 0.90)`,
//! truncating toward zero. The one exception is [`DomainMeta::hits`], which
//! is `f64` and decays without truncation so low-activity domains keep a
//! long fractional memory.
//!
//! Every map is a `BTreeMap` (and the blocklist a `BTreeSet`): iteration and
//! serialization order are deterministic, so identical event sequences
//! produce byte-identical snapshots.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{AttuneError, Result};

/// Per-cycle exponential decay rate for every hit counter.
pub const DECAY_RATE: f64 = 0.90;

/// Domains ranked below the core cut with decayed hits under this floor are
/// removed outright.
pub const PRUNE_FLOOR: f64 = 0.3;

/// Combined co-occurrence evidence required before dedup collapses an
/// entity to its single strongest container.
pub const DEDUP_MIN_TOTAL: u32 = 100;

/// Number of top-ranked domains held in the core tier.
pub const CORE_DOMAINS_MAX: usize = 24;

/// Reserved: overflow context-tier cap, unused by the current algorithm.
pub const CONTEXT_DOMAINS_MAX: usize = 20;

/// Reserved: staged-promotion cohit ratio, unused by the current algorithm.
pub const PROMOTION_MIN_RATIO: f64 = 0.5;

/// Reserved: staged-promotion observation minimum, unused by the current
/// algorithm.
pub const MIN_PROMOTION_OBS: u32 = 3;

/// Keyword hit ceiling; counts strictly above this are blocklisted.
pub const NOISE_THRESHOLD: u32 = 1000;

/// Reserved: keyword preservation floor, unused by the current algorithm.
pub const PRESERVE_THRESHOLD: u32 = 5;

/// Deprecated seeded domains are only deleted once this many learned
/// domains exist.
pub const SEEDED_REMOVAL_MIN_LEARNED: usize = 32;

/// Fixed creation timestamp for seeded domains. Learned domains are stamped
/// `SEED_EPOCH + prompt_index` so their origin is recoverable.
pub const SEED_EPOCH: i64 = 1_739_500_000;

/// Core (always-surfaced) vs context (overflow) domain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Core,
    Context,
}

/// How a domain entered the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainSource {
    /// Pre-configured at state creation
    Seeded,
    /// Created implicitly on first sighting
    Learned,
}

/// Domain lifecycle state. Transitions are driven once per autotune cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainState {
    Active,
    Stale,
    Deprecated,
}

/// Per-domain metadata and lifecycle state.
///
/// `hits` is the decayed accumulator (float, never truncated).
/// `total_hits` is a lifetime counter and never decreases.
/// `hits_last_cycle` is the pre-decay snapshot from the previous cycle and
/// feeds the next cycle's stale/reactivation checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainMeta {
    pub hits: f64,
    pub total_hits: u32,
    pub tier: Tier,
    pub source: DomainSource,
    pub state: DomainState,
    pub stale_cycles: u32,
    pub hits_last_cycle: f64,
    pub last_hit_at: u32,
    pub created_at: i64,
}

impl DomainMeta {
    /// Metadata for a domain sighted for the first time in the event stream.
    pub fn learned(prompt_index: u32) -> Self {
        Self {
            hits: 0.0,
            total_hits: 0,
            tier: Tier::Context,
            source: DomainSource::Learned,
            state: DomainState::Active,
            stale_cycles: 0,
            hits_last_cycle: 0.0,
            last_hit_at: 0,
            created_at: SEED_EPOCH + i64::from(prompt_index),
        }
    }

    /// Metadata for a pre-configured domain.
    pub fn seeded(tier: Tier, created_at: i64) -> Self {
        Self {
            hits: 0.0,
            total_hits: 0,
            tier,
            source: DomainSource::Seeded,
            state: DomainState::Active,
            stale_cycles: 0,
            hits_last_cycle: 0.0,
            last_hit_at: 0,
            created_at,
        }
    }
}

/// Complete learner state for one project.
///
/// Missing maps default to empty on deserialization so snapshots written by
/// older versions load cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerState {
    #[serde(default)]
    pub keyword_hits: BTreeMap<String, u32>,
    #[serde(default)]
    pub term_hits: BTreeMap<String, u32>,
    #[serde(default)]
    pub domain_meta: BTreeMap<String, DomainMeta>,
    #[serde(default)]
    pub cohit_kw_term: BTreeMap<String, u32>,
    #[serde(default)]
    pub cohit_term_domain: BTreeMap<String, u32>,
    #[serde(default)]
    pub bigrams: BTreeMap<String, u32>,
    #[serde(default)]
    pub file_hits: BTreeMap<String, u32>,
    #[serde(default)]
    pub keyword_blocklist: BTreeSet<String>,
    #[serde(default)]
    pub prompt_count: u32,
}

/// Manages all domain learning state in-memory.
///
/// Not safe for concurrent use; the caller serializes access. Observation
/// ingest and autotune cycles execute strictly sequentially, and no
/// observation may land mid-cycle.
#[derive(Debug, Default)]
pub struct Learner {
    pub(crate) state: LearnerState,
    /// Bigram staging counts, not persisted. Resets on restart; acceptable
    /// because the promotion threshold is a noise filter, not critical data.
    pub(crate) staging: BTreeMap<String, u32>,
}

impl Learner {
    /// Create a fresh learner with all maps empty and zero counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a learner from an existing state (e.g. loaded from disk).
    pub fn from_state(state: LearnerState) -> Self {
        Self {
            state,
            staging: BTreeMap::new(),
        }
    }

    /// Create a learner from a JSON-encoded state snapshot.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let state: LearnerState = serde_json::from_slice(data)
            .map_err(|e| AttuneError::State(format!("failed to decode snapshot: {e}")))?;
        Ok(Self::from_state(state))
    }

    /// The underlying state, for persistence or inspection.
    pub fn state(&self) -> &LearnerState {
        &self.state
    }

    /// Consume the learner, returning its state.
    pub fn into_state(self) -> LearnerState {
        self.state
    }

    /// Latest ingested prompt index.
    pub fn prompt_count(&self) -> u32 {
        self.state.prompt_count
    }

    /// Register a pre-configured domain with the given tier.
    ///
    /// An already-present domain is left untouched.
    pub fn seed_domain(&mut self, name: &str, tier: Tier, created_at: i64) {
        self.state
            .domain_meta
            .entry(name.to_string())
            .or_insert_with(|| DomainMeta::seeded(tier, created_at));
    }

    /// Serialize the state to pretty JSON with output floats normalized.
    ///
    /// Rounding applies only to the serialized copy, never to live state.
    pub fn snapshot(&self) -> Result<String> {
        crate::snapshot::to_json(&self.state)
    }
}
