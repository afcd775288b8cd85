//! Domain learning state and the autotune pipeline
//!
//! The [`Learner`] owns one exclusively-held [`LearnerState`] aggregate.
//! Observation events mutate counters as they arrive; the driver runs
//! [`Learner::autotune`] at cycle boundaries, which executes the phase
//! sequence in fixed order over the accumulated state.

pub mod autotune;
pub mod bigrams;
pub mod decay;
pub mod dedup;
pub mod observe;
pub mod state;

pub use autotune::AutotuneReport;
pub use bigrams::{BIGRAM_THRESHOLD, extract_bigrams};
pub use observe::{FileRead, ObserveEvent};
pub use state::{
    CONTEXT_DOMAINS_MAX, CORE_DOMAINS_MAX, DECAY_RATE, DEDUP_MIN_TOTAL, DomainMeta, DomainSource,
    DomainState, Learner, LearnerState, MIN_PROMOTION_OBS, NOISE_THRESHOLD, PRESERVE_THRESHOLD,
    PROMOTION_MIN_RATIO, PRUNE_FLOOR, SEED_EPOCH, SEEDED_REMOVAL_MIN_LEARNED, Tier,
};
