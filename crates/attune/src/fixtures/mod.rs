//! Synthetic observation fixtures
//!
//! Deterministic event streams and a seeded domain catalog for exercising
//! the learner end-to-end: heavy and sparse domains, a learned domain that
//! appears mid-stream, and a keyword pushed past the noise ceiling. The
//! same inputs always produce the same state, so two independent runs can
//! be compared snapshot-for-snapshot.

pub mod catalog;
pub mod events;

pub use catalog::{DomainTerm, SEEDED_DOMAINS, SeededDomain, seed_catalog};
pub use events::{stream_1_to_50, stream_51_to_100, stream_101_to_200};

use crate::learner::{Learner, ObserveEvent};

/// A fresh learner with the full seeded catalog registered.
pub fn seeded_learner() -> Learner {
    let mut learner = Learner::new();
    seed_catalog(&mut learner);
    learner
}

/// Replay events into a learner, autotuning whenever the prompt index
/// lands on an interval boundary. An interval of 0 disables tuning.
pub fn replay(learner: &mut Learner, events: &[ObserveEvent], interval: u32) {
    for event in events {
        learner.observe(event);
        if interval > 0 && learner.prompt_count() % interval == 0 {
            learner.autotune();
        }
    }
}
