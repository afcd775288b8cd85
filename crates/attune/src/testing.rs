//! Test utilities shared across attune's unit and integration tests.

use crate::learner::state::{DomainMeta, SEED_EPOCH, Tier};
use crate::learner::{FileRead, ObserveEvent};

/// Fluent builder for observation events in tests.
#[derive(Debug, Default)]
pub struct EventBuilder {
    event: ObserveEvent,
}

impl EventBuilder {
    pub fn new(prompt_index: u32) -> Self {
        Self {
            event: ObserveEvent {
                prompt_index,
                ..ObserveEvent::default()
            },
        }
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.event
            .keywords
            .extend(keywords.iter().map(|s| s.to_string()));
        self
    }

    pub fn terms(mut self, terms: &[&str]) -> Self {
        self.event.terms.extend(terms.iter().map(|s| s.to_string()));
        self
    }

    pub fn domains(mut self, domains: &[&str]) -> Self {
        self.event
            .domains
            .extend(domains.iter().map(|s| s.to_string()));
        self
    }

    pub fn keyword_term(mut self, keyword: &str, term: &str) -> Self {
        self.event
            .keyword_terms
            .push((keyword.to_string(), term.to_string()));
        self
    }

    pub fn term_domain(mut self, term: &str, domain: &str) -> Self {
        self.event
            .term_domains
            .push((term.to_string(), domain.to_string()));
        self
    }

    pub fn file_read(mut self, file: &str) -> Self {
        self.event.file_read = Some(FileRead {
            file: file.to_string(),
            offset: 0,
            limit: 0,
        });
        self
    }

    pub fn build(self) -> ObserveEvent {
        self.event
    }
}

/// A seeded, active, core-tier domain with the given hits and a matching
/// last-cycle snapshot so it dodges stale detection.
pub fn active_domain(hits: f64) -> DomainMeta {
    let mut dm = DomainMeta::seeded(Tier::Core, SEED_EPOCH);
    dm.hits = hits;
    dm.hits_last_cycle = hits;
    dm
}
