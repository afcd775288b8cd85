//! Observation ingest
//!
//! Applies one observation event to the mutable counters. There is no
//! failure surface: empty fields are legal no-ops and unseen domains are
//! created, not rejected.

use serde::{Deserialize, Serialize};

use crate::learner::dedup::cohit_key;
use crate::learner::state::{DomainMeta, Learner};

/// A single observation event from the exploration stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObserveEvent {
    pub prompt_index: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub keyword_terms: Vec<(String, String)>,
    #[serde(default)]
    pub term_domains: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_read: Option<FileRead>,
}

/// A file read observed alongside the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRead {
    pub file: String,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

impl Learner {
    /// Apply a single observation event to the learner state.
    ///
    /// Signal processing order:
    ///  1. keywords: keyword_hits += 1 each
    ///  2. terms: term_hits += 1 each
    ///  3. domains: upsert meta, hits += 1.0, total_hits += 1,
    ///     last_hit_at = prompt_index
    ///  4. keyword_terms: cohit_kw_term += 1, AND keyword_hits/term_hits
    ///     += 1 — the double counting relative to the plain lists is
    ///     intentional
    ///  5. term_domains: cohit_term_domain += 1 only (asymmetric with 4)
    ///  6. file_read: file_hits += 1
    ///  7. prompt_count = prompt_index
    ///
    /// Prompt indices are assumed non-decreasing; this is not enforced.
    pub fn observe(&mut self, event: &ObserveEvent) {
        let prompt = event.prompt_index;

        for kw in &event.keywords {
            bump(&mut self.state.keyword_hits, kw);
        }

        for term in &event.terms {
            bump(&mut self.state.term_hits, term);
        }

        for domain in &event.domains {
            let dm = self
                .state
                .domain_meta
                .entry(domain.clone())
                .or_insert_with(|| DomainMeta::learned(prompt));
            dm.hits += 1.0;
            dm.total_hits += 1;
            dm.last_hit_at = prompt;
        }

        for (kw, term) in &event.keyword_terms {
            bump(&mut self.state.cohit_kw_term, &cohit_key(kw, term));
            bump(&mut self.state.keyword_hits, kw);
            bump(&mut self.state.term_hits, term);
        }

        for (term, domain) in &event.term_domains {
            bump(&mut self.state.cohit_term_domain, &cohit_key(term, domain));
        }

        if let Some(file_read) = &event.file_read {
            bump(&mut self.state.file_hits, &file_read.file);
        }

        self.state.prompt_count = prompt;
    }
}

fn bump(map: &mut std::collections::BTreeMap<String, u32>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learner::state::{DomainSource, DomainState, SEED_EPOCH, Tier};
    use crate::testing::EventBuilder;

    #[test]
    fn keywords_and_terms_increment_counters() {
        let mut learner = Learner::new();
        let event = EventBuilder::new(1)
            .keywords(&["login", "login", "token"])
            .terms(&["session"])
            .build();
        learner.observe(&event);

        assert_eq!(learner.state().keyword_hits["login"], 2);
        assert_eq!(learner.state().keyword_hits["token"], 1);
        assert_eq!(learner.state().term_hits["session"], 1);
    }

    #[test]
    fn unseen_domain_is_created_as_learned_context_active() {
        let mut learner = Learner::new();
        let event = EventBuilder::new(7).domains(&["@monitoring"]).build();
        learner.observe(&event);

        let dm = &learner.state().domain_meta["@monitoring"];
        assert_eq!(dm.hits, 1.0);
        assert_eq!(dm.total_hits, 1);
        assert_eq!(dm.tier, Tier::Context);
        assert_eq!(dm.source, DomainSource::Learned);
        assert_eq!(dm.state, DomainState::Active);
        assert_eq!(dm.last_hit_at, 7);
        assert_eq!(dm.created_at, SEED_EPOCH + 7);
    }

    #[test]
    fn seeded_domain_accumulates_without_reset() {
        let mut learner = Learner::new();
        learner.seed_domain("@auth", Tier::Core, SEED_EPOCH);
        learner.observe(&EventBuilder::new(1).domains(&["@auth"]).build());
        learner.observe(&EventBuilder::new(2).domains(&["@auth"]).build());

        let dm = &learner.state().domain_meta["@auth"];
        assert_eq!(dm.hits, 2.0);
        assert_eq!(dm.total_hits, 2);
        assert_eq!(dm.tier, Tier::Core);
        assert_eq!(dm.source, DomainSource::Seeded);
        assert_eq!(dm.last_hit_at, 2);
    }

    #[test]
    fn keyword_terms_double_count_keywords_and_terms() {
        // A keyword appearing both in the plain list and in a pair is
        // counted twice; the pair also feeds the co-occurrence map.
        let mut learner = Learner::new();
        let event = EventBuilder::new(1)
            .keywords(&["login"])
            .terms(&["auth"])
            .keyword_term("login", "auth")
            .build();
        learner.observe(&event);

        assert_eq!(learner.state().keyword_hits["login"], 2);
        assert_eq!(learner.state().term_hits["auth"], 2);
        assert_eq!(learner.state().cohit_kw_term["login:auth"], 1);
    }

    #[test]
    fn term_domains_touch_only_the_cohit_map() {
        let mut learner = Learner::new();
        let event = EventBuilder::new(1).term_domain("auth", "@auth").build();
        learner.observe(&event);

        assert_eq!(learner.state().cohit_term_domain["auth:@auth"], 1);
        assert!(learner.state().term_hits.is_empty());
        assert!(learner.state().domain_meta.is_empty());
    }

    #[test]
    fn file_read_increments_file_hits() {
        let mut learner = Learner::new();
        let event = EventBuilder::new(1).file_read("src/auth/session.rs").build();
        learner.observe(&event);
        learner.observe(&EventBuilder::new(2).file_read("src/auth/session.rs").build());

        assert_eq!(learner.state().file_hits["src/auth/session.rs"], 2);
    }

    #[test]
    fn empty_event_only_advances_prompt_count() {
        let mut learner = Learner::new();
        learner.observe(&EventBuilder::new(9).build());

        assert_eq!(learner.prompt_count(), 9);
        assert!(learner.state().keyword_hits.is_empty());
        assert!(learner.state().file_hits.is_empty());
    }

    #[test]
    fn prompt_count_tracks_latest_event() {
        let mut learner = Learner::new();
        learner.observe(&EventBuilder::new(3).build());
        learner.observe(&EventBuilder::new(50).build());
        assert_eq!(learner.prompt_count(), 50);
    }

    #[test]
    fn event_deserializes_from_wire_shape() {
        let json = r#"{
            "prompt_index": 12,
            "keywords": ["login"],
            "terms": ["auth"],
            "domains": ["@authentication"],
            "keyword_terms": [["login", "auth"]],
            "term_domains": [["auth", "@authentication"]],
            "file_read": {"file": "services/auth/handler.py", "offset": 60, "limit": 30}
        }"#;
        let event: ObserveEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.prompt_index, 12);
        assert_eq!(event.keyword_terms[0].0, "login");
        assert_eq!(event.file_read.as_ref().unwrap().offset, 60);

        // Sparse events need only the prompt index.
        let sparse: ObserveEvent = serde_json::from_str(r#"{"prompt_index": 1}"#).unwrap();
        assert!(sparse.keywords.is_empty());
        assert!(sparse.file_read.is_none());
    }
}
