//! End-to-end replay tests over the synthetic fixture streams

use attune::fixtures::{replay, seeded_learner, stream_1_to_50, stream_51_to_100, stream_101_to_200};
use attune::learner::{DomainState, Tier};

#[test]
fn first_batch_ranks_heavy_domains_highest() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);

    let domains = &learner.state().domain_meta;
    let auth = &domains["@authentication"];
    let api = &domains["@api"];

    // 30 auth and 25 api events dominate the batch.
    assert_eq!(auth.hits, 30.0 * 0.9);
    assert_eq!(api.hits, 25.0 * 0.9);
    for (name, dm) in domains {
        if name != "@authentication" {
            assert!(auth.hits >= dm.hits, "{name} outranks @authentication");
        }
        if name != "@authentication" && name != "@api" {
            assert!(api.hits >= dm.hits, "{name} outranks @api");
        }
    }

    // Fewer domains than the core cut: every seeded domain ends up core.
    for (name, dm) in domains {
        assert_eq!(dm.tier, Tier::Core, "{name} should be core");
    }

    // The untouched domain is stale after one idle cycle.
    let deployment = &domains["@deployment"];
    assert_eq!(deployment.state, DomainState::Stale);
    assert_eq!(deployment.stale_cycles, 1);
    assert_eq!(deployment.total_hits, 0);
}

#[test]
fn monitoring_is_learned_mid_stream_and_promoted() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);
    assert!(!learner.state().domain_meta.contains_key("@monitoring"));

    replay(&mut learner, &stream_51_to_100(), 50);
    let monitoring = &learner.state().domain_meta["@monitoring"];
    assert_eq!(monitoring.tier, Tier::Core);
    assert!(monitoring.total_hits > 0);
}

#[test]
fn full_replay_blocklists_the_hammered_keyword() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);
    replay(&mut learner, &stream_51_to_100(), 50);
    assert!(!learner.state().keyword_blocklist.contains("test"));

    replay(&mut learner, &stream_101_to_200(), 50);
    assert!(learner.state().keyword_blocklist.contains("test"));
}

#[test]
fn full_replay_keeps_the_idle_domain_deprecated() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);
    replay(&mut learner, &stream_51_to_100(), 50);
    replay(&mut learner, &stream_101_to_200(), 50);

    let deployment = &learner.state().domain_meta["@deployment"];
    assert_eq!(deployment.state, DomainState::Deprecated);
    // One learned domain is nowhere near the seeded-removal threshold,
    // so the record itself survives.
    assert_eq!(deployment.total_hits, 0);
}

#[test]
fn total_hits_accumulates_across_the_whole_run() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);
    let after_50 = learner.state().domain_meta["@authentication"].total_hits;
    assert_eq!(after_50, 30);

    replay(&mut learner, &stream_51_to_100(), 50);
    let after_100 = learner.state().domain_meta["@authentication"].total_hits;
    assert_eq!(after_100, 58); // 28 more auth events in 51-100
}

#[test]
fn idle_cycles_after_replay_only_shrink_counters() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 50);
    let before = learner.state().clone();

    learner.autotune();
    let after = learner.state();

    for (kw, count) in &after.keyword_hits {
        assert!(count <= &before.keyword_hits[kw], "{kw} grew");
    }
    for (name, dm) in &after.domain_meta {
        assert!(dm.hits < before.domain_meta[name].hits || dm.hits == 0.0);
        assert_eq!(dm.total_hits, before.domain_meta[name].total_hits);
    }
    assert_eq!(after.prompt_count, before.prompt_count);
}

#[test]
fn cohit_maps_shrink_under_decay_and_dedup() {
    let mut learner = seeded_learner();
    replay(&mut learner, &stream_1_to_50(), 0);
    let untuned = learner.state().cohit_kw_term.len();
    assert!(untuned > 0);

    let mut tuned = seeded_learner();
    replay(&mut tuned, &stream_1_to_50(), 50);
    assert!(tuned.state().cohit_kw_term.len() <= untuned);
    for count in tuned.state().cohit_kw_term.values() {
        assert!(*count > 0);
    }
}
