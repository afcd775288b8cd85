//! Deterministic event streams
//!
//! Three stream phases with deliberately uneven domain distribution:
//!
//! - 1-50: heavy auth/api, medium db/test, sparse logging/caching, zero
//!   deployment (exercises stale flagging on the untouched domain).
//! - 51-100: same shape; the learned `@monitoring` domain appears at
//!   prompt 70.
//! - 101-200: logging goes silent, monitoring gains traction, and every
//!   event hammers the `test` keyword ten times so it crosses the noise
//!   ceiling and lands on the blocklist.

use crate::learner::{FileRead, ObserveEvent};

/// Files referenced by the streams' read signals.
pub const FIXTURE_FILES: &[&str] = &[
    "services/auth/handler.py",
    "services/auth/session.py",
    "services/auth/token.py",
    "services/api/routes.py",
    "services/api/middleware.py",
    "services/db/models.py",
    "services/db/queries.py",
    "tests/test_auth.py",
    "tests/test_api.py",
    "services/cache/store.py",
    "services/logging/logger.py",
    "services/monitoring/metrics.py",
];

const P1_AUTH: &[u32] = &[
    1, 2, 3, 5, 6, 8, 9, 10, 11, 13, 16, 17, 18, 20, 24, 25, 26, 28, 32, 33, 34, 36, 40, 41, 42,
    44, 46, 48, 49, 50,
];
const P1_API: &[u32] = &[
    2, 3, 4, 6, 10, 11, 12, 14, 18, 19, 22, 26, 27, 29, 30, 34, 35, 37, 38, 42, 43, 45, 47, 48,
    50,
];
const P1_DB: &[u32] = &[3, 7, 11, 13, 15, 17, 19, 21, 23, 27, 31, 35, 39, 43, 47];
const P1_TEST: &[u32] = &[4, 8, 9, 14, 16, 20, 24, 25, 30, 36, 41, 46];
const P1_LOG: &[u32] = &[10, 30, 50];
const P1_CACHE: &[u32] = &[15, 45];

const P2_AUTH: &[u32] = &[
    51, 52, 53, 55, 58, 59, 60, 62, 65, 66, 67, 69, 72, 73, 75, 78, 79, 80, 82, 85, 86, 88, 91,
    92, 94, 97, 98, 100,
];
const P2_API: &[u32] = &[
    52, 53, 54, 56, 60, 61, 63, 64, 68, 69, 71, 74, 76, 77, 81, 83, 84, 87, 89, 93, 95, 96, 99,
];
const P2_DB: &[u32] = &[53, 57, 61, 63, 65, 67, 69, 73, 77, 81, 85, 89, 93, 97];
const P2_TEST: &[u32] = &[54, 58, 59, 64, 66, 70, 74, 75, 80, 86, 91, 96];
const P2_LOG: &[u32] = &[60, 90];
const P2_CACHE: &[u32] = &[65, 95];
const P2_MONITORING: &[u32] = &[70, 72, 75, 78, 82, 85, 88, 92, 95, 98];

/// Events 1-50.
pub fn stream_1_to_50() -> Vec<ObserveEvent> {
    (1..=50).map(early_event).collect()
}

/// Events 51-100.
pub fn stream_51_to_100() -> Vec<ObserveEvent> {
    (51..=100).map(steady_event).collect()
}

/// Events 101-200.
pub fn stream_101_to_200() -> Vec<ObserveEvent> {
    (101..=200).map(saturation_event).collect()
}

fn early_event(i: u32) -> ObserveEvent {
    let mut ev = base_event(i);
    let mut file: Option<&str> = None;

    if P1_AUTH.contains(&i) {
        push_auth(&mut ev, i, true);
        file = Some(auth_file(i));
    }
    if P1_API.contains(&i) {
        push_api(&mut ev, i, true);
        file.get_or_insert(pick(i, 3, 4));
    }
    if P1_DB.contains(&i) {
        push_db(&mut ev, i, true);
        file.get_or_insert(pick(i, 5, 6));
    }
    if P1_TEST.contains(&i) {
        push_testing(&mut ev, i);
        file.get_or_insert(pick(i, 7, 8));
    }
    if P1_LOG.contains(&i) {
        push_logging(&mut ev);
        file.get_or_insert(FIXTURE_FILES[10]);
    }
    if P1_CACHE.contains(&i) {
        push_caching(&mut ev, &["cache", "redis"]);
        file.get_or_insert(FIXTURE_FILES[9]);
    }

    finish_event(ev, i, file)
}

fn steady_event(i: u32) -> ObserveEvent {
    let mut ev = base_event(i);
    let mut file: Option<&str> = None;

    if P2_AUTH.contains(&i) {
        push_auth(&mut ev, i, true);
        file = Some(auth_file(i));
    }
    if P2_API.contains(&i) {
        push_api(&mut ev, i, true);
        file.get_or_insert(pick(i, 3, 4));
    }
    if P2_DB.contains(&i) {
        push_db(&mut ev, i, true);
        file.get_or_insert(pick(i, 5, 6));
    }
    if P2_TEST.contains(&i) {
        push_testing(&mut ev, i);
        file.get_or_insert(pick(i, 7, 8));
    }
    if P2_LOG.contains(&i) {
        push_logging(&mut ev);
        file.get_or_insert(FIXTURE_FILES[10]);
    }
    if P2_CACHE.contains(&i) {
        push_caching(&mut ev, &["cache"]);
        file.get_or_insert(FIXTURE_FILES[9]);
    }
    if P2_MONITORING.contains(&i) {
        push_monitoring(&mut ev, i, "gauge");
        file.get_or_insert(FIXTURE_FILES[11]);
    }

    finish_event(ev, i, file)
}

fn saturation_event(i: u32) -> ObserveEvent {
    let mut ev = base_event(i);
    let mut file: Option<&str> = None;

    if (i - 101) % 3 == 0 || (i >= 102 && (i - 102) % 7 == 0) {
        push_auth(&mut ev, i, false);
        file = Some(auth_file(i));
    }
    if (i - 101) % 4 == 0 || (i >= 103 && (i - 103) % 7 == 0) {
        push_api(&mut ev, i, false);
        file.get_or_insert(pick(i, 3, 4));
    }
    if (i >= 105 && (i - 105) % 7 == 0) || (i >= 103 && (i - 103) % 13 == 0) {
        push_db(&mut ev, i, false);
        file.get_or_insert(pick(i, 5, 6));
    }

    // Every event hammers "test" ten times to push it past the noise
    // ceiling; ingest double counting via keyword_terms doubles the rate.
    for _ in 0..10 {
        ev.keywords.push("test".to_string());
        ev.keyword_terms.push(("test".to_string(), "test".to_string()));
    }
    ev.terms.push("test".to_string());
    ev.domains.push("@testing".to_string());
    ev.term_domains
        .push(("test".to_string(), "@testing".to_string()));
    file.get_or_insert(pick(i, 7, 8));

    if (i - 101) % 7 == 0 || (i >= 104 && (i - 104) % 11 == 0) {
        push_monitoring(&mut ev, i, "counter");
        file.get_or_insert(FIXTURE_FILES[11]);
    }

    finish_event(ev, i, file)
}

fn base_event(prompt_index: u32) -> ObserveEvent {
    ObserveEvent {
        prompt_index,
        ..ObserveEvent::default()
    }
}

fn finish_event(mut ev: ObserveEvent, i: u32, file: Option<&str>) -> ObserveEvent {
    ev.file_read = Some(FileRead {
        file: file.unwrap_or(FIXTURE_FILES[0]).to_string(),
        offset: i * 5,
        limit: 30,
    });
    ev
}

fn pick(i: u32, even: usize, odd: usize) -> &'static str {
    if i % 2 == 0 {
        FIXTURE_FILES[even]
    } else {
        FIXTURE_FILES[odd]
    }
}

fn auth_file(i: u32) -> &'static str {
    FIXTURE_FILES[(i % 3) as usize]
}

/// Append one signal group: keywords with their term pairs, the leading
/// term, the domain, and the term/domain pair.
fn push_signal(
    ev: &mut ObserveEvent,
    keywords: &[&str],
    term: &str,
    domain: &str,
    term_of: fn(&str) -> &'static str,
) {
    for kw in keywords {
        ev.keywords.push(kw.to_string());
        ev.keyword_terms.push((kw.to_string(), term_of(kw).to_string()));
    }
    ev.terms.push(term.to_string());
    ev.domains.push(domain.to_string());
    ev.term_domains.push((term.to_string(), domain.to_string()));
}

fn push_auth(ev: &mut ObserveEvent, i: u32, with_jwt: bool) {
    let (kws, term): (&[&str], &str) = if i % 3 == 0 {
        (&["login", "session"], "login")
    } else if i % 2 == 0 {
        (&["login"], "login")
    } else if with_jwt {
        (&["token", "jwt"], "token")
    } else {
        (&["token"], "token")
    };
    push_signal(ev, kws, term, "@authentication", auth_term);
}

fn push_api(ev: &mut ObserveEvent, i: u32, with_route: bool) {
    let (kws, term): (&[&str], &str) = if i % 4 == 0 {
        (&["handler", "middleware"], "handler")
    } else if with_route && i % 3 == 0 {
        (&["route"], "route")
    } else {
        (&["endpoint"], "endpoint")
    };
    push_signal(ev, kws, term, "@api", api_term);
}

fn push_db(ev: &mut ObserveEvent, i: u32, with_select: bool) {
    let (kws, term): (&[&str], &str) = if with_select {
        if i % 5 == 0 {
            (&["query", "select"], "query")
        } else {
            (&["model"], "model")
        }
    } else if i % 2 == 0 {
        (&["query"], "query")
    } else {
        (&["model"], "model")
    };
    push_signal(ev, kws, term, "@database", db_term);
}

fn push_testing(ev: &mut ObserveEvent, i: u32) {
    let kws: &[&str] = if i % 5 == 0 {
        &["test", "assert"]
    } else if i % 3 == 0 {
        &["test", "mock"]
    } else {
        &["test"]
    };
    push_signal(ev, kws, "test", "@testing", testing_term);
}

fn push_logging(ev: &mut ObserveEvent) {
    push_signal(ev, &["logger"], "logger", "@logging", |_| "logger");
}

fn push_caching(ev: &mut ObserveEvent, kws: &[&str]) {
    push_signal(ev, kws, "cache", "@caching", |_| "cache");
}

fn push_monitoring(ev: &mut ObserveEvent, i: u32, second: &'static str) {
    let metric_pair = ["metric", second];
    let (kws, term): (&[&str], &str) = if i % 3 == 0 {
        (&metric_pair, "metric")
    } else if i % 5 == 0 {
        (&["alert"], "alert")
    } else {
        (&["metric"], "metric")
    };
    push_signal(ev, kws, term, "@monitoring", monitoring_term);
}

fn auth_term(kw: &str) -> &'static str {
    match kw {
        "login" | "signin" | "credentials" => "login",
        "session" | "cookie" | "jwt" => "session",
        _ => "token",
    }
}

fn api_term(kw: &str) -> &'static str {
    match kw {
        "handler" | "controller" | "middleware" => "handler",
        "route" | "router" => "route",
        _ => "endpoint",
    }
}

fn db_term(kw: &str) -> &'static str {
    match kw {
        "query" | "select" | "insert" => "query",
        _ => "model",
    }
}

fn testing_term(kw: &str) -> &'static str {
    match kw {
        "test" | "spec" | "suite" => "test",
        "mock" | "stub" => "mock",
        _ => "assert",
    }
}

fn monitoring_term(kw: &str) -> &'static str {
    match kw {
        "metric" | "gauge" | "counter" | "histogram" => "metric",
        _ => "alert",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_lengths_and_indices() {
        let one = stream_1_to_50();
        let two = stream_51_to_100();
        let three = stream_101_to_200();
        assert_eq!(one.len(), 50);
        assert_eq!(two.len(), 50);
        assert_eq!(three.len(), 100);
        assert_eq!(one[0].prompt_index, 1);
        assert_eq!(two[0].prompt_index, 51);
        assert_eq!(three[99].prompt_index, 200);
    }

    #[test]
    fn streams_are_deterministic() {
        let a = serde_json::to_string(&stream_1_to_50()).unwrap();
        let b = serde_json::to_string(&stream_1_to_50()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deployment_never_appears() {
        for ev in stream_1_to_50()
            .iter()
            .chain(stream_51_to_100().iter())
            .chain(stream_101_to_200().iter())
        {
            assert!(!ev.domains.iter().any(|d| d == "@deployment"));
        }
    }

    #[test]
    fn monitoring_first_appears_at_prompt_70() {
        let first = stream_51_to_100()
            .iter()
            .find(|ev| ev.domains.iter().any(|d| d == "@monitoring"))
            .map(|ev| ev.prompt_index);
        assert_eq!(first, Some(70));

        assert!(
            stream_1_to_50()
                .iter()
                .all(|ev| !ev.domains.iter().any(|d| d == "@monitoring"))
        );
    }

    #[test]
    fn logging_goes_silent_after_prompt_100() {
        assert!(
            stream_101_to_200()
                .iter()
                .all(|ev| !ev.domains.iter().any(|d| d == "@logging"))
        );
    }

    #[test]
    fn saturation_events_hammer_the_test_keyword() {
        for ev in stream_101_to_200() {
            let in_keywords = ev.keywords.iter().filter(|kw| *kw == "test").count();
            let in_pairs = ev
                .keyword_terms
                .iter()
                .filter(|(kw, _)| kw == "test")
                .count();
            assert_eq!(in_keywords, 10);
            assert_eq!(in_pairs, 10);
        }
    }

    #[test]
    fn every_event_reads_a_file() {
        for ev in stream_1_to_50() {
            let read = ev.file_read.expect("fixture events always read a file");
            assert!(FIXTURE_FILES.contains(&read.file.as_str()));
            assert_eq!(read.offset, ev.prompt_index * 5);
        }
    }

    #[test]
    fn domains_are_unique_within_an_event() {
        for ev in stream_1_to_50()
            .iter()
            .chain(stream_51_to_100().iter())
            .chain(stream_101_to_200().iter())
        {
            let mut seen = std::collections::BTreeSet::new();
            for domain in &ev.domains {
                assert!(seen.insert(domain), "duplicate {domain} at {}", ev.prompt_index);
            }
        }
    }
}
