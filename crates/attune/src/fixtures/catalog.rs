//! Seeded domain catalog
//!
//! Eight topical domains with realistic but compact term/keyword pools.
//! Seven are seeded up front; `@monitoring` is learned, introduced by the
//! event streams mid-run, and therefore absent here.

use crate::learner::state::{Learner, SEED_EPOCH, Tier};

/// One term within a domain and the keywords that map to it.
#[derive(Debug, Clone, Copy)]
pub struct DomainTerm {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// A pre-configured domain definition.
#[derive(Debug, Clone, Copy)]
pub struct SeededDomain {
    pub name: &'static str,
    pub tier: Tier,
    pub terms: &'static [DomainTerm],
}

pub const SEEDED_DOMAINS: &[SeededDomain] = &[
    SeededDomain {
        name: "@authentication",
        tier: Tier::Core,
        terms: &[
            DomainTerm {
                name: "login",
                keywords: &["login", "signin", "authenticate", "credentials", "sso"],
            },
            DomainTerm {
                name: "session",
                keywords: &["session", "cookie", "jwt", "bearer", "refresh"],
            },
            DomainTerm {
                name: "token",
                keywords: &["token", "access_token", "refresh_token", "oauth", "apikey"],
            },
        ],
    },
    SeededDomain {
        name: "@api",
        tier: Tier::Core,
        terms: &[
            DomainTerm {
                name: "handler",
                keywords: &["handler", "controller", "middleware", "interceptor", "resolver"],
            },
            DomainTerm {
                name: "endpoint",
                keywords: &["endpoint", "url", "path", "prefix", "base_url"],
            },
            DomainTerm {
                name: "route",
                keywords: &["route", "router", "dispatch", "mapping", "urlconf"],
            },
        ],
    },
    SeededDomain {
        name: "@database",
        tier: Tier::Core,
        terms: &[
            DomainTerm {
                name: "query",
                keywords: &["query", "select", "insert", "update", "delete"],
            },
            DomainTerm {
                name: "model",
                keywords: &["model", "schema", "entity", "table", "column"],
            },
            DomainTerm {
                name: "migration",
                keywords: &["migration", "migrate", "rollback", "seed", "fixture"],
            },
        ],
    },
    SeededDomain {
        name: "@testing",
        tier: Tier::Core,
        terms: &[
            DomainTerm {
                name: "test",
                keywords: &["test", "spec", "suite", "runner", "coverage"],
            },
            DomainTerm {
                name: "mock",
                keywords: &["mock", "stub", "fake", "spy", "double"],
            },
            DomainTerm {
                name: "assert",
                keywords: &["assert", "expect", "should", "verify", "check"],
            },
        ],
    },
    SeededDomain {
        name: "@logging",
        tier: Tier::Context,
        terms: &[
            DomainTerm {
                name: "logger",
                keywords: &["logger", "logfile", "loglevel", "syslog", "logrotate"],
            },
            DomainTerm {
                name: "debug",
                keywords: &["debug", "trace", "verbose", "debugger", "breakpoint"],
            },
        ],
    },
    SeededDomain {
        name: "@caching",
        tier: Tier::Context,
        terms: &[
            DomainTerm {
                name: "cache",
                keywords: &["cache", "redis", "memcached", "ttl", "expiry"],
            },
            DomainTerm {
                name: "invalidate",
                keywords: &["invalidate", "evict", "purge", "flush", "bust"],
            },
        ],
    },
    SeededDomain {
        name: "@deployment",
        tier: Tier::Context,
        terms: &[
            DomainTerm {
                name: "deploy",
                keywords: &["deploy", "release", "rollout", "canary", "bluegreen"],
            },
            DomainTerm {
                name: "pipeline",
                keywords: &["pipeline", "ci", "cd", "workflow", "stage"],
            },
        ],
    },
];

/// Register every catalog domain on the learner with the fixed seed epoch.
pub fn seed_catalog(learner: &mut Learner) {
    for domain in SEEDED_DOMAINS {
        learner.seed_domain(domain.name, domain.tier, SEED_EPOCH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learner::state::DomainSource;

    #[test]
    fn catalog_has_seven_seeded_domains() {
        assert_eq!(SEEDED_DOMAINS.len(), 7);
        assert!(
            SEEDED_DOMAINS
                .iter()
                .all(|domain| domain.name.starts_with('@'))
        );
    }

    #[test]
    fn every_domain_carries_at_least_two_terms() {
        for domain in SEEDED_DOMAINS {
            assert!(domain.terms.len() >= 2, "{} is too thin", domain.name);
            for term in domain.terms {
                assert!(!term.keywords.is_empty());
            }
        }
    }

    #[test]
    fn seed_catalog_marks_domains_seeded() {
        let mut learner = Learner::new();
        seed_catalog(&mut learner);

        let auth = &learner.state().domain_meta["@authentication"];
        assert_eq!(auth.source, DomainSource::Seeded);
        assert_eq!(auth.tier, Tier::Core);

        let logging = &learner.state().domain_meta["@logging"];
        assert_eq!(logging.tier, Tier::Context);
    }
}
