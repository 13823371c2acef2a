use super::*;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use index::KnowledgeEntry;
use similarity::FEATURE_COUNT;

use crate::metrics::{set_link_metrics, LinkMetrics};

fn commodities() -> KnowledgeBaseIndex {
    KnowledgeBaseIndex::new(
        "commodity",
        vec![
            KnowledgeEntry::new("c:cu", ["Copper", "Cu"]),
            KnowledgeEntry::new("c:au", ["Gold", "Au"]),
            KnowledgeEntry::new("c:ag", ["Silver", "Ag"]),
            KnowledgeEntry::new("c:ree", ["Rare earth elements", "REE"]),
        ],
    )
}

fn provinces() -> KnowledgeBaseIndex {
    KnowledgeBaseIndex::new(
        "state_or_province",
        vec![
            KnowledgeEntry::new("prov:georgia-us", ["Georgia"]).with_property("country", "country:us"),
            KnowledgeEntry::new("prov:ontario", ["Ontario", "ON"])
                .with_property("country", "country:ca"),
            KnowledgeEntry::new("prov:nevada", ["Nevada", "NV"]).with_property("country", "country:us"),
        ],
    )
}

fn constraint(key: &str, value: &str) -> Constraints {
    let mut constraints = Constraints::new();
    constraints.insert(key.into(), value.into());
    constraints
}

#[test]
fn exact_primary_label_scores_one() {
    let index = commodities();
    let hit = Linker::default()
        .link(&index, "Gold", &Constraints::new())
        .expect("non-empty index");
    assert_eq!(hit.entry.id, "c:au");
    assert_eq!(hit.score, 1.0);
    assert_eq!(hit.features.values(), &[1.0; FEATURE_COUNT]);
}

#[test]
fn alias_match_is_found() {
    let index = commodities();
    let hit = Linker::default()
        .link(&index, "ag", &Constraints::new())
        .expect("non-empty index");
    assert_eq!(hit.entry.id, "c:ag");
}

#[test]
fn typo_still_links() {
    let index = commodities();
    let hit = Linker::default()
        .link(&index, "coper", &Constraints::new())
        .expect("non-empty index");
    assert_eq!(hit.entry.id, "c:cu");
    assert!(hit.score < 1.0);
}

#[test]
fn constraints_restrict_candidates() {
    let index = provinces();
    let linker = Linker::default();

    let hit = linker
        .link(&index, "Ontario", &constraint("country", "country:us"))
        .expect("us provinces exist");
    assert_ne!(hit.entry.id, "prov:ontario");
    assert_eq!(hit.entry.property("country"), Some("country:us"));
}

#[test]
fn unsatisfiable_constraints_yield_none() {
    let index = provinces();
    let linker = Linker::default();
    assert!(linker
        .link(&index, "Ontario", &constraint("country", "country:mx"))
        .is_none());
    assert!(linker
        .link(&index, "Ontario", &constraint("region", "north"))
        .is_none());
}

#[test]
fn empty_index_yields_none() {
    let index = KnowledgeBaseIndex::new("unit", Vec::new());
    assert!(Linker::default()
        .link(&index, "tonne", &Constraints::new())
        .is_none());
}

#[test]
fn ties_go_to_earliest_entry() {
    let index = KnowledgeBaseIndex::new(
        "state_or_province",
        vec![
            KnowledgeEntry::new("prov:georgia-us", ["Georgia"]),
            KnowledgeEntry::new("prov:georgia-xx", ["Georgia"]),
        ],
    );
    let linker = Linker::default();
    for _ in 0..10 {
        let hit = linker
            .link(&index, "georgia", &Constraints::new())
            .expect("candidates exist");
        assert_eq!(hit.entry.id, "prov:georgia-us");
    }
}

#[test]
fn blank_query_still_returns_a_candidate() {
    let index = commodities();
    let hit = Linker::default()
        .link(&index, "   ", &Constraints::new())
        .expect("candidates exist");
    assert!(hit.score < 0.5);
}

#[test]
fn rank_orders_by_score_then_load_order() {
    let index = KnowledgeBaseIndex::new(
        "commodity",
        vec![
            KnowledgeEntry::new("c:zn", ["Zinc"]),
            KnowledgeEntry::new("c:cu-1", ["Copper"]),
            KnowledgeEntry::new("c:cu-2", ["Copper"]),
        ],
    );
    let hits = Linker::default().rank(&index, "copper", &Constraints::new());
    let ids: Vec<&str> = hits.iter().map(|hit| hit.id()).collect();
    assert_eq!(ids, vec!["c:cu-1", "c:cu-2", "c:zn"]);
    assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn rank_applies_min_score_and_max_results() {
    let index = commodities();
    let linker = Linker::new(
        FeatureExtractor::default(),
        LinkConfig {
            max_results: 1,
            min_score: 0.0,
        },
    )
    .expect("valid config");
    assert_eq!(linker.rank(&index, "gold", &Constraints::new()).len(), 1);

    let strict = Linker::new(
        FeatureExtractor::default(),
        LinkConfig {
            max_results: 10,
            min_score: 0.99,
        },
    )
    .expect("valid config");
    let hits = strict.rank(&index, "gold", &Constraints::new());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), "c:au");
}

#[test]
fn rank_agrees_with_link_on_the_top_hit() {
    let index = provinces();
    let linker = Linker::default();
    let constraints = constraint("country", "country:us");
    let best = linker.link(&index, "nevda", &constraints).expect("candidates");
    let ranked = linker.rank(&index, "nevda", &constraints);
    assert_eq!(ranked[0].entry.id, best.entry.id);
    assert_eq!(ranked[0].score, best.score);
}

#[test]
fn invalid_link_config_rejected() {
    let err = Linker::new(
        FeatureExtractor::default(),
        LinkConfig {
            max_results: 0,
            min_score: 0.0,
        },
    )
    .expect_err("config should be invalid");
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn invalid_feature_config_rejected() {
    let features = FeatureConfig {
        ordinal_threshold: 2.0,
        ..FeatureConfig::default()
    };
    let err = Linker::from_configs(features, LinkConfig::default())
        .expect_err("config should be invalid");
    assert!(matches!(err, MatchError::Features(_)));
}

type Event = (String, usize, bool);

struct RecordingMetrics {
    events: Arc<RwLock<Vec<Event>>>,
}

impl RecordingMetrics {
    fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn snapshot_for(&self, entity_type: &str) -> Vec<Event> {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|(name, _, _)| name == entity_type)
            .cloned()
            .collect()
    }
}

impl LinkMetrics for RecordingMetrics {
    fn record_link(
        &self,
        entity_type: &str,
        _latency: Duration,
        candidate_count: usize,
        matched: bool,
    ) {
        self.events
            .write()
            .unwrap()
            .push((entity_type.to_string(), candidate_count, matched));
    }
}

#[test]
fn metrics_recorder_observes_links() {
    let index = KnowledgeBaseIndex::new(
        "metrics_probe",
        vec![
            KnowledgeEntry::new("m:1", ["alpha"]).with_property("kind", "a"),
            KnowledgeEntry::new("m:2", ["beta"]).with_property("kind", "b"),
        ],
    );
    let metrics = Arc::new(RecordingMetrics::new());
    set_link_metrics(Some(metrics.clone()));

    let linker = Linker::default();
    assert!(linker.link(&index, "alpha", &Constraints::new()).is_some());
    assert!(linker.link(&index, "alpha", &constraint("kind", "c")).is_none());

    set_link_metrics(None);

    // Other tests may link concurrently; only look at this index.
    let events = metrics.snapshot_for("metrics_probe");
    assert_eq!(
        events,
        vec![
            ("metrics_probe".to_string(), 2, true),
            ("metrics_probe".to_string(), 0, false),
        ]
    );
}
