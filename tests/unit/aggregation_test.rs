use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;
use jsonshape::analysis::{AnalysisConfig, CorpusAggregator, Flattener};
use jsonshape::{aggregate, Document};

fn corpus() -> Vec<Document> {
    vec![
        Document::new("1.json", "in/1.json", json!({"id": 1, "user": {"name": "a"}, "tags": []})),
        Document::new("2.json", "in/2.json", json!({"id": 2, "user": {"name": "b"}})),
        Document::new("3.json", "in/3.json", json!({"user": {"name": "c"}, "id": 3, "tags": [1]})),
        Document::new("4.json", "in/4.json", json!({"id": 4, "extra": {"flag": true}})),
        Document::new("5.json", "in/5.json", json!({"id": 5, "user": {"name": "e", "age": 40}})),
    ]
}

#[test]
fn test_common_fields_are_exactly_full_frequency_keys() {
    let analysis = aggregate(&corpus(), Flattener::default()).unwrap();
    let total = analysis.total_documents;
    assert_eq!(total, 5);

    for key in &analysis.common_fields {
        assert_eq!(analysis.field_frequency[key], total);
    }
    for (key, count) in &analysis.field_frequency {
        assert!(*count <= total);
        assert_eq!(*count == total, analysis.common_fields.contains(key));
    }
    assert_eq!(analysis.common_fields, BTreeSet::from(["id".to_string()]));
}

#[test]
fn test_deviation_matches_group_fingerprint() {
    let analysis = aggregate(&corpus(), Flattener::default()).unwrap();

    for deviation in &analysis.deviations {
        let group = analysis.group(deviation.group).unwrap();
        let shape: BTreeSet<&String> = group.fingerprint.keys().iter().collect();
        let common: BTreeSet<&String> = analysis.common_fields.iter().collect();

        let missing: Vec<&String> = common.difference(&shape).copied().collect();
        let extra: Vec<&String> = shape.difference(&common).copied().collect();
        assert_eq!(deviation.missing.iter().collect::<Vec<_>>(), missing);
        assert_eq!(deviation.extra.iter().collect::<Vec<_>>(), extra);
    }
}

#[test]
fn test_grouping_preserves_discovery_order() {
    let analysis = aggregate(&corpus(), Flattener::default()).unwrap();
    assert_eq!(analysis.groups.len(), 4);

    let first = &analysis.groups[0];
    assert_eq!(first.member_names().collect::<Vec<_>>(), vec!["1.json", "3.json"]);
    assert_eq!(first.fingerprint.keys(), ["id", "tags", "user.name"]);
    assert_eq!(analysis.groups[1].member_names().collect::<Vec<_>>(), vec!["2.json"]);
    assert_eq!(
        analysis.groups.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn test_top_level_mode_groups_by_root_keys() {
    let flattener = Flattener::from_config(&AnalysisConfig::top_level());
    let analysis = aggregate(&corpus(), flattener).unwrap();

    // 2.json and 5.json differ only below "user"
    let group = analysis.group_of("5.json").unwrap();
    assert_eq!(group.member_names().collect::<Vec<_>>(), vec!["2.json", "5.json"]);
    assert_eq!(analysis.field_frequency["user"], 4);
}

#[test]
fn test_incremental_aggregation_equals_batch() {
    let documents = corpus();
    let mut aggregator = CorpusAggregator::new(Flattener::default(), false);
    for document in &documents {
        aggregator.ingest(document).unwrap();
    }
    assert_eq!(aggregator.document_count(), 5);

    let incremental = aggregator.finish();
    let batch = aggregate(&documents, Flattener::default()).unwrap();
    assert_eq!(incremental.field_frequency, batch.field_frequency);
    assert_eq!(incremental.common_fields, batch.common_fields);
    assert_eq!(incremental.deviations, batch.deviations);
}

#[test]
fn test_single_shape_corpus_has_no_deviation() {
    let documents = vec![
        Document::new("a.json", "a.json", json!({"k": 1})),
        Document::new("b.json", "b.json", json!({"k": 2})),
    ];
    let analysis = aggregate(&documents, Flattener::default()).unwrap();
    assert_eq!(analysis.groups.len(), 1);
    assert!(analysis
        .deviations
        .iter()
        .all(|d| d.missing.is_empty() && d.extra.is_empty()));
    assert_eq!(analysis.frequency_percent("k"), 100.0);
}
