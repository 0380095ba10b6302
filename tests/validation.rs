//! 语料库校验端到端测试

mod common;

use common::{foo_instances, sample_corpus, sample_with};
use crawler_agents::{
    load_corpus, CoreError, ConfigManager, ErrorKind, FailurePolicy, MatchMode, RawCorpus,
    SchemaRule, ValidationError, ValidationReport, Validator, ValidatorConfig,
};
use serde_json::{json, Value};

fn run(value: Value) -> Result<(), ValidationReport> {
    Validator::default().validate_value(value).map(|_| ())
}

fn run_with(value: Value, config: ValidatorConfig) -> Result<(), ValidationReport> {
    Validator::new(config).validate_value(value).map(|_| ())
}

#[test]
fn test_scenario_single_entry_passes() {
    assert!(run(json!([{"pattern": "foo", "instances": foo_instances()}])).is_ok());
}

#[test]
fn test_scenario_exact_duplicate() {
    let report = run(json!([
        {"pattern": "foo", "instances": foo_instances()},
        {"pattern": "foo"}
    ]))
    .unwrap_err();
    assert!(report.contains(ErrorKind::DuplicatePattern));
}

#[test]
fn test_scenario_more_general_pattern() {
    let report = run(json!([
        {"pattern": "foo", "instances": foo_instances()},
        {"pattern": "afoot"}
    ]))
    .unwrap_err();
    assert!(report
        .errors()
        .contains(&ValidationError::AmbiguousPattern { general: 0, specific: 1 }));
}

#[test]
fn test_scenario_case_insensitive_duplicate() {
    let report = run(json!([
        {"pattern": "foo", "instances": foo_instances()},
        {"pattern": "fOo"}
    ]))
    .unwrap_err();
    assert!(report
        .errors()
        .contains(&ValidationError::DuplicatePattern { first: 0, second: 1 }));
}

#[test]
fn test_sample_corpus_passes() {
    assert!(run(sample_corpus()).is_ok());
}

#[test]
fn test_top_level_record_is_malformed() {
    let report = run(json!({"foo": null})).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_non_record_element_is_malformed() {
    let report = run(json!([{"pattern": "foo", "instances": foo_instances()}, "bar"])).unwrap_err();
    assert_eq!(report.errors()[0].kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_missing_pattern_is_schema_violation() {
    let report = run(json!([{"foo": null}])).unwrap_err();
    assert!(report.errors().contains(&ValidationError::SchemaViolation {
        entry_index: 0,
        reason: SchemaRule::MissingField("pattern"),
    }));
}

#[test]
fn test_unknown_field_is_schema_violation() {
    let report = run(sample_with(json!([
        {"pattern": "rogerbot", "instances": ["rogerbot/1.0"], "homepage": "https://moz.com"}
    ])))
    .unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::SchemaViolation {
            entry_index: 10,
            reason: SchemaRule::UnknownField("homepage".to_string()),
        }]
    );
}

#[test]
fn test_case_sensitive_instance_mismatch() {
    let report = run(sample_with(json!([
        {"pattern": "rogerbot", "instances": ["test RogerBot/1.0 test"]}
    ])))
    .unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].kind(), ErrorKind::InstanceMismatch);

    let case_insensitive = ConfigManager::custom()
        .instance_mode(MatchMode::CaseInsensitive)
        .build();
    assert!(run_with(
        sample_with(json!([{"pattern": "rogerbot", "instances": ["test RogerBot/1.0 test"]}])),
        case_insensitive
    )
    .is_ok());
}

#[test]
fn test_threshold_boundary() {
    let instances = |n: usize| (0..n).map(|i| format!("crawler-{i}")).collect::<Vec<_>>();

    assert!(run(json!([{"pattern": "crawler", "instances": instances(10)}])).is_ok());

    let report = run(json!([{"pattern": "crawler", "instances": instances(9)}])).unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::InsufficientEvidence { count: 9, required: 10 }]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let valid = sample_corpus();
    for _ in 0..3 {
        assert!(run(valid.clone()).is_ok());
    }

    let invalid = json!([
        {"pattern": "foo", "instances": foo_instances()},
        {"pattern": "fOo"},
        {"pattern": "afoot", "extra": 1}
    ]);
    let first = run(invalid.clone()).unwrap_err();
    let second = run(invalid).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_fail_fast_returns_first_in_pipeline_order() {
    let invalid = json!([
        {"pattern": "foo", "instances": foo_instances()},
        {"pattern": "fOo", "instances": []},
        {"pattern": "afoot", "instances": []}
    ]);
    let collect_all = run(invalid.clone()).unwrap_err();
    assert!(collect_all.len() > 1);

    let fail_fast = ConfigManager::custom()
        .failure_policy(FailurePolicy::FailFast)
        .build();
    let report = run_with(invalid, fail_fast).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.first(), collect_all.first());
    assert_eq!(
        report.first(),
        Some(&ValidationError::DuplicatePattern { first: 0, second: 1 })
    );
}

#[test]
fn test_depends_on_waives_overlap() {
    let overlapping = json!([
        {"pattern": "Googlebot-Image", "instances": ["Googlebot-Image/1.0"]},
        {"pattern": "Googlebot", "instances": ["Googlebot"]}
    ]);
    let report = run(sample_with_only(overlapping)).unwrap_err();
    assert!(report
        .errors()
        .contains(&ValidationError::AmbiguousPattern { general: 1, specific: 0 }));

    let waived = json!([
        {"pattern": "Googlebot-Image", "instances": ["Googlebot-Image/1.0"], "depends_on": ["Googlebot"]},
        {"pattern": "Googlebot", "instances": ["Googlebot"]}
    ]);
    assert!(run(sample_with_only(waived)).is_ok());
}

/// 与样例语料库无重叠的补足实例
fn sample_with_only(entries: Value) -> Value {
    let mut value = entries;
    if let Some(items) = value.as_array_mut() {
        items.push(json!({
            "pattern": "rogerbot",
            "instances": (0..10).map(|i| format!("rogerbot/{i}.0")).collect::<Vec<_>>()
        }));
    }
    value
}

#[test]
fn test_backreference_is_engine_incompatible() {
    let report = run(sample_with(json!([
        {"pattern": "(spider)\\1", "instances": ["spiderspider"]}
    ])))
    .unwrap_err();
    assert_eq!(report.len(), 1);
    match &report.errors()[0] {
        ValidationError::EngineIncompatible { entry_index, reason, .. } => {
            assert_eq!(*entry_index, 10);
            assert!(reason.starts_with("unsupported construct"));
        }
        other => panic!("unexpected violation: {other:?}"),
    }
}

#[test]
fn test_lookahead_is_engine_incompatible() {
    let report = run(sample_with(json!([
        {"pattern": "spider(?!man)", "instances": ["a spider crawls"]}
    ])))
    .unwrap_err();
    assert!(report.contains(ErrorKind::EngineIncompatible));
}

#[test]
fn test_unescaped_separator() {
    let report = run(sample_with(json!([
        {"pattern": "rogerbot/", "instances": ["rogerbot/1.0"]}
    ])))
    .unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::UnescapedSeparator { entry_index: 10, position: 8 }]
    );
}

#[test]
fn test_lenient_config_accepts_missing_instances() {
    let corpus = sample_with(json!([{"pattern": "rogerbot"}]));
    assert!(run(corpus.clone()).is_err());
    assert!(run_with(corpus, ConfigManager::lenient()).is_ok());
}

#[test]
fn test_typed_corpus_round_trips_through_validation() {
    let validated = Validator::default().validate_value(sample_corpus()).unwrap();
    let again = Validator::default().validate_corpus(&validated).unwrap();
    assert_eq!(validated, again);
}

#[test]
fn test_load_corpus_from_text() {
    let text = serde_json::to_string(&sample_corpus()).unwrap();
    let corpus = load_corpus(&text, &ValidatorConfig::default()).unwrap();
    assert_eq!(corpus.len(), 10);

    assert!(matches!(
        load_corpus("[{\"pattern\": ", &ValidatorConfig::default()),
        Err(CoreError::Json(_))
    ));
    assert!(matches!(
        load_corpus("{}", &ValidatorConfig::default()),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn test_raw_corpus_rejects_scalar() {
    assert!(matches!(
        RawCorpus::from_json_str("42"),
        Err(CoreError::Validation(report)) if report.contains(ErrorKind::MalformedInput)
    ));
}

#[test]
fn test_extended_mode_comment_cannot_hide_mismatch() {
    let report = run(sample_with(json!([
        {"pattern": "(?x)rogerbot #c", "instances": ["definitely not matching"]}
    ])))
    .unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].kind(), ErrorKind::EngineIncompatible);
    assert_eq!(report.errors()[0].entry_index(), Some(10));
}

#[test]
fn test_extended_mode_with_closed_comment_passes() {
    let corpus = sample_with(json!([
        {"pattern": "(?x)roger bot # moz crawler\n", "instances": ["rogerbot/1.0"]}
    ]));
    let validated = Validator::default().validate_value(corpus).unwrap();
    let matcher = crawler_agents::CrawlerMatcher::new(&validated).unwrap();
    assert_eq!(
        matcher.matching_entries("rogerbot/1.0", MatchMode::CaseSensitive),
        vec![10]
    );
}
