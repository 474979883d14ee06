//! End-to-end pipeline tests over the library API: normalization through
//! aggregation, scoring, trend, diff, and recommendations.

use chrono::{Duration, TimeZone, Utc};
use infra_audit::model::{
    KafkaReport, KafkaTopic, RawReport, S3Bucket, S3Prefix, S3Report, ToolReport, V1Finding,
    V1Report, VaultReport, VaultSecret,
};
use infra_audit::{
    aggregate, analyze_last_n_runs, compute_diff, generate_comparison_report, Category,
    HealthLevel, Severity, TrendDirection,
};

fn timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
}

fn vault_report(secrets: Vec<(&str, &str, u64)>) -> ToolReport {
    ToolReport {
        tool: "vault".to_string(),
        timestamp: timestamp(),
        supported: true,
        raw: RawReport::Vault(VaultReport {
            total_references: 25,
            secrets: secrets
                .into_iter()
                .map(|(path, status, refs)| VaultSecret {
                    path: path.to_string(),
                    status: status.to_string(),
                    reference_count: refs,
                    first_seen: None,
                    last_seen: None,
                })
                .collect(),
        }),
        issue_count: 0,
    }
}

fn s3_report() -> ToolReport {
    ToolReport {
        tool: "s3".to_string(),
        timestamp: timestamp(),
        supported: true,
        raw: RawReport::S3(S3Report {
            total_buckets: 10,
            buckets: vec![
                S3Bucket {
                    name: "app-logs".to_string(),
                    status: "public".to_string(),
                    object_count: Some(50),
                    prefixes: vec![],
                },
                S3Bucket {
                    name: "data-lake".to_string(),
                    status: "ok".to_string(),
                    object_count: None,
                    prefixes: vec![
                        S3Prefix {
                            prefix: "raw/".to_string(),
                            status: "stale".to_string(),
                            object_count: Some(200),
                        },
                        S3Prefix {
                            prefix: "hot/".to_string(),
                            status: "ok".to_string(),
                            object_count: None,
                        },
                    ],
                },
            ],
        }),
        issue_count: 0,
    }
}

fn kafka_report() -> ToolReport {
    ToolReport {
        tool: "kafka".to_string(),
        timestamp: timestamp(),
        supported: true,
        raw: RawReport::Kafka(KafkaReport {
            total_topics: 15,
            topics: vec![KafkaTopic {
                name: "orders-v1".to_string(),
                status: "idle".to_string(),
                partition_count: 6,
            }],
        }),
        issue_count: 0,
    }
}

fn unsupported_report(tool: &str) -> ToolReport {
    ToolReport {
        tool: tool.to_string(),
        timestamp: timestamp(),
        supported: false,
        raw: RawReport::Opaque {
            data: serde_json::json!({"ignored": true}),
        },
        issue_count: 0,
    }
}

#[test]
fn full_pipeline_mixed_tools() {
    let report = aggregate(&[
        vault_report(vec![
            ("secret/app/db", "missing", 4),
            ("secret/app/api", "ok", 9),
        ]),
        s3_report(),
        kafka_report(),
        unsupported_report("consul"),
    ])
    .unwrap();

    // vault 1 + s3 2 + kafka 1, unsupported contributes nothing.
    assert_eq!(report.summary.total_issues, 4);
    assert_eq!(report.summary.total_tools, 4);
    assert_eq!(report.summary.supported_tools, 3);
    assert_eq!(report.summary.unsupported_tools, 1);
    assert_eq!(report.summary.issues_by_tool.get("s3"), Some(&2));

    // 25 + 10 + 15 = 50 addressable, 4 distinct affected resources -> 92%.
    assert!((report.summary.score_percent - 92.0).abs() < 1e-9);
    assert_eq!(report.summary.health_score, HealthLevel::Good);

    // Issue counts recorded on the stored copies.
    assert_eq!(report.tool_reports.get("kafka").unwrap().issue_count, 1);
    assert_eq!(report.tool_reports.get("consul").unwrap().issue_count, 0);

    // One recommendation group per (tool, category, severity).
    assert_eq!(report.recommendations.len(), 4);
    assert_eq!(report.recommendations[0].severity, Severity::Critical);
    assert_eq!(report.recommendations[0].tool, "vault");
}

#[test]
fn v1_and_bespoke_reports_merge() {
    let v1 = ToolReport {
        tool: "dns-scanner".to_string(),
        timestamp: timestamp(),
        supported: true,
        raw: RawReport::V1(V1Report {
            findings: vec![V1Finding {
                id: "unused_resource".to_string(),
                severity: "low".to_string(),
                location: "zone/old.example.com".to_string(),
                message: "no queries in 90 days".to_string(),
            }],
        }),
        issue_count: 0,
    };
    let report = aggregate(&[v1, kafka_report()]).unwrap();
    assert_eq!(report.summary.total_issues, 2);
    assert_eq!(
        report.summary.issues_by_category.get(&Category::Unused),
        Some(&2)
    );
}

#[test]
fn trend_between_consecutive_aggregations() {
    let mut previous = aggregate(&[
        vault_report(vec![
            ("secret/a", "missing", 1),
            ("secret/b", "missing", 1),
            ("secret/c", "stale", 1),
            ("secret/d", "stale", 1),
            ("secret/e", "unused", 1),
        ]),
    ])
    .unwrap();
    previous.timestamp = timestamp() - Duration::days(1);

    let current = aggregate(&[vault_report(vec![
        ("secret/a", "missing", 1),
        ("secret/b", "missing", 1),
        ("secret/c", "stale", 1),
    ])])
    .unwrap()
    .with_trend(Some(&previous));

    let trend = current.trend.as_ref().unwrap();
    assert_eq!(trend.previous_issues, 5);
    assert_eq!(trend.current_issues, 3);
    assert_eq!(trend.direction, TrendDirection::Improving);
    assert!((trend.change_percent - -40.0).abs() < 1e-9);
    assert_eq!(trend.resolved_issues, 2);
    assert_eq!(trend.new_issues, 0);
    assert_eq!(trend.compared_with, previous.timestamp);

    let text = generate_comparison_report(&current, Some(&previous));
    assert!(text.contains("5 → 3 issues (-40.0% improving)"));
    assert!(text.contains("vault: 5 → 3"));
    assert!(text.contains("Resolved Issues: 2"));
}

#[test]
fn diff_between_aggregations_tracks_identity() {
    let baseline = aggregate(&[vault_report(vec![
        ("secret/a", "missing", 1),
        ("secret/b", "missing", 1),
        ("secret/c", "missing", 1),
    ])])
    .unwrap();
    let current = aggregate(&[vault_report(vec![
        ("secret/a", "missing", 1),
        ("secret/b", "missing", 1),
    ])])
    .unwrap();

    let diff = compute_diff(&baseline, &current);
    assert_eq!(diff.delta, -1);
    assert_eq!(diff.resolved_count(), 1);
    assert_eq!(diff.new_count(), 0);
    assert_eq!(diff.resolved_issues[0].identity_key(), "vault|missing|secret/c");

    let self_diff = compute_diff(&current, &current);
    assert!(self_diff.is_clean());
}

#[test]
fn recommendation_counts_sum_group_weights() {
    let report = aggregate(&[vault_report(vec![
        ("secret/a", "missing", 2),
        ("secret/b", "missing", 3),
    ])])
    .unwrap();
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].count, 5);
    assert_eq!(report.recommendations[0].action, "Fix 5 missing secrets");
}

#[test]
fn history_window_analysis() {
    let mut runs = Vec::new();
    for (days_ago, statuses) in [
        (3, vec![("secret/a", "missing", 1), ("secret/b", "stale", 1)]),
        (2, vec![("secret/a", "missing", 1)]),
        (0, vec![]),
    ] {
        let mut run = aggregate(&[vault_report(statuses)]).unwrap();
        run.timestamp = timestamp() - Duration::days(days_ago);
        runs.push(run);
    }

    let summary = analyze_last_n_runs(&runs).unwrap();
    assert_eq!(summary.runs_analyzed, 3);
    assert_eq!(summary.time_range, "Last 3 days");
    assert_eq!(summary.issue_sparkline, vec![2, 1, 0]);

    let vault = summary.by_tool.get("vault").unwrap();
    assert_eq!(vault.previous, 2);
    assert_eq!(vault.current, 0);
    assert!((vault.change_percent - -100.0).abs() < 1e-9);
}

#[test]
fn unsupported_only_batch_scores_unknown() {
    let report = aggregate(&[unsupported_report("consul"), unsupported_report("etcd")]).unwrap();
    assert_eq!(report.summary.total_issues, 0);
    assert_eq!(report.summary.score_percent, 0.0);
    assert_eq!(report.summary.health_score, HealthLevel::Unknown);
}
