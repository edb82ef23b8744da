use crate::runner::{run_check, CheckConfig};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use esratio_core::classify::Thresholds;
use esratio_core::executor::{QueryError, QueryExecutor, Result as QueryResult};
use esratio_core::measurement::{MeasurementRequest, MeasurementSpec};
use esratio_core::status::Status;
use esratio_core::window::WindowSpec;
use std::collections::{HashMap, HashSet};

/// Executor stub keyed by query predicate, one entry per side.
#[derive(Default)]
struct MockExecutor {
    counts: HashMap<String, u64>,
    aggregates: HashMap<String, f64>,
    missing: HashSet<String>,
    failing: HashSet<String>,
}

impl MockExecutor {
    fn check_injected(&self, request: &MeasurementRequest) -> QueryResult<()> {
        if self.missing.contains(&request.query) {
            return Err(QueryError::NotFound {
                index: request.index.clone(),
            });
        }
        if self.failing.contains(&request.query) {
            return Err(QueryError::Http {
                status: 500,
                body: "search_phase_execution_exception".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn count(&self, request: &MeasurementRequest) -> QueryResult<u64> {
        self.check_injected(request)?;
        self.counts.get(&request.query).copied().ok_or_else(|| {
            QueryError::MalformedResponse(format!("no stubbed count for '{}'", request.query))
        })
    }

    async fn aggregate(&self, request: &MeasurementRequest) -> QueryResult<f64> {
        self.check_injected(request)?;
        self.aggregates.get(&request.query).copied().ok_or_else(|| {
            QueryError::MalformedResponse(format!("no stubbed aggregate for '{}'", request.query))
        })
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

fn spec(query: &str, agg: Option<(&str, &str)>) -> MeasurementSpec {
    MeasurementSpec {
        index: "logstash-%Y.%m.%d".to_string(),
        query: query.to_string(),
        field: None,
        timestamp_field: "@timestamp".to_string(),
        agg_type: agg.map(|(agg_type, _)| agg_type.to_string()),
        agg_field: agg.map(|(_, agg_field)| agg_field.to_string()),
    }
}

fn config(
    dividend: MeasurementSpec,
    divisor: MeasurementSpec,
    warning: f64,
    critical: f64,
    invert: bool,
) -> CheckConfig {
    CheckConfig {
        dividend,
        divisor,
        window: WindowSpec {
            minutes: 30,
            ..Default::default()
        },
        thresholds: Thresholds {
            warning,
            critical,
            invert,
        },
        zero_divisor_ok: false,
        kibana_url: String::new(),
    }
}

#[tokio::test]
async fn raw_count_ratio_within_thresholds_is_ok() {
    let mut executor = MockExecutor::default();
    executor.counts.insert("level:ERROR".to_string(), 50);
    executor.counts.insert("*".to_string(), 500);

    let config = config(
        spec("level:ERROR", None),
        spec("*", None),
        10.0,
        5.0,
        false,
    );
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();

    assert_eq!(report.status, Status::Ok);
    assert!(report.message.contains("0.10"), "message: {}", report.message);
    assert!(report.message.contains("| ratio=0.1;10;5;0;"));
}

#[tokio::test]
async fn aggregated_dividend_under_inverted_thresholds_is_critical() {
    let mut executor = MockExecutor::default();
    executor.aggregates.insert("service:api".to_string(), 2.0);
    executor.counts.insert("*".to_string(), 100);

    let config = config(
        spec("service:api", Some(("cardinality", "user_id"))),
        spec("*", None),
        10.0,
        5.0,
        true,
    );
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();

    assert_eq!(report.status, Status::Critical);
    assert!(report.message.contains("0.02"), "message: {}", report.message);
    assert!(report.message.contains("below critical threshold 5"));
}

#[tokio::test]
async fn zero_divisor_respects_the_policy() {
    let mut executor = MockExecutor::default();
    executor.counts.insert("level:ERROR".to_string(), 50);
    executor.counts.insert("*".to_string(), 0);

    let mut config = config(
        spec("level:ERROR", None),
        spec("*", None),
        10.0,
        20.0,
        false,
    );

    let report = run_check(&executor, &config, fixed_now()).await.unwrap();
    assert_eq!(report.status, Status::Critical);
    assert_eq!(report.message, "divisor is zero, raising alert");

    config.zero_divisor_ok = true;
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();
    assert_eq!(report.status, Status::Ok);
    assert_eq!(report.message, "divisor is zero, failing safe");
}

#[tokio::test]
async fn missing_index_under_normal_polarity_reports_ok() {
    let mut executor = MockExecutor::default();
    executor.counts.insert("level:ERROR".to_string(), 50);
    executor.missing.insert("*".to_string());

    let config = config(
        spec("level:ERROR", None),
        spec("*", None),
        10.0,
        20.0,
        false,
    );
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();

    assert_eq!(report.status, Status::Ok);
    assert_eq!(report.message, "no results found");
}

#[tokio::test]
async fn missing_index_under_inverted_polarity_still_classifies() {
    let mut executor = MockExecutor::default();
    executor.missing.insert("level:ERROR".to_string());
    executor.counts.insert("*".to_string(), 100);

    let config = config(
        spec("level:ERROR", None),
        spec("*", None),
        5.0,
        2.0,
        true,
    );
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();

    assert_eq!(report.status, Status::Critical);
    assert!(report.message.contains("0.00"), "message: {}", report.message);
}

#[tokio::test]
async fn backend_errors_are_fatal() {
    let mut executor = MockExecutor::default();
    executor.failing.insert("level:ERROR".to_string());
    executor.counts.insert("*".to_string(), 100);

    let config = config(
        spec("level:ERROR", None),
        spec("*", None),
        10.0,
        20.0,
        false,
    );
    let err = run_check(&executor, &config, fixed_now()).await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(err.to_string().contains("status=500"));
}

#[tokio::test]
async fn kibana_link_enriches_alert_messages_only() {
    let mut executor = MockExecutor::default();
    executor.counts.insert("level:ERROR".to_string(), 300);
    executor.counts.insert("*".to_string(), 10);

    let mut config = config(
        spec("level:ERROR", None),
        spec("*", None),
        10.0,
        20.0,
        false,
    );
    config.kibana_url = "https://kibana.example.com".to_string();

    // 30.0 is above critical: the link is appended.
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();
    assert_eq!(report.status, Status::Critical);
    assert!(report.message.contains("app/discover"));
    assert!(report.message.contains("level%3AERROR"));

    // Healthy ratio: no link.
    config.thresholds.warning = 50.0;
    config.thresholds.critical = 60.0;
    let report = run_check(&executor, &config, fixed_now()).await.unwrap();
    assert_eq!(report.status, Status::Ok);
    assert!(!report.message.contains("app/discover"));
}
