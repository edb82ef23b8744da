use clap::Parser;
use esratio_core::classify::Thresholds;
use esratio_core::measurement::MeasurementSpec;
use esratio_core::window::WindowSpec;
use esratio_es::EsConfig;

use crate::runner::CheckConfig;

/// Query-ratio check against an Elasticsearch backend.
///
/// Computes dividend/divisor from two independently-configured queries
/// over the same time window and classifies the ratio against the
/// warning/critical thresholds. Exit codes follow the check protocol:
/// OK=0, WARNING=1, CRITICAL=2, UNKNOWN=3.
#[derive(Debug, Parser)]
#[command(name = "check_es_ratio", version)]
pub struct Cli {
    /// Base URL of the search backend.
    #[arg(long, default_value = "http://localhost:9200")]
    pub url: String,

    /// HTTP basic auth username.
    #[arg(long)]
    pub username: Option<String>,

    /// HTTP basic auth password.
    #[arg(long, env = "ES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-query transport timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Dividend index selector; may be a strftime pattern such as
    /// `logstash-%Y.%m.%d`.
    #[arg(long, default_value = "logstash-%Y.%m.%d")]
    pub dividend_index: String,

    /// Dividend query predicate.
    #[arg(long)]
    pub dividend_query: String,

    /// Field the dividend predicate applies to by default.
    #[arg(long)]
    pub dividend_field: Option<String>,

    /// Dividend aggregation type (needs --dividend-agg-field too).
    #[arg(long)]
    pub dividend_agg_type: Option<String>,

    /// Dividend aggregation field (needs --dividend-agg-type too).
    #[arg(long)]
    pub dividend_agg_field: Option<String>,

    /// Dividend document timestamp field.
    #[arg(long, default_value = "@timestamp")]
    pub dividend_timestamp_field: String,

    /// Divisor index selector; may be a strftime pattern.
    #[arg(long, default_value = "logstash-%Y.%m.%d")]
    pub divisor_index: String,

    /// Divisor query predicate.
    #[arg(long)]
    pub divisor_query: String,

    /// Field the divisor predicate applies to by default.
    #[arg(long)]
    pub divisor_field: Option<String>,

    /// Divisor aggregation type (needs --divisor-agg-field too).
    #[arg(long)]
    pub divisor_agg_type: Option<String>,

    /// Divisor aggregation field (needs --divisor-agg-type too).
    #[arg(long)]
    pub divisor_agg_field: Option<String>,

    /// Divisor document timestamp field.
    #[arg(long, default_value = "@timestamp")]
    pub divisor_timestamp_field: String,

    /// Minutes to shift the window end back from now.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Window length: minutes before the end instant.
    #[arg(long, default_value_t = 0)]
    pub minutes_previous: u32,

    /// Window length: hours before the end instant.
    #[arg(long, default_value_t = 0)]
    pub hours_previous: u32,

    /// Window length: days before the end instant.
    #[arg(long, default_value_t = 0)]
    pub days_previous: u32,

    /// Window length: weeks before the end instant.
    #[arg(long, default_value_t = 0)]
    pub weeks_previous: u32,

    /// Window length: months (31 days each) before the end instant.
    #[arg(long, default_value_t = 0)]
    pub months_previous: u32,

    /// Warning threshold for the ratio.
    #[arg(short = 'w', long)]
    pub warning: f64,

    /// Critical threshold for the ratio.
    #[arg(short = 'c', long)]
    pub critical: f64,

    /// Inverted polarity: alert on low ratios instead of high ones.
    #[arg(long)]
    pub invert: bool,

    /// Report a zero divisor as OK instead of CRITICAL.
    #[arg(long)]
    pub zero_divisor_ok: bool,

    /// Kibana base URL for the diagnostic link; empty disables the link.
    #[arg(long, default_value = "")]
    pub kibana_url: String,
}

impl Cli {
    pub fn es_config(&self) -> EsConfig {
        EsConfig {
            base_url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout_secs: self.timeout,
        }
    }

    pub fn check_config(&self) -> CheckConfig {
        CheckConfig {
            dividend: MeasurementSpec {
                index: self.dividend_index.clone(),
                query: self.dividend_query.clone(),
                field: self.dividend_field.clone(),
                timestamp_field: self.dividend_timestamp_field.clone(),
                agg_type: self.dividend_agg_type.clone(),
                agg_field: self.dividend_agg_field.clone(),
            },
            divisor: MeasurementSpec {
                index: self.divisor_index.clone(),
                query: self.divisor_query.clone(),
                field: self.divisor_field.clone(),
                timestamp_field: self.divisor_timestamp_field.clone(),
                agg_type: self.divisor_agg_type.clone(),
                agg_field: self.divisor_agg_field.clone(),
            },
            window: WindowSpec {
                offset_minutes: self.offset,
                minutes: self.minutes_previous,
                hours: self.hours_previous,
                days: self.days_previous,
                weeks: self.weeks_previous,
                months: self.months_previous,
            },
            thresholds: Thresholds {
                warning: self.warning,
                critical: self.critical,
                invert: self.invert,
            },
            zero_divisor_ok: self.zero_divisor_ok,
            kibana_url: self.kibana_url.clone(),
        }
    }
}
