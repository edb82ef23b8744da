use crate::window::TimeWindow;
use chrono::SecondsFormat;

/// Build a Kibana discover deep link for one measurement side.
///
/// The link carries the absolute window bounds and the URL-encoded query
/// predicate. An empty base URL yields an empty string so callers can
/// append the result unconditionally.
pub fn build_link(
    base_url: &str,
    index: &str,
    query: &str,
    timestamp_field: &str,
    window: &TimeWindow,
) -> String {
    if base_url.is_empty() {
        return String::new();
    }
    let base = base_url.trim_end_matches('/');
    let from = window.start.to_rfc3339_opts(SecondsFormat::Millis, true);
    let to = window.end.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!(
        "{base}/app/discover#/?_g=(time:(from:'{from}',mode:absolute,to:'{to}'))\
         &_a=(index:'{index}',query:(query_string:(analyze_wildcard:!t,query:'{query_enc}')),\
         sort:!('{timestamp_field}',desc))",
        query_enc = urlencoding::encode(query),
    )
}
