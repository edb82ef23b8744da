use esratio_core::measurement::{MeasurementMode, MeasurementRequest};
use serde_json::{json, Map, Value};

/// Bool/filter query combining the predicate with the window bounds on the
/// request's timestamp field.
fn filter_query(request: &MeasurementRequest) -> Value {
    let mut query_string = Map::new();
    query_string.insert("query".to_string(), json!(request.query));
    if let Some(field) = &request.field {
        query_string.insert("default_field".to_string(), json!(field));
    }

    let mut range = Map::new();
    range.insert(
        request.timestamp_field.clone(),
        json!({
            "gte": request.window.start.timestamp_millis(),
            "lte": request.window.end.timestamp_millis(),
            "format": "epoch_millis"
        }),
    );

    json!({
        "bool": {
            "filter": [
                { "query_string": query_string },
                { "range": range }
            ]
        }
    })
}

/// Body for a `_count` request.
pub(crate) fn count_body(request: &MeasurementRequest) -> Value {
    json!({ "query": filter_query(request) })
}

/// Body for a `_search` request: no hits, and the single named aggregation
/// when the request is in aggregation mode.
pub(crate) fn search_body(request: &MeasurementRequest) -> Value {
    let mut body = json!({
        "size": 0,
        "query": filter_query(request)
    });
    if let MeasurementMode::Aggregated { agg_type, field } = &request.mode {
        let mut agg = Map::new();
        agg.insert(agg_type.clone(), json!({ "field": field }));
        body["aggs"] = json!({ "check": agg });
    }
    body
}
