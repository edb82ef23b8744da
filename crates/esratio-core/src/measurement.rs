use crate::window::TimeWindow;

/// How a measurement obtains its scalar: a raw document count, or a single
/// backend-computed aggregation over a field.
///
/// The variant is decided once at request construction and drives the
/// count/aggregate dispatch in [`crate::executor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementMode {
    RawCount,
    Aggregated { agg_type: String, field: String },
}

impl MeasurementMode {
    /// Decide the mode from the optional aggregation pair.
    ///
    /// Both parts must be present for aggregation; a lone type or field is
    /// ignored and the measurement stays in raw-count mode.
    pub fn from_options(agg_type: Option<String>, agg_field: Option<String>) -> Self {
        match (agg_type, agg_field) {
            (Some(agg_type), Some(field)) => Self::Aggregated { agg_type, field },
            (None, None) => Self::RawCount,
            (agg_type, agg_field) => {
                tracing::warn!(
                    agg_type = ?agg_type,
                    agg_field = ?agg_field,
                    "Aggregation needs both a type and a field; falling back to raw count"
                );
                Self::RawCount
            }
        }
    }

    pub fn is_aggregated(&self) -> bool {
        matches!(self, Self::Aggregated { .. })
    }
}

/// One fully-resolved side of the ratio.
///
/// Constructed once from raw configuration plus the resolved window and
/// never mutated afterwards. The index selector has already been rendered
/// into a concrete index list at this point.
#[derive(Debug, Clone)]
pub struct MeasurementRequest {
    /// Concrete comma-joined index list.
    pub index: String,
    /// Opaque query predicate, interpreted by the backend.
    pub query: String,
    /// Optional field the predicate applies to by default.
    pub field: Option<String>,
    /// Document timestamp field bounding the window.
    pub timestamp_field: String,
    pub window: TimeWindow,
    pub mode: MeasurementMode,
}

/// Raw per-side configuration, before window resolution.
#[derive(Debug, Clone)]
pub struct MeasurementSpec {
    /// Index selector; may be a strftime-templated pattern.
    pub index: String,
    pub query: String,
    pub field: Option<String>,
    pub timestamp_field: String,
    pub agg_type: Option<String>,
    pub agg_field: Option<String>,
}

impl MeasurementSpec {
    /// Build the immutable request for this side over the resolved window.
    pub fn build(&self, window: TimeWindow) -> MeasurementRequest {
        MeasurementRequest {
            index: window.render_index(&self.index),
            query: self.query.clone(),
            field: self.field.clone(),
            timestamp_field: self.timestamp_field.clone(),
            window,
            mode: MeasurementMode::from_options(self.agg_type.clone(), self.agg_field.clone()),
        }
    }
}

/// A single measurement scalar plus the request metadata echoed for
/// message formatting.
#[derive(Debug, Clone)]
pub struct MeasurementResult {
    pub value: f64,
    pub index: String,
    pub query: String,
    pub field: Option<String>,
}

impl MeasurementResult {
    pub fn new(value: f64, request: &MeasurementRequest) -> Self {
        Self {
            value,
            index: request.index.clone(),
            query: request.query.clone(),
            field: request.field.clone(),
        }
    }
}
