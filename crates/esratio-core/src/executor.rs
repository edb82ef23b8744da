use crate::measurement::{MeasurementMode, MeasurementRequest, MeasurementResult};
use async_trait::async_trait;

/// Errors that can occur when executing a measurement query against the
/// search backend.
///
/// # Examples
///
/// ```
/// use esratio_core::executor::QueryError;
///
/// let err = QueryError::NotFound { index: "logstash-2026.01.01".to_string() };
/// assert!(err.is_not_found());
/// assert!(err.to_string().contains("logstash-2026.01.01"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The target index does not exist for the queried time window.
    /// Recoverable: the check degrades instead of aborting.
    #[error("Query: index '{index}' not found for the queried time window")]
    NotFound { index: String },

    /// The backend answered with a non-success HTTP status.
    #[error("Query: backend HTTP error: status={status}, body={body}")]
    Http { status: u16, body: String },

    /// An underlying HTTP transport error from `reqwest`.
    #[error("Query: network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failure.
    #[error("Query: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response decoded but did not contain the expected value.
    #[error("Query: malformed backend response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    /// Whether this error is the recoverable missing-index case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience `Result` alias for query execution.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Executes measurement queries against the search backend.
///
/// Implementations issue either a raw count or a search carrying a single
/// named aggregation. The choice between the two belongs to [`execute`],
/// not to the implementation.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Raw document count over the request's window, index and predicate.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] when the index does not exist for the
    /// queried window; any other variant is fatal to the run.
    async fn count(&self, request: &MeasurementRequest) -> Result<u64>;

    /// Scalar value of the request's single named aggregation.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`QueryExecutor::count`].
    async fn aggregate(&self, request: &MeasurementRequest) -> Result<f64>;
}

/// Run one side of the ratio through the executor, dispatching on the
/// request mode decided at construction time.
pub async fn execute(
    executor: &dyn QueryExecutor,
    request: &MeasurementRequest,
) -> Result<MeasurementResult> {
    let value = match &request.mode {
        MeasurementMode::RawCount => executor.count(request).await? as f64,
        MeasurementMode::Aggregated { .. } => executor.aggregate(request).await?,
    };
    Ok(MeasurementResult::new(value, request))
}
