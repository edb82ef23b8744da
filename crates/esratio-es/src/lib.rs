//! Elasticsearch executor for the query-ratio check.
//!
//! Issues `_count` and `_search` (single named aggregation) requests over
//! HTTP and maps backend failures into the core's typed query errors. A
//! missing index surfaces as the recoverable
//! [`QueryError::NotFound`] variant; everything else is fatal to the run.

mod query;


use async_trait::async_trait;
use esratio_core::executor::{QueryError, QueryExecutor, Result};
use esratio_core::measurement::MeasurementRequest;
use std::time::Duration;

/// Connection settings for the search backend.
#[derive(Debug, Clone)]
pub struct EsConfig {
    /// Base URL, e.g. `https://es.example.com:9200`.
    pub base_url: String,
    /// HTTP basic auth credentials; password may be omitted.
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-query transport timeout in seconds.
    pub timeout_secs: u64,
}

/// HTTP executor for a single check run against one backend.
pub struct EsExecutor {
    client: reqwest::Client,
    config: EsConfig,
}

impl EsExecutor {
    /// Build the executor with the transport timeout applied to the
    /// underlying client.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Network`] if the HTTP client cannot be built.
    pub fn new(config: EsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn post(
        &self,
        index: &str,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/{index}/{endpoint}",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request = self.client.post(&url).json(body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(QueryError::NotFound {
                index: index.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl QueryExecutor for EsExecutor {
    async fn count(&self, request: &MeasurementRequest) -> Result<u64> {
        let body = query::count_body(request);
        tracing::debug!(index = %request.index, query = %request.query, "Issuing count query");

        let response = self.post(&request.index, "_count", &body).await?;
        response
            .get("count")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| QueryError::MalformedResponse("missing 'count' field".to_string()))
    }

    async fn aggregate(&self, request: &MeasurementRequest) -> Result<f64> {
        let body = query::search_body(request);
        tracing::debug!(index = %request.index, query = %request.query, "Issuing aggregation query");

        let response = self.post(&request.index, "_search", &body).await?;
        response
            .pointer("/aggregations/check/value")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| {
                QueryError::MalformedResponse("missing 'check' aggregation value".to_string())
            })
    }
}
