use crate::metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use threads_core::{ApiErrorDetail, ConfigError, CoreError, ThreadsApiError};
use tracing::{debug, error};
use url::Url;

pub const API_VERSION: &str = "v1.0";

#[derive(Debug)]
pub struct ThreadsApiClient {
    http_client: Client,
    base_url: String,
    metrics: Arc<MetricsCollector>,
}

impl ThreadsApiClient {
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let parsed = Url::parse(base_url).map_err(|_| ConfigError::InvalidValue {
            field: "api_base_url".to_string(),
            value: base_url.to_string(),
        })?;

        // No request timeout: a hung call blocks the run.
        let http_client = Client::builder().build()?;

        Ok(Self {
            http_client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    /// Fully-qualified URL for `path` under the versioned API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path.trim_start_matches('/'))
    }

    /// Issues a GET to `endpoint` and returns the parsed JSON body.
    ///
    /// Every failure is logged here and surfaces as
    /// [`ThreadsApiError::RequestFailed`]. Structured upstream detail is only
    /// extracted for HTTP 400.
    pub async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ThreadsApiError> {
        let start_time = Instant::now();
        let result = self.send(endpoint, params).await;

        let (status_code, has_error_detail) = match &result {
            Ok((status, _)) => (Some(*status), false),
            Err(e) => (e.status_code(), e.detail().is_some()),
        };
        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint_label(endpoint),
                status_code,
                response_time: start_time.elapsed(),
                success: result.is_ok(),
                has_error_detail,
            })
            .await;

        result.map(|(_, body)| body)
    }

    async fn send(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<(u16, Value), ThreadsApiError> {
        debug!("Making Threads API request: GET {}", endpoint);
        let response = match self.http_client.get(endpoint).query(params).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request failed: {}", e.without_url());
                return Err(request_failed(endpoint, None, None));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let raw = format!("HTTP status {} for url ({})", status, endpoint);
            let body = response.text().await.unwrap_or_default();
            let detail = if status == StatusCode::BAD_REQUEST {
                ApiErrorDetail::from_body(&body, &raw)
            } else {
                None
            };

            match &detail {
                Some(detail) => error!("{}", detail),
                None => error!("API request failed: {}", raw),
            }
            return Err(request_failed(endpoint, Some(status.as_u16()), detail));
        }

        match response.json::<Value>().await {
            Ok(body) => {
                debug!("Request successful: {} {}", status, endpoint);
                Ok((status.as_u16(), body))
            }
            Err(e) => {
                error!("API request failed: {}", e.without_url());
                Err(request_failed(endpoint, Some(status.as_u16()), None))
            }
        }
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        self.metrics.export_metrics().await
    }
}

fn request_failed(
    endpoint: &str,
    status_code: Option<u16>,
    detail: Option<ApiErrorDetail>,
) -> ThreadsApiError {
    ThreadsApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        status_code,
        detail,
    }
}

fn endpoint_label(endpoint: &str) -> String {
    Url::parse(endpoint)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_owned))
        })
        .unwrap_or_else(|| endpoint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let client = ThreadsApiClient::new("https://graph.threads.net/").unwrap();
        assert_eq!(
            client.endpoint("me/threads"),
            "https://graph.threads.net/v1.0/me/threads"
        );
        assert_eq!(
            client.endpoint("/1789/insights"),
            "https://graph.threads.net/v1.0/1789/insights"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ThreadsApiClient::new("not a url");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { field, .. })) if field == "api_base_url"
        ));
    }

    #[test]
    fn test_endpoint_label() {
        assert_eq!(
            endpoint_label("https://graph.threads.net/v1.0/me/threads"),
            "threads"
        );
        assert_eq!(
            endpoint_label("https://graph.threads.net/v1.0/42/insights"),
            "insights"
        );
    }

    #[tokio::test]
    async fn test_metrics_start_empty() {
        let client = ThreadsApiClient::new(threads_core::DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(client.get_metrics().await.total_requests, 0);
    }
}
