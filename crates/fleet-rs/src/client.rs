//! HTTP client for the stats backend
//!
//! The backend exposes one aggregate endpoint. The client only moves bytes
//! and checks the status line; the body is handed back as raw JSON so the
//! caller can validate its shape before trusting any field.

use crate::config::{DashboardConfig, Endpoint};
use crate::error::FleetError;
use reqwest::Client;
use std::time::Duration;

/// Client for the fleet stats endpoint
#[derive(Clone)]
pub struct StatsClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl StatsClient {
    /// Create a client for the given endpoint
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self, FleetError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: endpoint.url(),
            timeout,
        })
    }

    /// Create a client from a loaded dashboard config
    pub fn from_config(config: &DashboardConfig) -> Result<Self, FleetError> {
        Self::new(&config.endpoint, config.timeout())
    }

    /// URL this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the aggregate overview stats
    ///
    /// Returns the body as untyped JSON. Transport failures, non-success
    /// status codes and bodies that are not JSON are all errors.
    pub async fn overview_stats(&self) -> Result<serde_json::Value, FleetError> {
        tracing::debug!("GET {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FleetError::from_request(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Stats endpoint answered {}", status);
            return Err(FleetError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FleetError::from_request(e, self.timeout))?;

        serde_json::from_slice(&body).map_err(|e| FleetError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> Endpoint {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Endpoint {
            scheme: "http".to_string(),
            host: "127.0.0.1".to_string(),
            port,
            path: "/overview_stats".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetches_json_body() {
        let router = Router::new().route(
            "/overview_stats",
            get(|| async {
                (
                    [("content-type", "application/json")],
                    r#"{"total_gpus":"60,000","average_utilization":81}"#,
                )
            }),
        );
        let endpoint = serve(router).await;
        let client = StatsClient::new(&endpoint, Duration::from_secs(2)).unwrap();

        let value = client.overview_stats().await.unwrap();
        assert_eq!(value["total_gpus"], "60,000");
        assert_eq!(value["average_utilization"], 81);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/overview_stats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let endpoint = serve(router).await;
        let client = StatsClient::new(&endpoint, Duration::from_secs(2)).unwrap();

        let err = client.overview_stats().await.unwrap_err();
        assert!(matches!(err, FleetError::Status(503)));
    }

    #[tokio::test]
    async fn test_body_not_json() {
        let router = Router::new().route("/overview_stats", get(|| async { "<html>oops</html>" }));
        let endpoint = serve(router).await;
        let client = StatsClient::new(&endpoint, Duration::from_secs(2)).unwrap();

        let err = client.overview_stats().await.unwrap_err();
        assert!(matches!(err, FleetError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let router = Router::new().route(
            "/overview_stats",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let endpoint = serve(router).await;
        let client = StatsClient::new(&endpoint, Duration::from_millis(200)).unwrap();

        let err = client.overview_stats().await.unwrap_err();
        assert!(matches!(err, FleetError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let endpoint = Endpoint {
            host: "127.0.0.1".to_string(),
            port,
            ..Endpoint::default()
        };
        let client = StatsClient::new(&endpoint, Duration::from_secs(2)).unwrap();

        let err = client.overview_stats().await.unwrap_err();
        assert!(err.is_transport());
    }
}
