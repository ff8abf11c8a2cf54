//! Telemetry sources and the fetch deadline
//!
//! A [`TelemetrySource`] produces one raw stats payload per call. The
//! dashboard never talks to reqwest directly; it goes through this trait so
//! that tests and offline mode can swap the network out.

use fleet_rs::{FleetError, StatsClient};
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;

/// Something that can produce a raw stats payload
pub trait TelemetrySource {
    fn fetch(&self) -> impl Future<Output = Result<Value, FleetError>> + Send;

    /// Short description for logs and the header
    fn describe(&self) -> String;
}

impl TelemetrySource for StatsClient {
    fn fetch(&self) -> impl Future<Output = Result<Value, FleetError>> + Send {
        self.overview_stats()
    }

    fn describe(&self) -> String {
        self.url().to_string()
    }
}

/// Returns the same payload on every fetch
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSource {
    payload: Value,
}

impl StaticSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Payload that reproduces the built-in overview numbers
    pub fn reference() -> Self {
        Self::new(json!({
            "total_gpus": "52,384",
            "average_utilization": 78.4,
            "power_efficiency": 12.3,
            "companies": {"NVIDIA": 28500, "AMD": 16400, "INTEL": 7484}
        }))
    }
}

impl TelemetrySource for StaticSource {
    fn fetch(&self) -> impl Future<Output = Result<Value, FleetError>> + Send {
        let payload = self.payload.clone();
        async move { Ok(payload) }
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

/// Fetch once, giving up after `deadline`
///
/// Expiry is reported as [`FleetError::Timeout`], the same error the HTTP
/// client raises for its own timeout.
pub async fn fetch_with_deadline<S: TelemetrySource>(
    source: &S,
    deadline: Duration,
) -> Result<Value, FleetError> {
    match tokio::time::timeout(deadline, source.fetch()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!("Fetch from {} exceeded {:?}", source.describe(), deadline);
            Err(FleetError::Timeout(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowSource(Duration);

    impl TelemetrySource for SlowSource {
        fn fetch(&self) -> impl Future<Output = Result<Value, FleetError>> + Send {
            let delay = self.0;
            async move {
                tokio::time::sleep(delay).await;
                Ok(json!({}))
            }
        }

        fn describe(&self) -> String {
            "slow".to_string()
        }
    }

    #[tokio::test]
    async fn test_static_source_returns_payload() {
        let source = StaticSource::reference();
        let value = fetch_with_deadline(&source, Duration::from_secs(1)).await.unwrap();
        assert_eq!(value["companies"]["AMD"], 16400);
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_timeout() {
        let source = SlowSource(Duration::from_secs(5));
        let err = fetch_with_deadline(&source, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_fast_source_beats_deadline() {
        let source = SlowSource(Duration::from_millis(1));
        assert!(fetch_with_deadline(&source, Duration::from_secs(2)).await.is_ok());
    }
}
