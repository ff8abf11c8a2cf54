//! Error types for the stats backend client

use std::time::Duration;
use thiserror::Error;

/// Errors raised while configuring or talking to the stats backend
#[derive(Debug, Error)]
pub enum FleetError {
    /// The request never produced a response (refused, reset, DNS, ...)
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend answered with a non-success status code
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// No response arrived before the deadline
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The response body was not valid JSON
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Any other HTTP client failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl FleetError {
    /// Map a reqwest error onto the most specific variant
    pub(crate) fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FleetError::Timeout(timeout)
        } else if err.is_connect() {
            FleetError::Connection(err.to_string())
        } else if err.is_decode() {
            FleetError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FleetError::Status(status.as_u16())
        } else {
            FleetError::Http(err)
        }
    }

    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FleetError::Connection(_) | FleetError::Timeout(_) | FleetError::Http(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = FleetError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "request timed out after 5s");
        assert!(err.is_transport());
    }

    #[test]
    fn test_status_is_not_transport() {
        let err = FleetError::Status(503);
        assert_eq!(err.to_string(), "unexpected HTTP status 503");
        assert!(!err.is_transport());
    }
}
