//! Refresh errors and their user-facing messages

use crate::normalizer::PayloadError;
use fleet_rs::FleetError;
use thiserror::Error;

/// Why a refresh left the live values untouched
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Transport failure, non-success status, timeout or undecodable body
    #[error("network failure: {0}")]
    Network(#[from] FleetError),

    /// The body was JSON but not a stats payload
    #[error("malformed payload: {0}")]
    Malformed(#[from] PayloadError),
}

/// Format a refresh error for the header
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::errors::{RefreshError, format_refresh_error};
/// use fleet_rs::FleetError;
///
/// let error = RefreshError::Network(FleetError::Status(503));
/// assert_eq!(format_refresh_error(&error), "Stats endpoint returned HTTP 503");
/// ```
pub fn format_refresh_error(error: &RefreshError) -> String {
    match error {
        RefreshError::Network(e) => format_fleet_error(e),
        RefreshError::Malformed(PayloadError::NotAnObject) => {
            "Unexpected response - stats payload is not an object".to_string()
        }
        RefreshError::Malformed(PayloadError::Schema(msg)) => {
            format!("Unexpected response - {}", msg)
        }
        RefreshError::Malformed(PayloadError::NonFinite(field)) => {
            format!("Unexpected response - {} is not a number", field)
        }
    }
}

/// Format a FleetError into a user-friendly message
pub fn format_fleet_error(error: &FleetError) -> String {
    match error {
        FleetError::Connection(msg) => format_connection_error(msg),
        FleetError::Status(code) => format!("Stats endpoint returned HTTP {}", code),
        FleetError::Timeout(after) => format_timeout_error(after.as_secs()),
        FleetError::Decode(_) => "Unexpected response - body is not JSON".to_string(),
        FleetError::Http(e) => format_connection_error(&e.to_string()),
        FleetError::ConfigNotFound(path) => format!("Config not found: {}", path),
        FleetError::ConfigInvalid(msg) => format!("Invalid config: {}", msg),
        _ => error.to_string(),
    }
}

fn format_connection_error(msg: &str) -> String {
    let lower = msg.to_lowercase();
    if lower.contains("refused") {
        "Connection refused - is the stats backend running?".to_string()
    } else if lower.contains("dns") || lower.contains("resolve") {
        "DNS resolution failed - check the endpoint host".to_string()
    } else if lower.contains("reset") {
        "Connection reset by peer".to_string()
    } else if lower.contains("certificate") || lower.contains("tls") {
        "TLS error - check the endpoint scheme".to_string()
    } else {
        format!("Connection failed: {}", msg)
    }
}

/// Format a timeout message
pub fn format_timeout_error(timeout_secs: u64) -> String {
    format!("Request timed out after {}s", timeout_secs)
}

/// Categorize an error for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Timeout,
    /// The backend answered but the body was unusable
    Payload,
    Config,
    Other,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network",
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::Payload => "Payload",
            ErrorCategory::Config => "Config",
            ErrorCategory::Other => "Error",
        }
    }
}

/// Categorize a refresh error
pub fn categorize_error(error: &RefreshError) -> ErrorCategory {
    match error {
        RefreshError::Network(e) => categorize_fleet_error(e),
        RefreshError::Malformed(_) => ErrorCategory::Payload,
    }
}

pub fn categorize_fleet_error(error: &FleetError) -> ErrorCategory {
    match error {
        FleetError::Timeout(_) => ErrorCategory::Timeout,
        FleetError::Connection(_) | FleetError::Status(_) => ErrorCategory::Network,
        FleetError::Http(e) if e.is_timeout() => ErrorCategory::Timeout,
        FleetError::Http(_) => ErrorCategory::Network,
        FleetError::Decode(_) => ErrorCategory::Payload,
        FleetError::ConfigNotFound(_)
        | FleetError::ConfigInvalid(_)
        | FleetError::NoHomeDirectory
        | FleetError::Yaml(_) => ErrorCategory::Config,
        _ => ErrorCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_connection_error() {
        let error = RefreshError::from(FleetError::Connection("tcp connect error: Connection refused".into()));
        assert!(format_refresh_error(&error).contains("refused"));

        let error = RefreshError::from(FleetError::Connection("failed to lookup address: dns error".into()));
        assert!(format_refresh_error(&error).starts_with("DNS"));
    }

    #[test]
    fn test_format_timeout() {
        let error = RefreshError::from(FleetError::Timeout(Duration::from_secs(5)));
        assert_eq!(format_refresh_error(&error), "Request timed out after 5s");
        assert_eq!(categorize_error(&error), ErrorCategory::Timeout);
    }

    #[test]
    fn test_malformed_payload() {
        let error = RefreshError::from(PayloadError::NonFinite("power_efficiency"));
        assert_eq!(
            format_refresh_error(&error),
            "Unexpected response - power_efficiency is not a number"
        );
        assert_eq!(categorize_error(&error), ErrorCategory::Payload);
        assert_eq!(
            categorize_error(&RefreshError::from(FleetError::Decode("eof".into()))),
            ErrorCategory::Payload
        );
    }

    #[test]
    fn test_categorize_network() {
        let error = RefreshError::from(FleetError::Status(500));
        assert_eq!(categorize_error(&error), ErrorCategory::Network);
        assert_eq!(ErrorCategory::Network.label(), "Network");
    }

    #[test]
    fn test_categorize_config() {
        let error = FleetError::ConfigInvalid("timeout_secs must be positive".into());
        assert_eq!(categorize_fleet_error(&error), ErrorCategory::Config);
        assert!(format_fleet_error(&error).starts_with("Invalid config"));
    }
}
