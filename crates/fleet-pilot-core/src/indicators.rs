//! Health and status indicators for consistent UI representation
//!
//! Datacenter status, temperature class, alert severity and heatmap bands all
//! map onto one `HealthIndicator` so the UI colors them the same way.

use crate::constants::{
    CRITICAL_TEMPERATURE_C, CRITICAL_UTILIZATION, HIGH_TEMPERATURE_C, WARNING_UTILIZATION,
};
use serde::{Deserialize, Serialize};

/// Universal health/status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HealthIndicator {
    /// Fully healthy/operational
    Healthy,
    /// Degraded but functional
    Warning,
    /// Failed or critical
    Error,
    /// Informational (neutral)
    Info,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl HealthIndicator {
    /// Unicode symbol for this status
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthIndicator::Healthy => "●",
            HealthIndicator::Warning => "◐",
            HealthIndicator::Error => "✗",
            HealthIndicator::Info => "○",
            HealthIndicator::Unknown => "?",
        }
    }

    /// Severity level (higher = more severe)
    pub fn severity(&self) -> u8 {
        match self {
            HealthIndicator::Healthy => 0,
            HealthIndicator::Info => 1,
            HealthIndicator::Unknown => 2,
            HealthIndicator::Warning => 3,
            HealthIndicator::Error => 4,
        }
    }

    /// Return the more severe of two indicators
    pub fn worst(self, other: HealthIndicator) -> HealthIndicator {
        if self.severity() >= other.severity() {
            self
        } else {
            other
        }
    }
}

/// Types that can report a health indicator
pub trait HasHealth {
    fn health(&self) -> HealthIndicator;

    fn needs_attention(&self) -> bool {
        matches!(
            self.health(),
            HealthIndicator::Warning | HealthIndicator::Error
        )
    }
}

/// Datacenter status derived from average utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterStatus {
    Healthy,
    Warning,
    Critical,
}

impl ClusterStatus {
    /// Classify from an average utilization percentage
    ///
    /// ```
    /// use fleet_pilot_core::indicators::ClusterStatus;
    ///
    /// assert_eq!(ClusterStatus::from_utilization(82.0), ClusterStatus::Healthy);
    /// assert_eq!(ClusterStatus::from_utilization(93.0), ClusterStatus::Warning);
    /// assert_eq!(ClusterStatus::from_utilization(96.0), ClusterStatus::Critical);
    /// ```
    pub fn from_utilization(avg_utilization: f64) -> Self {
        if avg_utilization < WARNING_UTILIZATION {
            ClusterStatus::Healthy
        } else if avg_utilization < CRITICAL_UTILIZATION {
            ClusterStatus::Warning
        } else {
            ClusterStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClusterStatus::Healthy => "Healthy",
            ClusterStatus::Warning => "Warning",
            ClusterStatus::Critical => "Critical",
        }
    }
}

impl HasHealth for ClusterStatus {
    fn health(&self) -> HealthIndicator {
        match self {
            ClusterStatus::Healthy => HealthIndicator::Healthy,
            ClusterStatus::Warning => HealthIndicator::Warning,
            ClusterStatus::Critical => HealthIndicator::Error,
        }
    }
}

/// Datacenter temperature class derived from average GPU temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureClass {
    Normal,
    High,
    Critical,
}

impl TemperatureClass {
    /// Classify from an average temperature in Celsius
    pub fn from_celsius(avg_temperature: f64) -> Self {
        if avg_temperature < HIGH_TEMPERATURE_C {
            TemperatureClass::Normal
        } else if avg_temperature < CRITICAL_TEMPERATURE_C {
            TemperatureClass::High
        } else {
            TemperatureClass::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureClass::Normal => "Normal",
            TemperatureClass::High => "High",
            TemperatureClass::Critical => "Critical",
        }
    }
}

impl HasHealth for TemperatureClass {
    fn health(&self) -> HealthIndicator {
        match self {
            TemperatureClass::Normal => HealthIndicator::Healthy,
            TemperatureClass::High => HealthIndicator::Warning,
            TemperatureClass::Critical => HealthIndicator::Error,
        }
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "Low",
            AlertSeverity::Medium => "Medium",
            AlertSeverity::High => "High",
        }
    }
}

impl HasHealth for AlertSeverity {
    fn health(&self) -> HealthIndicator {
        match self {
            AlertSeverity::High => HealthIndicator::Error,
            AlertSeverity::Medium => HealthIndicator::Warning,
            AlertSeverity::Low => HealthIndicator::Info,
        }
    }
}

/// Heatmap color band for a rack utilization value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeatLevel {
    /// 50% or less
    Idle,
    /// Above 50%
    Low,
    /// Above 60%
    Moderate,
    /// Above 70%
    Elevated,
    /// Above 80%
    High,
    /// Above 90%
    Saturated,
}

impl HeatLevel {
    pub fn from_percent(value: u8) -> Self {
        match value {
            91.. => HeatLevel::Saturated,
            81..=90 => HeatLevel::High,
            71..=80 => HeatLevel::Elevated,
            61..=70 => HeatLevel::Moderate,
            51..=60 => HeatLevel::Low,
            _ => HeatLevel::Idle,
        }
    }

    /// Whether the cell is hot enough to need light text
    pub fn is_hot(&self) -> bool {
        matches!(self, HeatLevel::High | HeatLevel::Saturated)
    }
}
