//! Core domain types for the fleet dashboard
//!
//! Every entity here is plain data. Sequences of them live in
//! [`Dataset`](crate::dataset::Dataset)s and are only ever replaced wholesale.

use crate::constants::vendor_colors;
use crate::formatting::percent_change;
use crate::indicators::{AlertSeverity, ClusterStatus, TemperatureClass};
use chrono::Duration;
use serde::{Deserialize, Serialize};

// =============================================================================
// Live entities
// =============================================================================

/// Icon shown next to an overview metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricIcon {
    Server,
    Activity,
    Cpu,
    Zap,
}

/// One of the four headline KPIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewMetric {
    pub name: String,
    /// Display value, already formatted
    pub value: String,
    pub icon: MetricIcon,
    /// Color tag (blue, green, purple, amber)
    pub color: String,
    pub trend: String,
}

impl OverviewMetric {
    pub fn new(name: &str, value: impl Into<String>, icon: MetricIcon, color: &str, trend: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            icon,
            color: color.to_string(),
            trend: trend.to_string(),
        }
    }
}

/// GPU hardware vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Nvidia,
    Amd,
    Intel,
}

impl Vendor {
    /// All vendors in display order
    pub const ALL: [Vendor; 3] = [Vendor::Nvidia, Vendor::Amd, Vendor::Intel];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Nvidia => "NVIDIA",
            Vendor::Amd => "AMD",
            Vendor::Intel => "Intel",
        }
    }

    /// Brand color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            Vendor::Nvidia => vendor_colors::NVIDIA,
            Vendor::Amd => vendor_colors::AMD,
            Vendor::Intel => vendor_colors::INTEL,
        }
    }
}

/// GPU count for one vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDistributionEntry {
    pub vendor: Vendor,
    pub count: u64,
    pub color: String,
}

impl VendorDistributionEntry {
    pub fn new(vendor: Vendor, count: u64) -> Self {
        Self {
            vendor,
            count,
            color: vendor.color().to_string(),
        }
    }
}

// =============================================================================
// Reference entities
// =============================================================================

/// Workload category scheduled on the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobKind {
    MlTraining,
    Inference,
    Rendering,
    Hpc,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        JobKind::MlTraining,
        JobKind::Inference,
        JobKind::Rendering,
        JobKind::Hpc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JobKind::MlTraining => "ML Training",
            JobKind::Inference => "Inference",
            JobKind::Rendering => "Rendering",
            JobKind::Hpc => "HPC",
        }
    }
}

/// Job category breakdown row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCategory {
    pub kind: JobKind,
    pub count: u32,
    /// Change versus the previous period, in percent
    pub change_percent: i32,
    pub avg_duration_hours: f64,
}

impl JobCategory {
    pub fn change_label(&self) -> String {
        format!("{:+}%", self.change_percent)
    }

    pub fn is_growing(&self) -> bool {
        self.change_percent >= 0
    }
}

/// Completion time per job kind for one day (relative units)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTrendPoint {
    pub day: String,
    pub ml_training: u32,
    pub inference: u32,
    pub rendering: u32,
    pub hpc: u32,
}

impl CompletionTrendPoint {
    pub fn value(&self, kind: JobKind) -> u32 {
        match kind {
            JobKind::MlTraining => self.ml_training,
            JobKind::Inference => self.inference,
            JobKind::Rendering => self.rendering,
            JobKind::Hpc => self.hpc,
        }
    }
}

/// Health summary for one datacenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealth {
    pub name: String,
    pub status: ClusterStatus,
    /// Average utilization in percent
    pub utilization: f64,
    pub temperature: TemperatureClass,
    pub alerts: u32,
}

impl ClusterHealth {
    /// Build a summary from raw averages, classifying status and temperature
    pub fn from_averages(name: &str, avg_utilization: f64, avg_temperature: f64, alerts: u32) -> Self {
        Self {
            name: name.to_string(),
            status: ClusterStatus::from_utilization(avg_utilization),
            utilization: avg_utilization,
            temperature: TemperatureClass::from_celsius(avg_temperature),
            alerts,
        }
    }
}

/// Per-vendor utilization at one point in time (percent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationPoint {
    pub time: String,
    pub nvidia: u8,
    pub amd: u8,
    pub intel: u8,
}

impl UtilizationPoint {
    pub fn value(&self, vendor: Vendor) -> u8 {
        match vendor {
            Vendor::Nvidia => self.nvidia,
            Vendor::Amd => self.amd,
            Vendor::Intel => self.intel,
        }
    }
}

/// RL policy reward versus the heuristic baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RlMetricPoint {
    pub time: String,
    pub reward: f64,
    pub baseline: f64,
}

impl RlMetricPoint {
    /// Reward improvement over the baseline, in percent
    pub fn improvement_percent(&self) -> f64 {
        percent_change(self.baseline, self.reward)
    }
}

/// Operator alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub severity: AlertSeverity,
    pub message: String,
    /// Time since the alert was raised
    #[serde(skip, default = "Duration::zero")]
    pub age: Duration,
}

/// Utilization summary card for one vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorUtilizationSummary {
    pub vendor: Vendor,
    pub average: f64,
    pub weekly_change: f64,
}

/// Rack running well below capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderutilizedResource {
    pub rack_id: String,
    pub gpu_type: String,
    pub utilization: f64,
    /// Hours the rack has stayed underutilized (lower bound)
    pub idle_hours: u32,
    pub candidate: JobKind,
    pub candidate_jobs: u32,
}

/// Memory usage for one vendor's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorMemoryUsage {
    pub vendor: Vendor,
    pub used_tb: f64,
    pub free_tb: f64,
}

impl VendorMemoryUsage {
    /// Used share of the pool, in whole percent
    pub fn used_percent(&self) -> u8 {
        let total = self.used_tb + self.free_tb;
        if total <= 0.0 {
            0
        } else {
            (self.used_tb / total * 100.0).round() as u8
        }
    }
}

/// Headline card on the RL panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlSummaryCard {
    pub title: String,
    pub value: String,
    pub detail: String,
}

/// Before/after comparison for a named group (job kind or vendor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub name: String,
    pub before: u32,
    pub after: u32,
}

impl Comparison {
    pub fn change_percent(&self) -> f64 {
        percent_change(self.before as f64, self.after as f64)
    }
}

/// Scheduler action and the reward it earns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardAction {
    pub action: String,
    pub avg_reward: f64,
    /// Share of all actions, in percent
    pub frequency: f64,
}

/// Impact rating for a hyperparameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "Low +",
            ImpactLevel::Medium => "Medium +",
            ImpactLevel::High => "High +",
        }
    }
}

/// Current value of a policy hyperparameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparameterImpact {
    pub parameter: String,
    pub value: String,
    pub impact: ImpactLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_order_and_colors() {
        let names: Vec<_> = Vendor::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names, ["NVIDIA", "AMD", "Intel"]);
        assert_eq!(VendorDistributionEntry::new(Vendor::Amd, 1).color, "#ED1C24");
    }

    #[test]
    fn test_job_category_change_label() {
        let category = JobCategory {
            kind: JobKind::Rendering,
            count: 124,
            change_percent: -3,
            avg_duration_hours: 8.7,
        };
        assert_eq!(category.change_label(), "-3%");
        assert!(!category.is_growing());
    }

    #[test]
    fn test_memory_used_percent() {
        let usage = VendorMemoryUsage {
            vendor: Vendor::Nvidia,
            used_tb: 1230.0,
            free_tb: 270.0,
        };
        assert_eq!(usage.used_percent(), 82);
    }

    #[test]
    fn test_cluster_health_from_averages() {
        let health = ClusterHealth::from_averages("South Datacenter", 96.0, 85.0, 5);
        assert_eq!(health.status, ClusterStatus::Critical);
        assert_eq!(health.temperature, TemperatureClass::Critical);
    }

    #[test]
    fn test_rl_improvement() {
        let point = RlMetricPoint {
            time: "Day 1".to_string(),
            reward: 120.0,
            baseline: 100.0,
        };
        assert_eq!(point.improvement_percent(), 20.0);
    }
}
