//! Stats payload validation and normalization
//!
//! A fetched payload goes through two steps. [`TelemetrySnapshot::from_value`]
//! checks the whole shape and either returns a typed snapshot or a
//! [`PayloadError`]. [`normalize`] then maps a valid snapshot onto the
//! overview metrics and vendor distribution. Nothing is written to the
//! dashboard until both steps succeed.

use crate::datasets;
use crate::formatting::{format_count, format_percent};
use crate::types::{OverviewMetric, Vendor, VendorDistributionEntry};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Reasons a payload is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A field is missing or has the wrong type
    #[error("payload does not match the stats schema: {0}")]
    Schema(String),

    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),
}

/// `total_gpus` as reported by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TotalGpus {
    /// Pre-formatted text, shown verbatim
    Text(String),
    Count(u64),
    Number(f64),
}

impl TotalGpus {
    pub fn display(&self) -> String {
        match self {
            TotalGpus::Text(text) => text.clone(),
            TotalGpus::Count(count) => format_count(*count),
            TotalGpus::Number(value) => value.to_string(),
        }
    }
}

/// Per-vendor GPU counts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VendorCounts {
    #[serde(rename = "NVIDIA")]
    pub nvidia: u64,
    #[serde(rename = "AMD")]
    pub amd: u64,
    #[serde(rename = "INTEL")]
    pub intel: u64,
}

impl VendorCounts {
    pub fn count(&self, vendor: Vendor) -> u64 {
        match vendor {
            Vendor::Nvidia => self.nvidia,
            Vendor::Amd => self.amd,
            Vendor::Intel => self.intel,
        }
    }
}

/// One validated stats payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetrySnapshot {
    pub total_gpus: TotalGpus,
    pub average_utilization: f64,
    pub power_efficiency: f64,
    pub companies: VendorCounts,
}

impl TelemetrySnapshot {
    /// Validate a raw payload
    ///
    /// Extra keys, including unknown vendors under `companies`, are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_pilot_core::normalizer::{PayloadError, TelemetrySnapshot};
    /// use serde_json::json;
    ///
    /// let ok = TelemetrySnapshot::from_value(json!({
    ///     "total_gpus": "60,000",
    ///     "average_utilization": 81,
    ///     "power_efficiency": 14,
    ///     "companies": {"NVIDIA": 30000, "AMD": 20000, "INTEL": 10000}
    /// }));
    /// assert!(ok.is_ok());
    ///
    /// let missing = TelemetrySnapshot::from_value(json!({"total_gpus": "60,000"}));
    /// assert!(matches!(missing, Err(PayloadError::Schema(_))));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject);
        }

        let snapshot: TelemetrySnapshot =
            serde_json::from_value(value).map_err(|e| PayloadError::Schema(e.to_string()))?;
        snapshot.check_finite()?;
        Ok(snapshot)
    }

    fn check_finite(&self) -> Result<(), PayloadError> {
        if let TotalGpus::Number(value) = self.total_gpus
            && !value.is_finite()
        {
            return Err(PayloadError::NonFinite("total_gpus"));
        }
        if !self.average_utilization.is_finite() {
            return Err(PayloadError::NonFinite("average_utilization"));
        }
        if !self.power_efficiency.is_finite() {
            return Err(PayloadError::NonFinite("power_efficiency"));
        }
        Ok(())
    }
}

/// Supplies the Active Jobs display value
///
/// The stats payload carries no job count, so the value comes from outside.
pub trait ActiveJobsProvider: Send + Sync {
    fn active_jobs(&self) -> String;
}

/// Always reports the same value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedActiveJobs(pub String);

impl Default for FixedActiveJobs {
    fn default() -> Self {
        FixedActiveJobs(fleet_rs::config::DEFAULT_ACTIVE_JOBS.to_string())
    }
}

impl ActiveJobsProvider for FixedActiveJobs {
    fn active_jobs(&self) -> String {
        self.0.clone()
    }
}

/// The two sequences a refresh replaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntities {
    pub overview_metrics: Vec<OverviewMetric>,
    pub vendor_distribution: Vec<VendorDistributionEntry>,
}

/// Map a validated snapshot onto display entities
///
/// Metric order, icons, colors and trend labels are fixed. Only the values
/// change.
pub fn normalize(snapshot: &TelemetrySnapshot, active_jobs: &dyn ActiveJobsProvider) -> LiveEntities {
    let values = [
        snapshot.total_gpus.display(),
        active_jobs.active_jobs(),
        format_percent(snapshot.average_utilization),
        format_percent(snapshot.power_efficiency),
    ];

    let overview_metrics = datasets::overview_metrics()
        .into_iter()
        .zip(values)
        .map(|(metric, value)| OverviewMetric { value, ..metric })
        .collect();

    let vendor_distribution = Vendor::ALL
        .into_iter()
        .map(|vendor| VendorDistributionEntry::new(vendor, snapshot.companies.count(vendor)))
        .collect();

    LiveEntities {
        overview_metrics,
        vendor_distribution,
    }
}

/// Validate and normalize in one step
pub fn normalize_value(value: Value, active_jobs: &dyn ActiveJobsProvider) -> Result<LiveEntities, PayloadError> {
    let snapshot = TelemetrySnapshot::from_value(value)?;
    Ok(normalize(&snapshot, active_jobs))
}

impl LiveEntities {
    /// Sum of the vendor counts
    pub fn vendor_total(&self) -> u64 {
        self.vendor_distribution.iter().map(|v| v.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricIcon;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "total_gpus": "60,000",
            "average_utilization": 81,
            "power_efficiency": 14,
            "companies": {"NVIDIA": 30000, "AMD": 20000, "INTEL": 10000}
        })
    }

    fn values(live: &LiveEntities) -> Vec<&str> {
        live.overview_metrics.iter().map(|m| m.value.as_str()).collect()
    }

    #[test]
    fn test_normalize_reference_payload() {
        let live = normalize_value(payload(), &FixedActiveJobs::default()).unwrap();

        assert_eq!(values(&live), ["60,000", "1,200", "81%", "14%"]);

        let names: Vec<_> = live.overview_metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["Total GPUs", "Active Jobs", "Avg. Utilization", "Power Efficiency"]
        );
        assert_eq!(live.overview_metrics[3].icon, MetricIcon::Zap);
        assert_eq!(live.overview_metrics[0].trend, "+384 from last week");

        let vendors: Vec<_> = live
            .vendor_distribution
            .iter()
            .map(|v| (v.vendor.name(), v.count, v.color.as_str()))
            .collect();
        assert_eq!(
            vendors,
            [
                ("NVIDIA", 30000, "#76b900"),
                ("AMD", 20000, "#ED1C24"),
                ("Intel", 10000, "#0071c5"),
            ]
        );
        assert_eq!(live.vendor_total(), 60_000);
    }

    #[test]
    fn test_vendor_order_ignores_key_order() {
        let value = json!({
            "companies": {"INTEL": 3, "AMD": 2, "NVIDIA": 1, "ARM": 99},
            "power_efficiency": 1.5,
            "average_utilization": 2.5,
            "total_gpus": 6
        });
        let live = normalize_value(value, &FixedActiveJobs::default()).unwrap();

        let counts: Vec<_> = live.vendor_distribution.iter().map(|v| v.count).collect();
        assert_eq!(counts, [1, 2, 3]);
        assert_eq!(live.vendor_distribution.len(), 3);
    }

    #[test]
    fn test_numeric_total_gets_separators() {
        let mut value = payload();
        value["total_gpus"] = json!(52384);
        let live = normalize_value(value, &FixedActiveJobs::default()).unwrap();
        assert_eq!(live.overview_metrics[0].value, "52,384");
    }

    #[test]
    fn test_fractional_values() {
        let mut value = payload();
        value["total_gpus"] = json!(1.5);
        value["average_utilization"] = json!(78.4);
        let live = normalize_value(value, &FixedActiveJobs::default()).unwrap();
        assert_eq!(live.overview_metrics[0].value, "1.5");
        assert_eq!(live.overview_metrics[2].value, "78.4%");
    }

    #[test]
    fn test_custom_active_jobs_provider() {
        let live = normalize_value(payload(), &FixedActiveJobs("847".into())).unwrap();
        assert_eq!(live.overview_metrics[1].value, "847");
    }

    #[test]
    fn test_rejects_missing_companies() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("companies");
        assert!(matches!(
            TelemetrySnapshot::from_value(value),
            Err(PayloadError::Schema(msg)) if msg.contains("companies")
        ));
    }

    #[test]
    fn test_rejects_missing_vendor() {
        let mut value = payload();
        value["companies"].as_object_mut().unwrap().remove("AMD");
        assert!(TelemetrySnapshot::from_value(value).is_err());
    }

    #[test]
    fn test_rejects_mistyped_fields() {
        let mut value = payload();
        value["average_utilization"] = json!("81");
        assert!(TelemetrySnapshot::from_value(value).is_err());

        let mut value = payload();
        value["companies"]["NVIDIA"] = json!(-1);
        assert!(TelemetrySnapshot::from_value(value).is_err());

        let mut value = payload();
        value["companies"]["INTEL"] = json!(10.5);
        assert!(TelemetrySnapshot::from_value(value).is_err());

        let mut value = payload();
        value["total_gpus"] = json!(true);
        assert!(TelemetrySnapshot::from_value(value).is_err());
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            TelemetrySnapshot::from_value(json!([1, 2, 3])),
            Err(PayloadError::NotAnObject)
        );
        assert_eq!(
            TelemetrySnapshot::from_value(Value::Null),
            Err(PayloadError::NotAnObject)
        );
    }
}
