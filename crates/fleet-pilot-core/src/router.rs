//! Tab content routing
//!
//! [`resolve`] maps the active tab onto the panel the view should draw.
//! Panels hold `Arc` snapshots of the datasets they read plus any values
//! derived from them, so a panel stays consistent even if a refresh lands
//! while it is being drawn.

use crate::constants::{
    HEATMAP_MAX, HEATMAP_MIN, HEATMAP_RACKS, HEATMAP_ROW_WIDTH, refresh_intervals,
};
use crate::datasets::Entities;
use crate::formatting::{format_interval, percent_change};
use crate::indicators::HeatLevel;
use crate::types::*;
use crate::view_state::{TabId, ViewState};
use std::sync::Arc;

/// Content for one tab
#[derive(Debug, Clone)]
pub enum Panel {
    Overview(OverviewPanel),
    Utilization(UtilizationPanel),
    RlMetrics(RlMetricsPanel),
    Alerts(AlertsPanel),
    Settings(SettingsForm),
}

impl Panel {
    pub fn tab(&self) -> TabId {
        match self {
            Panel::Overview(_) => TabId::Overview,
            Panel::Utilization(_) => TabId::Utilization,
            Panel::RlMetrics(_) => TabId::RlMetrics,
            Panel::Alerts(_) => TabId::Alerts,
            Panel::Settings(_) => TabId::Settings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverviewPanel {
    pub metrics: Arc<[OverviewMetric]>,
    pub vendors: Arc<[VendorDistributionEntry]>,
    pub job_categories: Arc<[JobCategory]>,
    pub cluster_health: Arc<[ClusterHealth]>,
    pub completion_trends: Arc<[CompletionTrendPoint]>,
    pub rl_metrics: Arc<[RlMetricPoint]>,
}

/// One utilization reading picked out of the series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilizationReading {
    pub time: String,
    pub vendor: Vendor,
    pub value: u8,
}

/// One rack cell in the utilization heatmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapCell {
    /// 1-based row
    pub row: usize,
    /// 1-based column
    pub column: usize,
    pub value: u8,
    pub level: HeatLevel,
}

impl HeatmapCell {
    /// Rack label, e.g. "2-7"
    pub fn label(&self) -> String {
        format!("{}-{}", self.row, self.column)
    }
}

#[derive(Debug, Clone)]
pub struct UtilizationPanel {
    pub series: Arc<[UtilizationPoint]>,
    pub vendor_summaries: Arc<[VendorUtilizationSummary]>,
    pub heatmap: Vec<HeatmapCell>,
    pub peak: Option<UtilizationReading>,
    pub lowest: Option<UtilizationReading>,
    pub underutilized: Arc<[UnderutilizedResource]>,
    pub memory: Arc<[VendorMemoryUsage]>,
}

impl UtilizationPanel {
    /// Heatmap cells grouped into rows
    pub fn heatmap_rows(&self) -> impl Iterator<Item = &[HeatmapCell]> {
        self.heatmap.chunks(HEATMAP_ROW_WIDTH)
    }
}

/// Reward improvement for one day of the RL series
#[derive(Debug, Clone, PartialEq)]
pub struct DailyImprovement {
    pub time: String,
    pub reward: f64,
    pub baseline: f64,
    pub improvement_percent: f64,
}

#[derive(Debug, Clone)]
pub struct RlMetricsPanel {
    pub series: Arc<[RlMetricPoint]>,
    pub summary: Arc<[RlSummaryCard]>,
    pub daily: Vec<DailyImprovement>,
    /// Reward change from the first to the last day, in percent
    pub total_improvement: Option<f64>,
    pub completion_comparison: Arc<[Comparison]>,
    pub allocation_efficiency: Arc<[Comparison]>,
    pub reward_actions: Arc<[RewardAction]>,
    pub hyperparameters: Arc<[HyperparameterImpact]>,
    pub recommendations: Arc<[String]>,
}

#[derive(Debug, Clone)]
pub struct AlertsPanel {
    pub alerts: Arc<[Alert]>,
}

/// The settings form; reads no entities
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    /// (seconds, label) pairs
    pub refresh_options: Vec<(u64, String)>,
    pub default_refresh_secs: u64,
    pub learning_rate_min: f64,
    pub learning_rate_max: f64,
    /// Slider position, 0..=100
    pub learning_rate_slider: u8,
    pub priority_vendors: Vec<Vendor>,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            refresh_options: refresh_intervals::ALL
                .iter()
                .map(|&secs| (secs, format_interval(secs)))
                .collect(),
            default_refresh_secs: refresh_intervals::NORMAL,
            learning_rate_min: 0.0001,
            learning_rate_max: 0.01,
            learning_rate_slider: 25,
            priority_vendors: Vendor::ALL.to_vec(),
        }
    }
}

/// Resolve the panel for the active tab
///
/// Returns `None` for an unrecognized tab id.
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::datasets::Entities;
/// use fleet_pilot_core::router::{Panel, resolve};
/// use fleet_pilot_core::view_state::{ViewAction, ViewState};
///
/// let entities = Entities::default();
///
/// let state = ViewState::default().reduce(ViewAction::SetActiveTab("alerts".into()));
/// assert!(matches!(resolve(&state, &entities), Some(Panel::Alerts(_))));
///
/// let state = state.reduce(ViewAction::SetActiveTab("nope".into()));
/// assert!(resolve(&state, &entities).is_none());
/// ```
pub fn resolve(state: &ViewState, entities: &Entities) -> Option<Panel> {
    let tab = state.active_tab.tab()?;
    Some(match tab {
        TabId::Overview => Panel::Overview(OverviewPanel {
            metrics: entities.overview_metrics.snapshot(),
            vendors: entities.vendor_distribution.snapshot(),
            job_categories: entities.job_categories.snapshot(),
            cluster_health: entities.cluster_health.snapshot(),
            completion_trends: entities.completion_trends.snapshot(),
            rl_metrics: entities.rl_metrics.snapshot(),
        }),
        TabId::Utilization => {
            let series = entities.utilization.snapshot();
            Panel::Utilization(UtilizationPanel {
                heatmap: utilization_heatmap(&series),
                peak: peak_reading(&series),
                lowest: lowest_reading(&series),
                series,
                vendor_summaries: entities.vendor_utilization.snapshot(),
                underutilized: entities.underutilized.snapshot(),
                memory: entities.memory_usage.snapshot(),
            })
        }
        TabId::RlMetrics => {
            let series = entities.rl_metrics.snapshot();
            Panel::RlMetrics(RlMetricsPanel {
                daily: daily_improvements(&series),
                total_improvement: total_improvement(&series),
                series,
                summary: entities.rl_summary.snapshot(),
                completion_comparison: entities.completion_comparison.snapshot(),
                allocation_efficiency: entities.allocation_efficiency.snapshot(),
                reward_actions: entities.reward_actions.snapshot(),
                hyperparameters: entities.hyperparameters.snapshot(),
                recommendations: entities.recommendations.snapshot(),
            })
        }
        TabId::Alerts => Panel::Alerts(AlertsPanel {
            alerts: entities.alerts.snapshot(),
        }),
        TabId::Settings => Panel::Settings(SettingsForm::default()),
    })
}

fn readings(series: &[UtilizationPoint]) -> impl Iterator<Item = UtilizationReading> + '_ {
    series.iter().flat_map(|point| {
        Vendor::ALL.into_iter().map(move |vendor| UtilizationReading {
            time: point.time.clone(),
            vendor,
            value: point.value(vendor),
        })
    })
}

/// Highest reading in the series; the earliest wins a tie
pub fn peak_reading(series: &[UtilizationPoint]) -> Option<UtilizationReading> {
    readings(series).reduce(|best, r| if r.value > best.value { r } else { best })
}

/// Lowest reading in the series; the earliest wins a tie
pub fn lowest_reading(series: &[UtilizationPoint]) -> Option<UtilizationReading> {
    readings(series).reduce(|best, r| if r.value < best.value { r } else { best })
}

/// Derive per-rack utilization for the heatmap
///
/// Each rack takes one vendor's reading from the series and offsets it by a
/// fixed per-rack amount, clamped to the heatmap range. The result depends
/// only on the series, so redraws do not flicker.
pub fn utilization_heatmap(series: &[UtilizationPoint]) -> Vec<HeatmapCell> {
    (0..HEATMAP_RACKS)
        .map(|i| {
            let value = match series.get(i % series.len().max(1)) {
                Some(point) => {
                    let vendor = Vendor::ALL[(i / series.len()) % Vendor::ALL.len()];
                    let offset = ((i * 37 + 11) % 31) as i16 - 15;
                    (point.value(vendor) as i16 + offset)
                        .clamp(HEATMAP_MIN as i16, HEATMAP_MAX as i16) as u8
                }
                None => HEATMAP_MIN,
            };
            HeatmapCell {
                row: i / HEATMAP_ROW_WIDTH + 1,
                column: i % HEATMAP_ROW_WIDTH + 1,
                value,
                level: HeatLevel::from_percent(value),
            }
        })
        .collect()
}

pub fn daily_improvements(series: &[RlMetricPoint]) -> Vec<DailyImprovement> {
    series
        .iter()
        .map(|point| DailyImprovement {
            time: point.time.clone(),
            reward: point.reward,
            baseline: point.baseline,
            improvement_percent: point.improvement_percent(),
        })
        .collect()
}

/// Reward change from the first to the last point
pub fn total_improvement(series: &[RlMetricPoint]) -> Option<f64> {
    let first = series.first()?;
    let last = series.last()?;
    Some(percent_change(first.reward, last.reward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSource;
    use crate::datasets;
    use crate::formatting::format_signed_percent;
    use crate::view_state::ViewAction;

    fn state_for(id: &str) -> ViewState {
        ViewState::default().reduce(ViewAction::SetActiveTab(id.to_string()))
    }

    #[test]
    fn test_each_tab_resolves_its_panel() {
        let entities = Entities::default();
        for tab in TabId::ALL {
            let panel = resolve(&state_for(tab.id()), &entities).unwrap();
            assert_eq!(panel.tab(), tab);
        }
    }

    #[test]
    fn test_unrecognized_tab_resolves_nothing() {
        let entities = Entities::default();
        assert!(resolve(&state_for("billing"), &entities).is_none());
        assert!(resolve(&state_for(""), &entities).is_none());
    }

    #[test]
    fn test_alerts_panel_reads_alerts_only() {
        let entities = Entities::default();
        let Some(Panel::Alerts(panel)) = resolve(&state_for("alerts"), &entities) else {
            panic!("expected alerts panel");
        };
        assert_eq!(panel.alerts.len(), 3);
        assert_eq!(panel.alerts[0].message, "Thermal throttling detected in Rack B42");
    }

    #[test]
    fn test_overview_panel_sees_replaced_metrics() {
        let mut entities = Entities::default();
        let mut metrics = datasets::overview_metrics();
        metrics[0].value = "60,000".to_string();
        entities.overview_metrics.replace(metrics, DataSource::Network);

        let Some(Panel::Overview(panel)) = resolve(&state_for("overview"), &entities) else {
            panic!("expected overview panel");
        };
        assert_eq!(panel.metrics[0].value, "60,000");
        assert_eq!(panel.vendors.len(), 3);
    }

    #[test]
    fn test_peak_and_lowest_readings() {
        let series = datasets::utilization();
        let peak = peak_reading(&series).unwrap();
        assert_eq!((peak.time.as_str(), peak.vendor, peak.value), ("16:00", Vendor::Nvidia, 92));

        let lowest = lowest_reading(&series).unwrap();
        assert_eq!((lowest.time.as_str(), lowest.vendor, lowest.value), ("04:00", Vendor::Intel, 59));

        assert!(peak_reading(&[]).is_none());
    }

    #[test]
    fn test_heatmap_shape_and_range() {
        let heatmap = utilization_heatmap(&datasets::utilization());
        assert_eq!(heatmap.len(), HEATMAP_RACKS);
        assert!(heatmap.iter().all(|c| (HEATMAP_MIN..=HEATMAP_MAX).contains(&c.value)));
        assert_eq!(heatmap[0].label(), "1-1");
        assert_eq!(heatmap[39].label(), "4-10");
        assert!(heatmap.iter().all(|c| c.level == HeatLevel::from_percent(c.value)));
    }

    #[test]
    fn test_heatmap_is_deterministic() {
        let series = datasets::utilization();
        assert_eq!(utilization_heatmap(&series), utilization_heatmap(&series));

        let empty = utilization_heatmap(&[]);
        assert_eq!(empty.len(), HEATMAP_RACKS);
        assert!(empty.iter().all(|c| c.value == HEATMAP_MIN));
    }

    #[test]
    fn test_rl_derived_values() {
        let series = datasets::rl_metrics();
        let total = total_improvement(&series).unwrap();
        assert_eq!(format_signed_percent(total), "+95.8%");

        let daily = daily_improvements(&series);
        assert_eq!(daily.len(), 7);
        assert_eq!(daily[0].improvement_percent, 20.0);
        assert!(total_improvement(&[]).is_none());
    }

    #[test]
    fn test_settings_form_defaults() {
        let form = SettingsForm::default();
        let labels: Vec<_> = form.refresh_options.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, ["5 seconds", "30 seconds", "1 minute", "5 minutes"]);
        assert_eq!(form.learning_rate_slider, 25);
        assert_eq!(form.priority_vendors, Vendor::ALL);
    }
}
