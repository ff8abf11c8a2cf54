//! Shared constants for the fleet dashboard
//!
//! Thresholds used to classify datacenters and heatmap cells, vendor colors,
//! and refresh interval presets.

// =============================================================================
// Datacenter Classification
// =============================================================================

/// Average utilization (percent) at or above which a datacenter is in Warning
pub const WARNING_UTILIZATION: f64 = 90.0;

/// Average utilization (percent) at or above which a datacenter is Critical
pub const CRITICAL_UTILIZATION: f64 = 95.0;

/// Average temperature (Celsius) at or above which a datacenter runs hot
pub const HIGH_TEMPERATURE_C: f64 = 60.0;

/// Average temperature (Celsius) at or above which temperature is critical
pub const CRITICAL_TEMPERATURE_C: f64 = 80.0;

// =============================================================================
// Utilization Heatmap
// =============================================================================

/// Number of racks shown in the heatmap
pub const HEATMAP_RACKS: usize = 40;

/// Racks per heatmap row
pub const HEATMAP_ROW_WIDTH: usize = 10;

/// Lowest value a heatmap cell can take
pub const HEATMAP_MIN: u8 = 40;

/// Highest value a heatmap cell can take
pub const HEATMAP_MAX: u8 = 99;

// =============================================================================
// Vendor Colors
// =============================================================================

/// Brand colors used for the vendor distribution chart
pub mod vendor_colors {
    pub const NVIDIA: &str = "#76b900";
    pub const AMD: &str = "#ED1C24";
    pub const INTEL: &str = "#0071c5";
}

// =============================================================================
// Refresh Intervals
// =============================================================================

/// Auto-refresh presets offered by the settings form (in seconds)
pub mod refresh_intervals {
    pub const FAST: u64 = 5;
    pub const NORMAL: u64 = 30;
    pub const SLOW: u64 = 60;
    pub const VERY_SLOW: u64 = 300;

    /// All presets in display order
    pub const ALL: [u64; 4] = [FAST, NORMAL, SLOW, VERY_SLOW];
}
