//! UI extensions for fleet-pilot-core types
//!
//! Provides ratatui-specific extensions for core types, bridging the gap
//! between the UI-agnostic core library and the TUI presentation layer.

use fleet_pilot_core::{HasHealth, HealthIndicator, HeatLevel, ImpactLevel, OverviewMetric, Vendor};
use ratatui::style::Color;

/// Extension trait for HealthIndicator to provide ratatui colors
pub trait HealthIndicatorExt {
    /// Get the ratatui Color for this indicator
    fn color(&self) -> Color;

    /// Get symbol and color together (common pattern)
    fn symbol_and_color(&self) -> (&'static str, Color);
}

impl HealthIndicatorExt for HealthIndicator {
    fn color(&self) -> Color {
        match self {
            HealthIndicator::Healthy => Color::Green,
            HealthIndicator::Warning => Color::Yellow,
            HealthIndicator::Error => Color::Red,
            HealthIndicator::Info => Color::Blue,
            HealthIndicator::Unknown => Color::DarkGray,
        }
    }

    fn symbol_and_color(&self) -> (&'static str, Color) {
        (self.symbol(), self.color())
    }
}

/// Symbol and color for anything that reports health
pub fn health_indicator<T: HasHealth>(value: &T) -> (&'static str, Color) {
    value.health().symbol_and_color()
}

/// Extension trait for heatmap bands
pub trait HeatLevelExt {
    /// Cell background
    fn background(&self) -> Color;

    /// Text color readable on the background
    fn foreground(&self) -> Color;
}

impl HeatLevelExt for HeatLevel {
    fn background(&self) -> Color {
        match self {
            HeatLevel::Idle => Color::Rgb(220, 252, 231),
            HeatLevel::Low => Color::Rgb(187, 247, 208),
            HeatLevel::Moderate => Color::Rgb(254, 240, 138),
            HeatLevel::Elevated => Color::Rgb(253, 224, 71),
            HeatLevel::High => Color::Rgb(252, 165, 165),
            HeatLevel::Saturated => Color::Rgb(248, 113, 113),
        }
    }

    fn foreground(&self) -> Color {
        if self.is_hot() {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Extension trait for vendor brand colors
pub trait VendorExt {
    fn brand_color(&self) -> Color;
}

impl VendorExt for Vendor {
    fn brand_color(&self) -> Color {
        parse_hex_color(self.color()).unwrap_or(Color::Gray)
    }
}

/// Extension trait for overview metric color tags
pub trait MetricColorExt {
    fn accent(&self) -> Color;
}

impl MetricColorExt for OverviewMetric {
    fn accent(&self) -> Color {
        match self.color.as_str() {
            "blue" => Color::Blue,
            "green" => Color::Green,
            "purple" => Color::Magenta,
            "amber" => Color::Yellow,
            other => parse_hex_color(other).unwrap_or(Color::White),
        }
    }
}

/// Extension trait for hyperparameter impact ratings
pub trait ImpactLevelExt {
    fn color(&self) -> Color;
}

impl ImpactLevelExt for ImpactLevel {
    fn color(&self) -> Color {
        match self {
            ImpactLevel::High => Color::Green,
            ImpactLevel::Medium => Color::Yellow,
            ImpactLevel::Low => Color::Blue,
        }
    }
}

/// Parse `#rrggbb` into an RGB color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
