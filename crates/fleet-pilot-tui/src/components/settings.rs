//! Settings component - read-only view of the scheduler settings form

use crate::components::{Component, section};
use crate::ui_ext::VendorExt;
use color_eyre::Result;
use fleet_pilot_core::router::SettingsForm;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

pub struct SettingsComponent {
    /// Auto-refresh interval in effect, if any
    auto_refresh_secs: Option<u64>,
}

impl SettingsComponent {
    pub fn new(auto_refresh_secs: Option<u64>) -> Self {
        Self { auto_refresh_secs }
    }

    fn refresh_lines(&self, form: &SettingsForm) -> Vec<Line<'static>> {
        let current = self.auto_refresh_secs.unwrap_or(form.default_refresh_secs);
        let mut lines: Vec<Line> = form
            .refresh_options
            .iter()
            .map(|(secs, label)| {
                if *secs == current {
                    Line::from(vec![
                        Span::raw(" (•) ").fg(Color::Yellow),
                        Span::raw(label.clone()).bold(),
                    ])
                } else {
                    Line::from(vec![Span::raw(" ( ) ").dim(), Span::raw(label.clone())])
                }
            })
            .collect();
        if self.auto_refresh_secs.is_none() {
            lines.push(Line::from(""));
            lines.push(Line::from(
                Span::raw(" Auto-refresh is off; press r to refresh").dim(),
            ));
        }
        lines
    }
}

impl Component for SettingsComponent {
    type Props = SettingsForm;

    fn draw(&mut self, frame: &mut Frame, area: Rect, form: &SettingsForm) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(8), // Refresh interval
            Constraint::Length(4), // Learning rate
            Constraint::Min(5),    // Priority vendors
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(self.refresh_lines(form)).block(section("Dashboard Refresh Interval")),
            layout[0],
        );

        let gauge = Gauge::default()
            .block(section(&format!(
                "RL Model Learning Rate ({} - {})",
                form.learning_rate_min, form.learning_rate_max
            )))
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(u16::from(form.learning_rate_slider.min(100)))
            .label(format!("{}%", form.learning_rate_slider));
        frame.render_widget(gauge, layout[1]);

        let vendor_lines: Vec<Line> = form
            .priority_vendors
            .iter()
            .enumerate()
            .map(|(i, vendor)| {
                Line::from(vec![
                    Span::raw(format!(" {}. ", i + 1)).dim(),
                    Span::styled(
                        vendor.name(),
                        Style::default()
                            .fg(vendor.brand_color())
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(vendor_lines).block(section("Priority GPU Vendors")),
            layout[2],
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;

    #[test]
    fn test_current_interval_is_marked() {
        let component = SettingsComponent::new(Some(60));
        let lines = component.refresh_lines(&SettingsForm::default());
        let marked: Vec<String> = lines
            .iter()
            .filter(|line| line.spans.first().is_some_and(|s| s.content.contains('•')))
            .map(|line| line.spans[1].content.to_string())
            .collect();
        assert_eq!(marked, ["1 minute"]);
    }

    #[test]
    fn test_settings_render() {
        let mut component = SettingsComponent::new(None);
        let form = SettingsForm::default();
        let screen = render(80, 20, |frame| {
            let area = frame.area();
            component.draw(frame, area, &form).unwrap();
        });
        assert!(screen.contains("30 seconds"));
        assert!(screen.contains("Auto-refresh is off"));
        assert!(screen.contains("NVIDIA"));
    }
}
