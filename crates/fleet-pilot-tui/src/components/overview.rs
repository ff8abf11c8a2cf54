//! Overview component - headline metrics, vendor mix, jobs and datacenters

use crate::components::{Component, bar, columns, draw_card, section};
use crate::ui_ext::{HealthIndicatorExt, MetricColorExt, VendorExt, health_indicator};
use color_eyre::Result;
use fleet_pilot_core::router::OverviewPanel;
use fleet_pilot_core::{
    HasHealth, HealthIndicator, JobKind, format_count, format_signed_percent,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

const BAR_WIDTH: usize = 20;

#[derive(Default)]
pub struct OverviewComponent;

impl OverviewComponent {
    pub fn new() -> Self {
        Self
    }

    fn draw_vendor_distribution(&self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) {
        let total: u64 = panel.vendors.iter().map(|v| v.count).sum();
        let max = panel.vendors.iter().map(|v| v.count).max().unwrap_or(0);

        let mut lines: Vec<Line> = panel
            .vendors
            .iter()
            .map(|entry| {
                let share = if total > 0 {
                    entry.count as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                Line::from(vec![
                    Span::raw(format!("{:<7}", entry.vendor.name())),
                    Span::styled(
                        bar(entry.count as f64, max as f64, BAR_WIDTH),
                        Style::default().fg(entry.vendor.brand_color()),
                    ),
                    Span::raw(format!(" {:>7}", format_count(entry.count))),
                    Span::raw(format!(" ({:.0}%)", share)).dim(),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(
            Span::raw(format!("Total {}", format_count(total))).dim(),
        ));

        frame.render_widget(
            Paragraph::new(lines).block(section("GPU Distribution by Vendor")),
            area,
        );
    }

    fn draw_job_categories(&self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) {
        let rows: Vec<Row> = panel
            .job_categories
            .iter()
            .map(|category| {
                let change_color = if category.is_growing() {
                    Color::Green
                } else {
                    Color::Red
                };
                Row::new(vec![
                    Cell::from(category.kind.name()),
                    Cell::from(category.count.to_string()),
                    Cell::from(category.change_label()).style(Style::default().fg(change_color)),
                    Cell::from(format!("{:.1}h", category.avg_duration_hours)),
                ])
            })
            .collect();

        let header = Row::new(vec!["CATEGORY", "JOBS", "CHANGE", "AVG TIME"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(9),
        ];

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section("Job Categories")),
            area,
        );
    }

    fn draw_cluster_health(&self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) {
        let rows: Vec<Row> = panel
            .cluster_health
            .iter()
            .map(|dc| {
                let (status_symbol, status_color) = health_indicator(&dc.status);
                let (_, temp_color) = health_indicator(&dc.temperature);
                let alerts = if dc.alerts == 0 {
                    Cell::from("-").style(Style::default().add_modifier(Modifier::DIM))
                } else {
                    Cell::from(dc.alerts.to_string()).style(Style::default().fg(Color::Red))
                };
                Row::new(vec![
                    Cell::from(dc.name.clone()),
                    Cell::from(format!("{} {}", status_symbol, dc.status.label()))
                        .style(Style::default().fg(status_color)),
                    Cell::from(format!("{:.0}%", dc.utilization)),
                    Cell::from(dc.temperature.label()).style(Style::default().fg(temp_color)),
                    alerts,
                ])
            })
            .collect();

        let header = Row::new(vec!["DATACENTER", "STATUS", "UTIL", "TEMP", "ALERTS"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Min(16),
            Constraint::Length(11),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(6),
        ];

        let overall = panel
            .cluster_health
            .iter()
            .map(|dc| dc.status.health())
            .fold(HealthIndicator::Healthy, HealthIndicator::worst);
        let title = format!("Datacenter Health {}", overall.symbol());

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section(&title).border_style(Style::default().fg(overall.color()))),
            area,
        );
    }

    fn draw_completion_trends(&self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) {
        let rows: Vec<Row> = panel
            .completion_trends
            .iter()
            .map(|point| {
                let mut cells = vec![Cell::from(point.day.clone())];
                cells.extend(
                    JobKind::ALL
                        .iter()
                        .map(|kind| Cell::from(point.value(*kind).to_string())),
                );
                Row::new(cells)
            })
            .collect();

        let mut header_cells = vec!["DAY"];
        header_cells.extend(JobKind::ALL.iter().map(|kind| kind.name()));
        let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(5),
        ];

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section("Completion Time Trend")),
            area,
        );
    }

    fn draw_rl_trend(&self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) {
        let max = panel
            .rl_metrics
            .iter()
            .map(|p| p.reward.max(p.baseline))
            .fold(0.0, f64::max);

        let lines: Vec<Line> = panel
            .rl_metrics
            .iter()
            .map(|point| {
                Line::from(vec![
                    Span::raw(format!("{:<6}", point.time)),
                    Span::styled(bar(point.reward, max, 12), Style::default().fg(Color::Magenta)),
                    Span::raw(format!(" {:>5.0}", point.reward)),
                    Span::raw(format!(" {}", format_signed_percent(point.improvement_percent()))).dim(),
                ])
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(section("RL Reward vs Baseline")),
            area,
        );
    }
}

impl Component for OverviewComponent {
    type Props = OverviewPanel;

    fn draw(&mut self, frame: &mut Frame, area: Rect, panel: &OverviewPanel) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(5), // Metric cards
            Constraint::Min(8),    // Vendors + jobs
            Constraint::Min(9),    // Datacenters + trends
        ])
        .split(area);

        for (metric, card) in panel.metrics.iter().zip(columns(layout[0], panel.metrics.len())) {
            draw_card(frame, card, &metric.name, &metric.value, &metric.trend, metric.accent());
        }

        let middle = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);
        self.draw_vendor_distribution(frame, middle[0], panel);
        self.draw_job_categories(frame, middle[1], panel);

        let bottom = columns(layout[2], 3);
        self.draw_cluster_health(frame, bottom[0], panel);
        self.draw_completion_trends(frame, bottom[1], panel);
        self.draw_rl_trend(frame, bottom[2], panel);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use fleet_pilot_core::{Dashboard, Panel};

    #[test]
    fn test_overview_renders_metrics_and_vendors() {
        let dashboard = Dashboard::new();
        let Some(Panel::Overview(panel)) = dashboard.panel() else {
            panic!("expected overview panel");
        };

        let mut component = OverviewComponent::new();
        let screen = render(180, 30, |frame| {
            let area = frame.area();
            component.draw(frame, area, &panel).unwrap();
        });

        assert!(screen.contains("52,384"));
        assert!(screen.contains("Total GPUs"));
        assert!(screen.contains("28,500"));
        assert!(screen.contains("South Datacenter"));
    }
}
