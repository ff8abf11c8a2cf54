//! Utilization component - vendor trends, rack heatmap and spare capacity

use crate::components::{Component, bar, columns, draw_card, section};
use crate::ui_ext::{HeatLevelExt, VendorExt};
use color_eyre::Result;
use fleet_pilot_core::router::{UtilizationPanel, UtilizationReading};
use fleet_pilot_core::{HeatLevel, Vendor, format_signed_percent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

#[derive(Default)]
pub struct UtilizationComponent;

fn reading_label(prefix: &str, reading: Option<&UtilizationReading>) -> String {
    match reading {
        Some(r) => format!("{} at {} - {}% ({})", prefix, r.time, r.value, r.vendor.name()),
        None => format!("{}: no data", prefix),
    }
}

impl UtilizationComponent {
    pub fn new() -> Self {
        Self
    }

    fn draw_series(&self, frame: &mut Frame, area: Rect, panel: &UtilizationPanel) {
        let mut lines: Vec<Line> = panel
            .series
            .iter()
            .map(|point| {
                let mut spans = vec![Span::raw(format!("{:<6}", point.time))];
                for vendor in Vendor::ALL {
                    let value = point.value(vendor);
                    spans.push(Span::styled(
                        bar(value as f64, 100.0, 8),
                        Style::default().fg(vendor.brand_color()),
                    ));
                    spans.push(Span::raw(format!(" {:>3}% ", value)));
                }
                Line::from(spans)
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(
            Span::raw(reading_label("Peak utilization", panel.peak.as_ref())).fg(Color::Red),
        ));
        lines.push(Line::from(
            Span::raw(reading_label("Lowest utilization", panel.lowest.as_ref())).fg(Color::Green),
        ));

        let legend = Vendor::ALL
            .iter()
            .map(|v| Span::styled(format!(" {} ", v.name()), Style::default().fg(v.brand_color())))
            .collect::<Vec<_>>();
        lines.insert(0, Line::from(legend));

        frame.render_widget(
            Paragraph::new(lines).block(section("GPU Utilization by Vendor (24h)")),
            area,
        );
    }

    fn draw_heatmap(&self, frame: &mut Frame, area: Rect, panel: &UtilizationPanel) {
        let mut lines: Vec<Line> = Vec::new();
        for row in panel.heatmap_rows() {
            let labels = row
                .iter()
                .map(|cell| Span::raw(format!("{:^5}", cell.label())).dim())
                .collect::<Vec<_>>();
            let values = row
                .iter()
                .map(|cell| {
                    Span::styled(
                        format!("{:^5}", format!("{}%", cell.value)),
                        Style::default()
                            .bg(cell.level.background())
                            .fg(cell.level.foreground()),
                    )
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(labels));
            lines.push(Line::from(values));
        }

        lines.push(Line::from(""));
        let legend = [
            (HeatLevel::Idle, "<50%"),
            (HeatLevel::Low, "51-60%"),
            (HeatLevel::Moderate, "61-70%"),
            (HeatLevel::Elevated, "71-80%"),
            (HeatLevel::High, "81-90%"),
            (HeatLevel::Saturated, ">90%"),
        ]
        .into_iter()
        .flat_map(|(level, label)| {
            [
                Span::styled("  ", Style::default().bg(level.background())),
                Span::raw(format!(" {}  ", label)).dim(),
            ]
        })
        .collect::<Vec<_>>();
        lines.push(Line::from(legend));

        frame.render_widget(
            Paragraph::new(lines).block(section("Utilization Heatmap by Datacenter Rack")),
            area,
        );
    }

    fn draw_underutilized(&self, frame: &mut Frame, area: Rect, panel: &UtilizationPanel) {
        let rows: Vec<Row> = panel
            .underutilized
            .iter()
            .map(|rack| {
                Row::new(vec![
                    Cell::from(rack.rack_id.clone()),
                    Cell::from(rack.gpu_type.clone()),
                    Cell::from(format!("{:.1}%", rack.utilization))
                        .style(Style::default().fg(Color::Yellow)),
                    Cell::from(format!(">{}h", rack.idle_hours)),
                    Cell::from(format!("{} ({})", rack.candidate.name(), rack.candidate_jobs)),
                ])
            })
            .collect();

        let header = Row::new(vec!["RACK", "GPU TYPE", "UTIL", "IDLE", "CANDIDATE JOBS"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Length(10),
            Constraint::Length(17),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(14),
        ];

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section("Underutilized Resources")),
            area,
        );
    }

    fn draw_memory(&self, frame: &mut Frame, area: Rect, panel: &UtilizationPanel) {
        let lines: Vec<Line> = panel
            .memory
            .iter()
            .flat_map(|usage| {
                let percent = usage.used_percent();
                [
                    Line::from(vec![
                        Span::raw(format!("{:<7}", usage.vendor.name())).bold(),
                        Span::raw(format!(
                            "{:.0} TB used / {:.0} TB total",
                            usage.used_tb,
                            usage.used_tb + usage.free_tb
                        ))
                        .dim(),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            bar(percent as f64, 100.0, 24),
                            Style::default().fg(usage.vendor.brand_color()),
                        ),
                        Span::raw(format!(" {}%", percent)),
                    ]),
                ]
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(section("GPU Memory Utilization by Vendor")),
            area,
        );
    }
}

impl Component for UtilizationComponent {
    type Props = UtilizationPanel;

    fn draw(&mut self, frame: &mut Frame, area: Rect, panel: &UtilizationPanel) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(5),  // Vendor summaries
            Constraint::Length(13), // Series + heatmap
            Constraint::Min(8),     // Underutilized + memory
        ])
        .split(area);

        for (summary, card) in panel
            .vendor_summaries
            .iter()
            .zip(columns(layout[0], panel.vendor_summaries.len()))
        {
            draw_card(
                frame,
                card,
                &format!("{} Avg. Utilization", summary.vendor.name()),
                &format!("{:.1}%", summary.average),
                &format!("{} from last week", format_signed_percent(summary.weekly_change)),
                summary.vendor.brand_color(),
            );
        }

        let middle = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[1]);
        self.draw_series(frame, middle[0], panel);
        self.draw_heatmap(frame, middle[1], panel);

        let bottom = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[2]);
        self.draw_underutilized(frame, bottom[0], panel);
        self.draw_memory(frame, bottom[1], panel);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use fleet_pilot_core::{Dashboard, Panel, TabId};

    #[test]
    fn test_reading_label() {
        let reading = UtilizationReading {
            time: "16:00".to_string(),
            vendor: Vendor::Nvidia,
            value: 92,
        };
        assert_eq!(
            reading_label("Peak utilization", Some(&reading)),
            "Peak utilization at 16:00 - 92% (NVIDIA)"
        );
        assert_eq!(reading_label("Lowest", None), "Lowest: no data");
    }

    #[test]
    fn test_utilization_renders_heatmap_and_readings() {
        let mut dashboard = Dashboard::new();
        dashboard.select_tab(TabId::Utilization);
        let Some(Panel::Utilization(panel)) = dashboard.panel() else {
            panic!("expected utilization panel");
        };

        let mut component = UtilizationComponent::new();
        let screen = render(200, 32, |frame| {
            let area = frame.area();
            component.draw(frame, area, &panel).unwrap();
        });

        assert!(screen.contains("Peak utilization at 16:00 - 92% (NVIDIA)"));
        assert!(screen.contains("Lowest utilization at 04:00 - 59% (Intel)"));
        assert!(screen.contains("4-10"));
        assert!(screen.contains("East-A12"));
    }
}
