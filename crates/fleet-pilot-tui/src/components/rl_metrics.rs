//! RL metrics component - policy performance versus the heuristic baseline

use crate::components::{Component, bar, columns, draw_card, section};
use crate::ui_ext::ImpactLevelExt;
use color_eyre::Result;
use fleet_pilot_core::router::RlMetricsPanel;
use fleet_pilot_core::{Comparison, format_signed_percent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
};

const CARD_COLORS: [Color; 4] = [Color::Magenta, Color::Green, Color::Blue, Color::Yellow];

#[derive(Default)]
pub struct RlMetricsComponent;

impl RlMetricsComponent {
    pub fn new() -> Self {
        Self
    }

    fn draw_daily(&self, frame: &mut Frame, area: Rect, panel: &RlMetricsPanel) {
        let rows: Vec<Row> = panel
            .daily
            .iter()
            .map(|day| {
                Row::new(vec![
                    Cell::from(day.time.clone()),
                    Cell::from(format!("{:.1}", day.reward)),
                    Cell::from(format!("{:.1}", day.baseline)),
                    Cell::from(format_signed_percent(day.improvement_percent))
                        .style(Style::default().fg(Color::Green)),
                ])
            })
            .collect();

        let header = Row::new(vec!["DAY", "RL (PPO)", "HEURISTIC", "GAIN"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let title = match panel.total_improvement {
            Some(total) => format!(
                "Reward Improvement - total {} since {}",
                format_signed_percent(total),
                panel.series.first().map(|p| p.time.as_str()).unwrap_or("start")
            ),
            None => "Reward Improvement".to_string(),
        };

        frame.render_widget(
            Table::new(rows, widths).header(header).block(section(&title)),
            area,
        );
    }

    fn comparison_lines(comparisons: &[Comparison], before: &str, after: &str) -> Vec<Line<'static>> {
        let max = comparisons
            .iter()
            .map(|c| c.before.max(c.after))
            .max()
            .unwrap_or(0) as f64;

        let mut lines = vec![Line::from(vec![
            Span::styled("■ ", Style::default().fg(Color::Gray)),
            Span::raw(before.to_string()).dim(),
            Span::raw("  "),
            Span::styled("■ ", Style::default().fg(Color::Magenta)),
            Span::raw(after.to_string()).dim(),
        ])];
        for comparison in comparisons {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<12}", comparison.name)),
                Span::styled(bar(comparison.before as f64, max, 10), Style::default().fg(Color::Gray)),
                Span::raw(format!(" {:>3}", comparison.before)),
            ]));
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(12)),
                Span::styled(bar(comparison.after as f64, max, 10), Style::default().fg(Color::Magenta)),
                Span::raw(format!(" {:>3}", comparison.after)),
                Span::raw(format!(" {}", format_signed_percent(comparison.change_percent()))).dim(),
            ]));
        }
        lines
    }

    fn draw_reward_actions(&self, frame: &mut Frame, area: Rect, panel: &RlMetricsPanel) {
        let rows: Vec<Row> = panel
            .reward_actions
            .iter()
            .map(|action| {
                Row::new(vec![
                    Cell::from(action.action.clone()),
                    Cell::from(format!("{:+.1}", action.avg_reward))
                        .style(Style::default().fg(Color::Green)),
                    Cell::from(format!("{:.1}%", action.frequency)),
                ])
            })
            .collect();

        let header = Row::new(vec!["ACTION", "AVG REWARD", "FREQUENCY"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(9),
        ];

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section("Reward Function Analysis")),
            area,
        );
    }

    fn draw_hyperparameters(&self, frame: &mut Frame, area: Rect, panel: &RlMetricsPanel) {
        let rows: Vec<Row> = panel
            .hyperparameters
            .iter()
            .map(|param| {
                Row::new(vec![
                    Cell::from(param.parameter.clone()),
                    Cell::from(param.value.clone()),
                    Cell::from(param.impact.label()).style(Style::default().fg(param.impact.color())),
                ])
            })
            .collect();

        let header = Row::new(vec!["PARAMETER", "VALUE", "IMPACT"])
            .style(Style::default().add_modifier(Modifier::DIM));

        let widths = [
            Constraint::Min(19),
            Constraint::Length(7),
            Constraint::Length(9),
        ];

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .block(section("Hyperparameter Impact")),
            area,
        );
    }

    fn draw_recommendations(&self, frame: &mut Frame, area: Rect, panel: &RlMetricsPanel) {
        let lines: Vec<Line> = panel
            .recommendations
            .iter()
            .map(|text| {
                Line::from(vec![
                    Span::raw("• ").fg(Color::Magenta),
                    Span::raw(text.clone()),
                ])
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(section("Recommendations")),
            area,
        );
    }
}

impl Component for RlMetricsComponent {
    type Props = RlMetricsPanel;

    fn draw(&mut self, frame: &mut Frame, area: Rect, panel: &RlMetricsPanel) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(5),  // Summary cards
            Constraint::Length(12), // Reward + comparisons
            Constraint::Min(7),     // Actions, hyperparameters, recommendations
        ])
        .split(area);

        for (i, (summary, card)) in panel
            .summary
            .iter()
            .zip(columns(layout[0], panel.summary.len()))
            .enumerate()
        {
            let accent = CARD_COLORS[i % CARD_COLORS.len()];
            draw_card(frame, card, &summary.title, &summary.value, &summary.detail, accent);
        }

        let middle = columns(layout[1], 3);
        self.draw_daily(frame, middle[0], panel);
        frame.render_widget(
            Paragraph::new(Self::comparison_lines(
                &panel.completion_comparison,
                "Before RL",
                "After RL",
            ))
            .block(section("Job Completion Time (relative)")),
            middle[1],
        );
        frame.render_widget(
            Paragraph::new(Self::comparison_lines(
                &panel.allocation_efficiency,
                "Heuristic",
                "RL Model",
            ))
            .block(section("Resource Allocation Efficiency")),
            middle[2],
        );

        let bottom = columns(layout[2], 3);
        self.draw_reward_actions(frame, bottom[0], panel);
        self.draw_hyperparameters(frame, bottom[1], panel);
        self.draw_recommendations(frame, bottom[2], panel);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use fleet_pilot_core::{Dashboard, Panel, TabId};

    #[test]
    fn test_comparison_lines_show_change() {
        let comparisons = vec![Comparison {
            name: "HPC".to_string(),
            before: 100,
            after: 84,
        }];
        let lines = RlMetricsComponent::comparison_lines(&comparisons, "Before", "After");
        assert_eq!(lines.len(), 3);
        let text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.ends_with("-16.0%"));
    }

    #[test]
    fn test_rl_panel_shows_total_improvement() {
        let mut dashboard = Dashboard::new();
        dashboard.select_tab(TabId::RlMetrics);
        let Some(Panel::RlMetrics(panel)) = dashboard.panel() else {
            panic!("expected rl metrics panel");
        };

        let mut component = RlMetricsComponent::new();
        let screen = render(200, 30, |frame| {
            let area = frame.area();
            component.draw(frame, area, &panel).unwrap();
        });

        assert!(screen.contains("total +95.8% since Day 1"));
        assert!(screen.contains("Job Throughput Gain"));
        assert!(screen.contains("Learning rate"));
    }
}
