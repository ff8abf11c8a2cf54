//! Header component - title, refresh status and the tab bar

use crate::components::Component;
use color_eyre::Result;
use fleet_pilot_core::{Dashboard, TabId, format_timestamp};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

/// Title bar, status line and tabs
pub struct HeaderComponent {
    /// Where refreshes come from, e.g. the stats URL
    source: String,
}

impl HeaderComponent {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    fn status(dashboard: &Dashboard) -> (String, Color) {
        let state = dashboard.refresh_state();
        if dashboard.is_loading() {
            (state.status_text().to_string(), Color::Cyan)
        } else if dashboard.is_stale() {
            ("STALE".to_string(), Color::Red)
        } else if let Some(at) = state.last_success() {
            (format!("updated {}", format_timestamp(at)), Color::Green)
        } else {
            ("built-in data".to_string(), Color::DarkGray)
        }
    }
}

impl Component for HeaderComponent {
    type Props = Dashboard;

    fn draw(&mut self, frame: &mut Frame, area: Rect, dashboard: &Dashboard) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Error detail
            Constraint::Length(2), // Tabs
        ])
        .split(area);

        let (status, status_color) = Self::status(dashboard);
        let title = Paragraph::new(Line::from(vec![
            Span::raw(" fleet-pilot ").bold().fg(Color::Cyan),
            Span::raw("GPU Load Balancer Dashboard").dim(),
            Span::raw("  "),
            Span::raw(self.source.clone()).dim(),
            Span::raw("  "),
            Span::styled(status, Style::default().fg(status_color).add_modifier(Modifier::BOLD)),
        ]));
        frame.render_widget(title, layout[0]);

        if let Some(failure) = dashboard.refresh_state().last_error() {
            let detail = Paragraph::new(Line::from(vec![
                Span::raw(format!(" {}: ", failure.category.label())).fg(Color::Red),
                Span::raw(failure.message.clone()),
                Span::raw(format!(
                    "  (at {}, {} failed)",
                    format_timestamp(failure.at),
                    dashboard.refresh_state().failure_count()
                ))
                .dim(),
            ]));
            frame.render_widget(detail, layout[1]);
        }

        let titles = TabId::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));
        let mut tabs = Tabs::new(titles)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .divider(Span::raw("|").dim())
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        if let Some(tab) = dashboard.view().active_tab.tab() {
            tabs = tabs.select(tab.index());
        }
        frame.render_widget(tabs, layout[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render;
    use fleet_rs::FleetError;

    #[test]
    fn test_header_shows_tabs() {
        let mut header = HeaderComponent::new("offline");
        let dashboard = Dashboard::new();
        let screen = render(120, 4, |frame| {
            let area = frame.area();
            header.draw(frame, area, &dashboard).unwrap();
        });
        assert!(screen.contains("1 Overview"));
        assert!(screen.contains("3 RL Performance"));
        assert!(screen.contains("built-in data"));
    }

    #[test]
    fn test_header_shows_stale_signal() {
        let mut header = HeaderComponent::new("http://localhost:8000/overview_stats");
        let mut dashboard = Dashboard::new();
        let ticket = dashboard.begin_refresh();
        dashboard.finish_refresh(ticket, Err(FleetError::Status(503)));

        let screen = render(140, 4, |frame| {
            let area = frame.area();
            header.draw(frame, area, &dashboard).unwrap();
        });
        assert!(screen.contains("STALE"));
        assert!(screen.contains("Stats endpoint returned HTTP 503"));
    }
}
