//! Alerts component - scrollable alert list

use crate::action::Action;
use crate::components::{Component, section};
use crate::ui_ext::health_indicator;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use fleet_pilot_core::{HasHealth, format_age};
use fleet_pilot_core::router::AlertsPanel;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

/// Alert list with a selection cursor
pub struct AlertsComponent {
    table_state: TableState,
}

impl Default for AlertsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertsComponent {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self { table_state }
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn scroll(&mut self, delta: isize) {
        let current = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(current.saturating_add_signed(delta)));
    }
}

impl Component for AlertsComponent {
    type Props = AlertsPanel;

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Ok(Some(Action::ScrollDown)),
            KeyCode::Char('k') | KeyCode::Up => Ok(Some(Action::ScrollUp)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll(1),
            Action::ScrollUp => self.scroll(-1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, panel: &AlertsPanel) -> Result<()> {
        if panel.alerts.is_empty() {
            frame.render_widget(
                Paragraph::new("  No active alerts").block(section("Recent Alerts")),
                area,
            );
            return Ok(());
        }

        // Clamp the cursor to the current list
        let last = panel.alerts.len() - 1;
        let selected = self.table_state.selected().unwrap_or(0).min(last);
        self.table_state.select(Some(selected));

        let rows: Vec<Row> = panel
            .alerts
            .iter()
            .map(|alert| {
                let (symbol, color) = health_indicator(&alert.severity);
                Row::new(vec![
                    Cell::from(format!("{} {}", symbol, alert.severity.label()))
                        .style(Style::default().fg(color)),
                    Cell::from(alert.message.clone()),
                    Cell::from(format_age(alert.age))
                        .style(Style::default().add_modifier(Modifier::DIM)),
                ])
            })
            .collect();

        let header = Row::new(vec!["SEVERITY", "MESSAGE", "RAISED"])
            .style(Style::default().add_modifier(Modifier::DIM))
            .bottom_margin(1);

        let widths = [
            Constraint::Length(10),
            Constraint::Min(30),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(section(&format!(
                "Recent Alerts ({}, {} need attention)",
                panel.alerts.len(),
                panel.alerts.iter().filter(|a| a.severity.needs_attention()).count()
            )))
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
        Ok(())
    }
}
