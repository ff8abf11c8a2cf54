//! Component system for fleet-pilot TUI
//!
//! Based on the ratatui Component template pattern. Components never compute
//! anything about the fleet; they draw the props handed to them, which are
//! either the dashboard itself (header) or a panel resolved by the router.

pub mod alerts;
pub mod header;
pub mod overview;
pub mod rl_metrics;
pub mod settings;
pub mod utilization;

pub use alerts::AlertsComponent;
pub use header::HeaderComponent;
pub use overview::OverviewComponent;
pub use rl_metrics::RlMetricsComponent;
pub use settings::SettingsComponent;
pub use utilization::UtilizationComponent;

use crate::action::Action;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Trait for UI components
pub trait Component {
    /// What the component draws
    type Props: ?Sized;

    /// Handle key events and optionally produce actions
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Update the component state based on an action
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render the component to the frame
    fn draw(&mut self, frame: &mut Frame, area: Rect, props: &Self::Props) -> Result<()>;
}

/// Bordered block with a padded title
pub(crate) fn section(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

/// Headline card: title, large value, one detail line
pub(crate) fn draw_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    detail: &str,
    accent: Color,
) {
    let card = Paragraph::new(vec![
        Line::from(Span::raw(title.to_string()).dim()),
        Line::from(Span::raw(value.to_string()).bold().fg(accent)),
        Line::from(Span::raw(detail.to_string()).dim()),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(card, area);
}

/// Split `area` into `count` equal columns
pub(crate) fn columns(area: Rect, count: usize) -> Vec<Rect> {
    let constraints = (0..count).map(|_| Constraint::Fill(1));
    Layout::horizontal(constraints).split(area).to_vec()
}

/// Horizontal bar of block characters, `value` out of `max`
pub(crate) fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return String::new();
    }
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    /// Render into an in-memory terminal and return the screen as text
    pub fn render<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width.max(1) as usize;
        let mut out = String::new();
        for row in buffer.content().chunks(width) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }
}
