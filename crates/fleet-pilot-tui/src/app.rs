//! Application state and main loop

use crate::action::Action;
use crate::components::{
    AlertsComponent, Component, HeaderComponent, OverviewComponent, RlMetricsComponent,
    SettingsComponent, UtilizationComponent,
};
use crate::tui::{self, TerminalSession};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use fleet_pilot_core::{
    Dashboard, FixedActiveJobs, Panel, RefreshOutcome, RefreshTicket, StaticSource, TabId,
    TelemetrySource, fetch_with_deadline,
};
use fleet_rs::{DashboardConfig, FleetError, StatsClient};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// Where refreshes fetch from
#[derive(Clone)]
pub enum Feed {
    Live(StatsClient),
    Offline(StaticSource),
}

impl TelemetrySource for Feed {
    fn fetch(&self) -> impl Future<Output = Result<Value, FleetError>> + Send {
        async move {
            match self {
                Feed::Live(client) => client.fetch().await,
                Feed::Offline(source) => source.fetch().await,
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Feed::Live(client) => client.describe(),
            Feed::Offline(source) => source.describe(),
        }
    }
}

/// Results from async operations
#[derive(Debug)]
enum AsyncResult {
    Telemetry {
        ticket: RefreshTicket,
        result: std::result::Result<Value, FleetError>,
    },
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    should_quit: bool,
    dashboard: Dashboard,
    feed: Feed,
    auto_refresh: Option<Duration>,
    header: HeaderComponent,
    overview: OverviewComponent,
    utilization: UtilizationComponent,
    rl_metrics: RlMetricsComponent,
    alerts: AlertsComponent,
    settings: SettingsComponent,
    /// Tick rate for the event loop
    tick_rate: Duration,
    /// Channel for async action results
    action_rx: mpsc::UnboundedReceiver<AsyncResult>,
    action_tx: mpsc::UnboundedSender<AsyncResult>,
}

impl App {
    /// Build the app from a loaded config
    ///
    /// `offline` swaps the stats endpoint for a fixed payload.
    pub fn new(config: &DashboardConfig, offline: bool) -> Result<Self> {
        let feed = if offline {
            Feed::Offline(StaticSource::reference())
        } else {
            Feed::Live(StatsClient::from_config(config)?)
        };
        Ok(Self::with_feed(config, feed))
    }

    pub fn with_feed(config: &DashboardConfig, feed: Feed) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let dashboard = Dashboard::new()
            .with_deadline(config.timeout())
            .with_active_jobs(FixedActiveJobs(config.active_jobs.clone()));

        Self {
            should_quit: false,
            dashboard,
            header: HeaderComponent::new(feed.describe()),
            feed,
            auto_refresh: config.auto_refresh(),
            overview: OverviewComponent::new(),
            utilization: UtilizationComponent::new(),
            rl_metrics: RlMetricsComponent::new(),
            alerts: AlertsComponent::new(),
            settings: SettingsComponent::new(config.auto_refresh_secs),
            tick_rate: Duration::from_millis(100),
            action_rx,
            action_tx,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut session = TerminalSession::enter()?;
        self.main_loop(&mut session).await
    }

    /// Main event loop
    async fn main_loop(&mut self, session: &mut TerminalSession) -> Result<()> {
        loop {
            session.terminal().draw(|frame| self.draw(frame))?;

            // Handle events with timeout
            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = self.handle_key_event(key)? {
                            self.handle_action(action)?;
                        }
                    }
                    Event::Resize(w, h) => {
                        self.handle_action(Action::Resize(w, h))?;
                    }
                    _ => {}
                }
            } else {
                self.handle_action(Action::Tick)?;
            }

            self.drain_results();

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Map a key press to an action
    ///
    /// Global keys take precedence; anything else goes to the active panel.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                TabId::from_index(index).map(Action::SelectTab)
            }
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }

        match self.dashboard.view().active_tab.tab() {
            Some(TabId::Alerts) => self.alerts.handle_key_event(key),
            _ => Ok(None),
        }
    }

    /// Handle an action
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::SelectTab(tab) => self.dashboard.select_tab(tab),
            Action::NextTab => self.dashboard.next_tab(),
            Action::PrevTab => self.dashboard.prev_tab(),
            Action::ScrollUp | Action::ScrollDown => {
                if let Some(next_action) = self.alerts.update(&action)? {
                    self.handle_action(next_action)?;
                }
            }
            Action::Refresh => {
                tracing::info!("Refresh requested");
                self.spawn_refresh();
            }
            Action::Tick => {
                if self
                    .dashboard
                    .refresh_state()
                    .should_auto_refresh(self.auto_refresh)
                {
                    tracing::debug!("Auto-refresh due");
                    self.spawn_refresh();
                }
            }
            Action::Resize(_w, _h) => {
                // Terminal will automatically resize on next draw
            }
        }
        Ok(())
    }

    /// Dispatch a refresh on a background task
    fn spawn_refresh(&mut self) {
        let ticket = self.dashboard.begin_refresh();
        let feed = self.feed.clone();
        let deadline = self.dashboard.deadline();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = fetch_with_deadline(&feed, deadline).await;
            // Receiver is gone only when the app has exited
            let _ = tx.send(AsyncResult::Telemetry { ticket, result });
        });
    }

    /// Apply every finished refresh (non-blocking)
    fn drain_results(&mut self) {
        while let Ok(result) = self.action_rx.try_recv() {
            self.apply_result(result);
        }
    }

    fn apply_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Telemetry { ticket, result } => {
                match self.dashboard.finish_refresh(ticket, result) {
                    RefreshOutcome::Applied => {
                        tracing::info!("Telemetry refreshed");
                    }
                    RefreshOutcome::Rejected(e) => {
                        tracing::error!("Telemetry refresh failed: {}", e);
                    }
                    RefreshOutcome::Stale => {}
                }
            }
        }
    }

    /// Wait for the next refresh result and apply it
    pub async fn next_result(&mut self) -> bool {
        match self.action_rx.recv().await {
            Some(result) => {
                self.apply_result(result);
                true
            }
            None => false,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

        if let Err(e) = self.header.draw(frame, layout[0], &self.dashboard) {
            tracing::warn!("Header draw failed: {}", e);
        }

        let content = match self.dashboard.panel() {
            Some(Panel::Overview(panel)) => self.overview.draw(frame, layout[1], &panel),
            Some(Panel::Utilization(panel)) => self.utilization.draw(frame, layout[1], &panel),
            Some(Panel::RlMetrics(panel)) => self.rl_metrics.draw(frame, layout[1], &panel),
            Some(Panel::Alerts(panel)) => self.alerts.draw(frame, layout[1], &panel),
            Some(Panel::Settings(form)) => self.settings.draw(frame, layout[1], &form),
            None => {
                draw_empty(frame, layout[1], self.dashboard.view().active_tab.id());
                Ok(())
            }
        };
        if let Err(e) = content {
            tracing::warn!("Panel draw failed: {}", e);
        }

        draw_footer(frame, layout[2]);
    }
}

fn draw_empty(frame: &mut Frame, area: Rect, tab_id: &str) {
    let message = Paragraph::new(Line::from(
        Span::raw(format!("Nothing to show for '{}'", tab_id)).dim(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(message, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let keys = [
        ("[1-5]", " tab"),
        ("[tab]", " next"),
        ("[r]", " refresh"),
        ("[j/k]", " scroll alerts"),
        ("[q]", " quit"),
    ];
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::raw(format!(" {}", key)).fg(Color::Yellow),
                Span::raw(*label).dim(),
                Span::raw(" "),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn offline_app() -> App {
        App::new(&DashboardConfig::default(), true).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(action) = app.handle_key_event(key).unwrap() {
            app.handle_action(action).unwrap();
        }
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let mut app = offline_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.dashboard().view().active_tab.tab(), Some(TabId::Alerts));
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.dashboard().view().active_tab.tab(), Some(TabId::Alerts));
    }

    #[test]
    fn test_tab_keys_cycle() {
        let mut app = offline_app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.dashboard().view().active_tab.tab(), Some(TabId::Settings));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard().view().active_tab.tab(), Some(TabId::Overview));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = offline_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_scroll_keys_only_on_alerts_tab() {
        let mut app = offline_app();
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.handle_key_event(key).unwrap(), None);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.handle_key_event(key).unwrap(), Some(Action::ScrollDown));
    }

    #[tokio::test]
    async fn test_offline_refresh_round_trip() {
        let mut app = offline_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.dashboard().is_loading());

        assert!(app.next_result().await);
        assert!(!app.dashboard().is_loading());
        assert!(!app.dashboard().is_stale());
        assert_eq!(app.dashboard().vendor_total(), 52_384);
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_apply_latest() {
        let config = DashboardConfig::default();
        let first = json!({
            "total_gpus": "1", "average_utilization": 1, "power_efficiency": 1,
            "companies": {"NVIDIA": 1, "AMD": 0, "INTEL": 0}
        });
        let mut app = App::with_feed(&config, Feed::Offline(StaticSource::new(first)));
        app.handle_action(Action::Refresh).unwrap();

        let second = json!({
            "total_gpus": "2", "average_utilization": 2, "power_efficiency": 2,
            "companies": {"NVIDIA": 2, "AMD": 0, "INTEL": 0}
        });
        app.feed = Feed::Offline(StaticSource::new(second));
        app.handle_action(Action::Refresh).unwrap();

        assert!(app.next_result().await);
        assert!(app.next_result().await);

        let metrics = app.dashboard().entities().overview_metrics.items();
        assert_eq!(metrics[0].value, "2");
        assert!(!app.dashboard().is_loading());
    }
}
