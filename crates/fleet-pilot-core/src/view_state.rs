//! Navigation state and its reducer
//!
//! `ViewState` is a plain value. The only way to move it forward is
//! [`ViewState::reduce`], which takes the current state and an action and
//! returns the next state.

use std::fmt;

/// One of the five content tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Overview,
    Utilization,
    RlMetrics,
    Alerts,
    Settings,
}

impl TabId {
    /// All tabs in display order
    pub const ALL: [TabId; 5] = [
        TabId::Overview,
        TabId::Utilization,
        TabId::RlMetrics,
        TabId::Alerts,
        TabId::Settings,
    ];

    /// Stable identifier used by navigation
    pub fn id(&self) -> &'static str {
        match self {
            TabId::Overview => "overview",
            TabId::Utilization => "utilization",
            TabId::RlMetrics => "rl-metrics",
            TabId::Alerts => "alerts",
            TabId::Settings => "settings",
        }
    }

    /// Label shown in the tab bar
    pub fn title(&self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Utilization => "Utilization",
            TabId::RlMetrics => "RL Performance",
            TabId::Alerts => "Alerts",
            TabId::Settings => "Settings",
        }
    }

    /// Parse a navigation id, exact match only
    pub fn parse(id: &str) -> Option<TabId> {
        TabId::ALL.into_iter().find(|tab| tab.id() == id)
    }

    /// Zero-based position in the tab bar
    pub fn index(&self) -> usize {
        TabId::ALL
            .iter()
            .position(|tab| tab == self)
            .unwrap_or_default()
    }

    /// Tab at a zero-based position
    pub fn from_index(index: usize) -> Option<TabId> {
        TabId::ALL.get(index).copied()
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> TabId {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    /// Previous tab, wrapping around
    pub fn prev(&self) -> TabId {
        TabId::ALL[(self.index() + TabId::ALL.len() - 1) % TabId::ALL.len()]
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The tab the view is showing
///
/// Ids that are not one of the five tabs are kept verbatim so the router can
/// resolve them to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTab {
    Tab(TabId),
    Unrecognized(String),
}

impl ActiveTab {
    /// Interpret a navigation id without validating it
    pub fn from_id(id: &str) -> Self {
        match TabId::parse(id) {
            Some(tab) => ActiveTab::Tab(tab),
            None => ActiveTab::Unrecognized(id.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ActiveTab::Tab(tab) => tab.id(),
            ActiveTab::Unrecognized(id) => id,
        }
    }

    /// The recognized tab, if any
    pub fn tab(&self) -> Option<TabId> {
        match self {
            ActiveTab::Tab(tab) => Some(*tab),
            ActiveTab::Unrecognized(_) => None,
        }
    }
}

impl Default for ActiveTab {
    fn default() -> Self {
        ActiveTab::Tab(TabId::Overview)
    }
}

/// Transitions accepted by [`ViewState::reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetActiveTab(String),
    SetLoading(bool),
}

/// Navigation and loading state for one dashboard session
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::view_state::{TabId, ViewAction, ViewState};
///
/// let state = ViewState::default()
///     .reduce(ViewAction::SetActiveTab("alerts".into()))
///     .reduce(ViewAction::SetLoading(true));
///
/// assert_eq!(state.active_tab.tab(), Some(TabId::Alerts));
/// assert!(state.loading);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub active_tab: ActiveTab,
    pub loading: bool,
}

impl ViewState {
    /// Apply one action and return the next state
    #[must_use]
    pub fn reduce(self, action: ViewAction) -> ViewState {
        match action {
            ViewAction::SetActiveTab(id) => ViewState {
                active_tab: ActiveTab::from_id(&id),
                ..self
            },
            ViewAction::SetLoading(loading) => ViewState { loading, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, ActiveTab::Tab(TabId::Overview));
        assert!(!state.loading);
    }

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in TabId::ALL {
            assert_eq!(TabId::parse(tab.id()), Some(tab));
        }
        assert_eq!(TabId::parse("Overview"), None);
        assert_eq!(TabId::parse("rl_metrics"), None);
    }

    #[test]
    fn test_tab_titles() {
        let titles: Vec<&str> = TabId::ALL.iter().map(TabId::title).collect();
        assert_eq!(
            titles,
            ["Overview", "Utilization", "RL Performance", "Alerts", "Settings"]
        );
    }

    #[test]
    fn test_unrecognized_tab_kept_verbatim() {
        let state = ViewState::default().reduce(ViewAction::SetActiveTab("billing".into()));
        assert_eq!(state.active_tab, ActiveTab::Unrecognized("billing".into()));
        assert_eq!(state.active_tab.id(), "billing");
        assert_eq!(state.active_tab.tab(), None);
    }

    #[test]
    fn test_reduce_leaves_other_field_alone() {
        let state = ViewState::default()
            .reduce(ViewAction::SetLoading(true))
            .reduce(ViewAction::SetActiveTab("settings".into()));
        assert!(state.loading);

        let state = state.reduce(ViewAction::SetLoading(false));
        assert_eq!(state.active_tab.tab(), Some(TabId::Settings));
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(TabId::Overview.next(), TabId::Utilization);
        assert_eq!(TabId::Settings.next(), TabId::Overview);
        assert_eq!(TabId::Overview.prev(), TabId::Settings);
        assert_eq!(TabId::from_index(2), Some(TabId::RlMetrics));
        assert_eq!(TabId::from_index(5), None);
    }
}
