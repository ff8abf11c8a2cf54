//! Actions for the fleet-pilot TUI
//!
//! Actions represent events that can modify application state.

use fleet_pilot_core::TabId;

/// Actions that can be dispatched in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Quit,
    SelectTab(TabId),
    NextTab,
    PrevTab,
    ScrollUp,
    ScrollDown,

    // Data loading
    Refresh,

    // UI state
    Tick,
    Resize(u16, u16),
}
