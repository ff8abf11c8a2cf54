//! fleet-pilot-core: view/state engine for fleet-pilot
//!
//! This crate owns everything the dashboard knows: entity types, the built-in
//! datasets, navigation state, telemetry refresh and the mapping from the
//! active tab to panel content. It does not depend on any TUI framework, so
//! the whole engine is testable without a terminal.
//!
//! # Modules
//!
//! - [`types`] - Domain entities (metrics, vendors, datacenters, alerts, RL data)
//! - [`dataset`] - Replace-only entity sequences
//! - [`datasets`] - Built-in reference data and the [`Entities`] bundle
//! - [`view_state`] - Active tab and loading flag with a pure reducer
//! - [`normalizer`] - Stats payload validation and mapping onto live entities
//! - [`fetcher`] - Telemetry sources and the fetch deadline
//! - [`refresh_state`] - Generation tokens, outstanding fetches, stale signal
//! - [`dashboard`] - The controller tying it all together
//! - [`router`] - Active tab to panel resolution, including derived values
//! - [`indicators`] - Health and status indicators for consistent UI representation
//! - [`formatting`] - Counts, percentages, ages and timestamps
//! - [`errors`] - User-friendly refresh error messages
//! - [`constants`] - Shared thresholds, vendor colors and refresh presets

pub mod constants;
pub mod dashboard;
pub mod dataset;
pub mod datasets;
pub mod errors;
pub mod fetcher;
pub mod formatting;
pub mod indicators;
pub mod normalizer;
pub mod refresh_state;
pub mod router;
pub mod types;
pub mod view_state;

// Re-export commonly used items at crate root
pub use dashboard::{Dashboard, RefreshOutcome, RefreshTicket};
pub use dataset::{DataSource, Dataset};
pub use datasets::Entities;
pub use errors::*;
pub use fetcher::{StaticSource, TelemetrySource, fetch_with_deadline};
pub use formatting::*;
pub use indicators::*;
pub use normalizer::{ActiveJobsProvider, FixedActiveJobs, LiveEntities, PayloadError};
pub use router::Panel;
pub use types::*;
pub use view_state::{ActiveTab, TabId, ViewAction, ViewState};

// Dataset constructors are not re-exported at root; their names collide with
// the entity types. Use fleet_pilot_core::datasets::* explicitly.
