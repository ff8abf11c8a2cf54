//! Dashboard controller
//!
//! [`Dashboard`] owns the view state, every dataset and the refresh
//! bookkeeping. It is driven from a single task: the caller dispatches a
//! refresh with [`Dashboard::begin_refresh`], runs the fetch wherever it
//! likes, and hands the result back through [`Dashboard::finish_refresh`].

use crate::datasets::Entities;
use crate::dataset::DataSource;
use crate::errors::RefreshError;
use crate::fetcher::{TelemetrySource, fetch_with_deadline};
use crate::normalizer::{ActiveJobsProvider, FixedActiveJobs, LiveEntities, normalize_value};
use crate::refresh_state::RefreshState;
use crate::router::{self, Panel};
use crate::view_state::{TabId, ViewAction, ViewState};
use fleet_rs::FleetError;
use fleet_rs::config::DEFAULT_TIMEOUT_SECS;
use serde_json::Value;
use std::time::Duration;

/// Handle for one dispatched refresh
///
/// Consumed by [`Dashboard::finish_refresh`], so each dispatch settles once.
///
/// ```compile_fail
/// use fleet_pilot_core::Dashboard;
///
/// let mut dashboard = Dashboard::new();
/// let ticket = dashboard.begin_refresh();
/// dashboard.finish_refresh(ticket, Err(fleet_rs::FleetError::Status(500)));
/// dashboard.finish_refresh(ticket, Err(fleet_rs::FleetError::Status(500)));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a finished refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Live values were replaced
    Applied,
    /// The fetch or the payload failed; live values are unchanged
    Rejected(RefreshError),
    /// A newer refresh was dispatched after this one; result discarded
    Stale,
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied)
    }
}

/// View/state engine for one dashboard session
pub struct Dashboard {
    view: ViewState,
    entities: Entities,
    refresh: RefreshState,
    active_jobs: Box<dyn ActiveJobsProvider>,
    deadline: Duration,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Start from the built-in datasets on the overview tab
    pub fn new() -> Self {
        Self {
            view: ViewState::default(),
            entities: Entities::default(),
            refresh: RefreshState::new(),
            active_jobs: Box::new(FixedActiveJobs::default()),
            deadline: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a different source for the Active Jobs value
    pub fn with_active_jobs(mut self, provider: impl ActiveJobsProvider + 'static) -> Self {
        self.active_jobs = Box::new(provider);
        self
    }

    /// Set the deadline used by [`Dashboard::refresh`]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn is_loading(&self) -> bool {
        self.view.loading
    }

    pub fn is_stale(&self) -> bool {
        self.refresh.is_stale()
    }

    fn dispatch(&mut self, action: ViewAction) {
        self.view = std::mem::take(&mut self.view).reduce(action);
    }

    /// Switch tabs; the id is not validated
    pub fn set_active_tab(&mut self, id: &str) {
        self.dispatch(ViewAction::SetActiveTab(id.to_string()));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(ViewAction::SetLoading(loading));
    }

    pub fn select_tab(&mut self, tab: TabId) {
        self.set_active_tab(tab.id());
    }

    /// Move to the next tab; an unrecognized tab moves to the first
    pub fn next_tab(&mut self) {
        let next = self.view.active_tab.tab().map_or(TabId::Overview, |t| t.next());
        self.select_tab(next);
    }

    /// Move to the previous tab; an unrecognized tab moves to the last
    pub fn prev_tab(&mut self) {
        let prev = self.view.active_tab.tab().map_or(TabId::Settings, |t| t.prev());
        self.select_tab(prev);
    }

    /// Panel for the active tab
    pub fn panel(&self) -> Option<Panel> {
        router::resolve(&self.view, &self.entities)
    }

    /// Dispatch a refresh and set loading
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let generation = self.refresh.begin();
        tracing::debug!("Refresh {} dispatched", generation);
        self.set_loading(true);
        RefreshTicket { generation }
    }

    /// Settle a dispatched refresh with its fetch result
    ///
    /// Only the latest dispatched refresh may change anything. On success
    /// the overview metrics and vendor distribution are replaced together.
    /// On failure they are left as they were and the stale signal is raised.
    /// Loading is cleared once no refresh is outstanding.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Value, FleetError>,
    ) -> RefreshOutcome {
        if !self.refresh.is_pending(ticket.generation) {
            tracing::debug!("Refresh {} already settled", ticket.generation);
            return RefreshOutcome::Stale;
        }
        let is_latest = self.refresh.settle(ticket.generation);

        let outcome = if !is_latest {
            tracing::debug!(
                "Discarding refresh {} (latest is {})",
                ticket.generation,
                self.refresh.latest_generation()
            );
            RefreshOutcome::Stale
        } else {
            match result
                .map_err(RefreshError::from)
                .and_then(|value| {
                    normalize_value(value, self.active_jobs.as_ref()).map_err(RefreshError::from)
                }) {
                Ok(live) => {
                    self.apply(live);
                    self.refresh.record_success();
                    tracing::info!("Refresh {} applied", ticket.generation);
                    RefreshOutcome::Applied
                }
                Err(e) => {
                    tracing::warn!("Refresh {} failed: {}", ticket.generation, e);
                    self.refresh.record_failure(&e);
                    RefreshOutcome::Rejected(e)
                }
            }
        };

        if !self.refresh.is_loading() {
            self.set_loading(false);
        }
        outcome
    }

    fn apply(&mut self, live: LiveEntities) {
        self.entities
            .overview_metrics
            .replace(live.overview_metrics, DataSource::Network);
        self.entities
            .vendor_distribution
            .replace(live.vendor_distribution, DataSource::Network);
    }

    /// Fetch from `source` and settle in one call
    pub async fn refresh<S: TelemetrySource>(&mut self, source: &S) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = fetch_with_deadline(source, self.deadline).await;
        self.finish_refresh(ticket, result)
    }

    /// Sum of the vendor counts currently shown
    pub fn vendor_total(&self) -> u64 {
        self.entities
            .vendor_distribution
            .items()
            .iter()
            .map(|v| v.count)
            .sum()
    }
}
