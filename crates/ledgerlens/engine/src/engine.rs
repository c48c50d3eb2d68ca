//! The Timeline Engine coordinator
//!
//! [`TimelineEngine`] owns the whole engine state: the loaded transaction
//! set, the view mode, the playback controller, the selection, and exactly
//! one live renderer. Subsystems stay pure; every state change funnels
//! through here and ends in a redraw of the [`RenderTarget`].

use crate::errors::{EngineResult, LoadError, SearchError, ServiceError};
use crate::export::ReportExporter;
use crate::graph::build_graph;
use crate::notify::NotificationHub;
use crate::parser::parse_records;
use crate::playback::PlaybackController;
use crate::render::force::ForceRenderer;
use crate::render::scatter::ScatterRenderer;
use crate::render::{Emphasis, LabelSpec, RenderTarget};
use crate::search;
use crate::service::{DataService, TimelineBatch};
use ledgerlens_types::engine_state::{
    Scenario, SearchScope, Selection, TimeQuantum, TimelineStats, ViewMode,
};
use ledgerlens_types::notification::Notification;
use ledgerlens_types::{AccountId, EngineConfig, PlaybackState, Transaction, TransactionId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Ticket for one in-flight load. Only the most recently issued ticket can
/// still apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    seq: u64,
    /// Scenario this load was issued for.
    pub scenario: Scenario,
    /// Window granularity this load was issued for.
    pub quantum: TimeQuantum,
}

/// How a completed load was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The batch replaced the loaded data set.
    Applied {
        /// Transactions now loaded.
        count: usize,
    },
    /// A newer load was issued in the meantime; this result was discarded.
    Superseded,
    /// The load failed; prior data and view are untouched.
    Failed(LoadError),
}

enum ActiveRenderer {
    Scatter(ScatterRenderer),
    Force(ForceRenderer),
}

/// Coordinator for the analysis views.
///
/// Construct one per drawing surface, then drive it with user operations
/// and a periodic [`tick`].
///
/// [`tick`]: TimelineEngine::tick
pub struct TimelineEngine {
    config: EngineConfig,
    service: Arc<dyn DataService>,
    exporter: Box<dyn ReportExporter>,
    target: Box<dyn RenderTarget>,
    notifications: NotificationHub,

    loaded: Vec<Transaction>,
    view_mode: ViewMode,
    active: ActiveRenderer,
    playback: PlaybackController,
    scenario: Scenario,
    quantum: TimeQuantum,
    selection: Option<Selection>,
    hovered_tx: Option<TransactionId>,
    hovered_node: Option<AccountId>,
    load_seq: u64,
}

impl TimelineEngine {
    /// Build an engine over its collaborators. Fails only on an invalid
    /// configuration.
    pub fn new(
        config: EngineConfig,
        service: Arc<dyn DataService>,
        exporter: Box<dyn ReportExporter>,
        target: Box<dyn RenderTarget>,
    ) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            active: ActiveRenderer::Scatter(ScatterRenderer::new(
                config.viewport,
                config.thresholds,
            )),
            playback: PlaybackController::new(config.playback),
            config,
            service,
            exporter,
            target,
            notifications: NotificationHub::new(),
            loaded: Vec::new(),
            view_mode: ViewMode::Timeline,
            scenario: Scenario::default(),
            quantum: TimeQuantum::default(),
            selection: None,
            hovered_tx: None,
            hovered_node: None,
            load_seq: 0,
        })
    }

    /// Issue a load ticket for the current scenario and window.
    ///
    /// Any ticket issued earlier is superseded from this point on; its
    /// result will be discarded by [`complete_load`].
    ///
    /// [`complete_load`]: TimelineEngine::complete_load
    pub fn begin_load(&mut self) -> LoadRequest {
        self.load_seq += 1;
        debug!(seq = self.load_seq, scenario = %self.scenario, "load issued");
        LoadRequest {
            seq: self.load_seq,
            scenario: self.scenario.clone(),
            quantum: self.quantum,
        }
    }

    /// Apply the result of a load. Last request wins: a stale ticket's
    /// result is discarded whole, whatever it carries.
    pub fn complete_load(
        &mut self,
        request: LoadRequest,
        result: Result<TimelineBatch, ServiceError>,
    ) -> LoadOutcome {
        if request.seq != self.load_seq {
            debug!(
                seq = request.seq,
                latest = self.load_seq,
                "stale load response discarded"
            );
            return LoadOutcome::Superseded;
        }

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => return self.fail_load(LoadError::Service(e)),
        };
        if batch.data.is_empty() {
            return self.fail_load(LoadError::EmptyBatch {
                scenario: request.scenario,
            });
        }

        let raw_count = batch.data.len();
        let parsed = parse_records(batch.data);
        if parsed.is_empty() {
            return self.fail_load(LoadError::MalformedBatch { count: raw_count });
        }

        let count = parsed.len();
        self.loaded = parsed;
        self.selection = None;
        self.hovered_tx = None;
        self.hovered_node = None;
        self.playback.set_total(count);
        self.rebuild_renderer();
        self.render();
        info!(count, scenario = %request.scenario, "transaction data loaded");
        self.notifications
            .publish(Notification::success(format!("Loaded {count} transactions")));
        LoadOutcome::Applied { count }
    }

    /// Fetch and apply data for a scenario through the data service.
    pub async fn load_data(&mut self, scenario: Scenario) -> LoadOutcome {
        self.scenario = scenario;
        let request = self.begin_load();
        let result = self
            .service
            .get_timeline_data(&request.scenario, request.quantum)
            .await;
        self.complete_load(request, result)
    }

    /// Change the load window and refetch the current scenario.
    pub async fn set_time_quantum(&mut self, quantum: TimeQuantum) -> LoadOutcome {
        self.quantum = quantum;
        self.load_data(self.scenario.clone()).await
    }

    fn fail_load(&mut self, error: LoadError) -> LoadOutcome {
        warn!(%error, "load failed; keeping previous data");
        self.notifications
            .publish(Notification::error(format!(
                "Failed to load transaction data: {error}"
            )));
        // placeholder over whatever was drawn; loaded data stays intact
        let (x, y) = self.config.viewport.center();
        self.target.draw_labels(&[LabelSpec {
            text: "Failed to load transaction data".to_string(),
            x,
            y,
            emphasis: Emphasis::Normal,
        }]);
        LoadOutcome::Failed(error)
    }

    /// Map an external speed multiplier onto the playback speed.
    pub fn set_playback_speed(&mut self, external: f64) {
        self.playback.set_speed(external);
    }

    /// Start or resume timeline playback. Ignored in the network view.
    pub fn play(&mut self, now: Duration) {
        if self.view_mode != ViewMode::Timeline {
            debug!("play ignored outside the timeline view");
            return;
        }
        self.playback.play(now);
    }

    /// Suspend playback at the current frame.
    pub fn pause(&mut self) {
        self.playback.pause();
    }

    /// Stop playback, clear the selection, and redraw everything.
    pub fn reset(&mut self) {
        self.playback.reset();
        self.selection = None;
        self.render();
    }

    /// Search the loaded transactions.
    ///
    /// An empty term or an empty result surfaces as a notification, never
    /// an error; a hit selects and highlights the first match.
    pub fn search_transactions(&mut self, term: &str, scope: SearchScope) -> Vec<Transaction> {
        let matches = match search::search(&self.loaded, term, scope) {
            Ok(matches) => matches,
            Err(SearchError::EmptyTerm) => {
                self.notifications
                    .publish(Notification::warning("Please enter a search term"));
                return Vec::new();
            }
        };

        match matches.first() {
            Some(first) => {
                self.selection = Some(Selection::Transaction(first.id.clone()));
                self.render();
                self.notifications.publish(Notification::success(format!(
                    "Found {} matching transactions",
                    matches.len()
                )));
            }
            None => {
                self.notifications
                    .publish(Notification::warning(format!(
                        "No transactions found for '{term}'"
                    )));
            }
        }
        matches
    }

    /// Switch between the timeline and network views.
    ///
    /// Resets playback to idle at frame zero, tears the active renderer
    /// down, then builds the other view from the current data. No playback
    /// progress or simulation from the previous view survives the switch.
    pub fn switch_view(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.playback.reset();
        match &mut self.active {
            ActiveRenderer::Scatter(r) => r.destroy(self.target.as_mut()),
            ActiveRenderer::Force(r) => r.destroy(self.target.as_mut()),
        }
        self.view_mode = mode;
        self.selection = None;
        self.hovered_tx = None;
        self.hovered_node = None;
        self.rebuild_renderer();
        self.render();
        info!(%mode, "view switched");
    }

    /// Hand the loaded data and its derived network to the report exporter.
    ///
    /// With nothing loaded this warns and skips the delegate entirely.
    pub fn export_report(&mut self) -> EngineResult<()> {
        if self.loaded.is_empty() {
            warn!("export requested with no data loaded");
            self.notifications
                .publish(Notification::warning("No data available to export"));
            return Ok(());
        }
        let graph = build_graph(&self.loaded, self.config.thresholds.network_flag);
        match self.exporter.export(&self.loaded, &graph, &self.scenario) {
            Ok(()) => {
                self.notifications
                    .publish(Notification::success("Report exported"));
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .publish(Notification::error(format!("Report export failed: {e}")));
                Err(e.into())
            }
        }
    }

    /// Select an element and re-render its highlight.
    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.render();
    }

    /// Drop any selection and re-render.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.render();
        }
    }

    /// Hover a scatter point.
    pub fn hover_transaction(&mut self, id: Option<TransactionId>) {
        if self.hovered_tx != id {
            self.hovered_tx = id;
            self.render();
        }
    }

    /// Hover a network node.
    pub fn hover_node(&mut self, id: Option<AccountId>) {
        if self.hovered_node != id {
            self.hovered_node = id;
            self.render();
        }
    }

    /// Drive the active view's frame loop.
    ///
    /// In the timeline view this advances playback when its deadline has
    /// elapsed; in the network view it steps the force simulation until it
    /// settles. Safe to call as often as the host likes.
    pub fn tick(&mut self, now: Duration) {
        match self.view_mode {
            ViewMode::Timeline => {
                if let Some(frame) = self.playback.tick(now) {
                    self.render();
                    if frame.completed {
                        info!(frame = frame.frame, "playback completed");
                        self.notifications
                            .publish(Notification::info("Playback completed"));
                    }
                }
            }
            ViewMode::Network => {
                if let ActiveRenderer::Force(renderer) = &mut self.active {
                    if renderer.tick() {
                        renderer.render(
                            self.selection.as_ref(),
                            self.hovered_node.as_ref(),
                            self.target.as_mut(),
                        );
                    }
                }
            }
        }
    }

    /// Summary statistics over the loaded data.
    pub fn stats(&self) -> TimelineStats {
        TimelineStats::from_transactions(&self.loaded)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.loaded
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn time_quantum(&self) -> TimeQuantum {
        self.quantum
    }

    /// The notification log and broadcast hub.
    pub fn notifications(&self) -> &NotificationHub {
        &self.notifications
    }

    fn rebuild_renderer(&mut self) {
        self.active = match self.view_mode {
            ViewMode::Timeline => ActiveRenderer::Scatter(ScatterRenderer::new(
                self.config.viewport,
                self.config.thresholds,
            )),
            ViewMode::Network => {
                let graph = build_graph(&self.loaded, self.config.thresholds.network_flag);
                ActiveRenderer::Force(ForceRenderer::new(
                    graph,
                    self.config.force,
                    &self.config.viewport,
                ))
            }
        };
    }

    /// Redraw the active view at its current state.
    fn render(&mut self) {
        match &self.active {
            ActiveRenderer::Scatter(renderer) => {
                renderer.render(
                    &self.loaded,
                    self.playback.visible(),
                    self.selection.as_ref(),
                    self.hovered_tx.as_ref(),
                    self.target.as_mut(),
                );
            }
            ActiveRenderer::Force(renderer) => {
                renderer.render(
                    self.selection.as_ref(),
                    self.hovered_node.as_ref(),
                    self.target.as_mut(),
                );
            }
        }
    }
}
