use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::PipelineError;
use crate::filters::{FilterStore, QueryState};
use crate::heatmap::{prepare_points, HeatPoint, HeatmapConfig, HeatmapRenderer};
use crate::model::{ExtractedFilters, SearchRequest, SearchResponse};
use crate::score::combine_intensities;
use crate::services::extract::ExtractService;
use crate::services::search::SearchService;

use super::debounce::{Debouncer, Trigger};
use super::epoch::{EpochCounter, RequestEpoch};
use super::event::{Event, InputEvent};

/// Work the step function wants done but must not do itself (network I/O,
/// rendering). The driver executes these; the step stays synchronous and
/// runs to completion without interleaving.
#[derive(Debug, Clone)]
pub enum SideEffect {
    DispatchExtraction {
        prompt: String,
    },
    /// Request body built from the fire-time snapshot, already tagged with
    /// its freshly issued epoch.
    DispatchSearch {
        epoch: RequestEpoch,
        request: SearchRequest,
    },
    RenderHeatmap {
        points: Vec<HeatPoint>,
        config: HeatmapConfig,
    },
}

/// One orchestration object per user session. Owns the filter store, the
/// debounce timer, and the epoch counter, so none of them is ambient
/// global state.
///
/// `handle_event` / `poll_timer` are the synchronous core: state in, side
/// effects out. All FilterState mutation and score aggregation happen
/// inside them, so no lock is needed; ordering races only exist between
/// collaborator completions, and those are settled by the epoch guard.
pub struct Session {
    store: FilterStore,
    query: QueryState,
    debouncer: Debouncer,
    epochs: EpochCounter,
    /// Last accepted response. Replaced wholesale, never merged: result
    /// identities are not stable across searches.
    latest: Option<SearchResponse>,
    last_error: Option<PipelineError>,
    view: HeatmapConfig,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: FilterStore::new(),
            query: QueryState::default(),
            debouncer: Debouncer::new(config.quiet_period),
            epochs: EpochCounter::new(),
            latest: None,
            last_error: None,
            view: config.heatmap,
            config,
        }
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn latest(&self) -> Option<&SearchResponse> {
        self.latest.as_ref()
    }

    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    pub fn current_epoch(&self) -> RequestEpoch {
        self.epochs.current()
    }

    pub fn view(&self) -> HeatmapConfig {
        self.view
    }

    /// Combined intensity for the latest accepted response under the
    /// CURRENT active set. Ephemeral: recomputed on every call, length
    /// always equals the result count.
    pub fn intensities(&self) -> Vec<f32> {
        match &self.latest {
            Some(response) => combine_intensities(&self.store, response, self.config.strategy),
            None => Vec::new(),
        }
    }

    /// Synchronous step: apply one event, return the effects to execute.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> Vec<SideEffect> {
        match event {
            Event::Input(input) => self.handle_input(input, now),
            Event::ExtractionCompleted { outcome } => self.handle_extraction(outcome, now),
            Event::SearchCompleted { epoch, outcome } => self.handle_search(epoch, outcome),
        }
    }

    /// Driver wake-up for the radius debounce deadline.
    pub fn poll_timer(&mut self, now: Instant) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        self.flush(now, &mut effects);
        effects
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    fn handle_input(&mut self, input: InputEvent, now: Instant) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        match input {
            InputEvent::QueryEdited(text) => {
                self.query.set_text(text);
            }
            InputEvent::QuerySubmitted => {
                let prompt = self.query.text.trim().to_string();
                if prompt.is_empty() {
                    return effects;
                }
                // Submit both paths: extraction for structured filters, and
                // an unconditional search with the current snapshot. If the
                // extraction result later fires its own search, the epoch
                // guard retires this one.
                effects.push(SideEffect::DispatchExtraction { prompt });
                self.debouncer.schedule(Trigger::TextSubmit, now);
            }
            InputEvent::RadiusChanged { amenity, value } => {
                // Rejected input (non-finite) neither corrupts state nor
                // arms the timer.
                if self.store.set_radius(amenity, value) {
                    self.debouncer.schedule(Trigger::RadiusDrag, now);
                }
            }
            InputEvent::Toggled { amenity } => {
                let active = self.store.toggle_active(amenity);
                debug!(amenity = amenity.wire_id(), active, "filter toggled");
                // Re-aggregate the already-fetched vectors first; the fresh
                // backend call follows on the same step.
                effects.extend(self.render_effect());
                self.debouncer.schedule(Trigger::Toggle, now);
            }
            InputEvent::ViewChanged { radius, opacity } => {
                self.view = HeatmapConfig::new(radius, opacity);
                effects.extend(self.render_effect());
            }
        }
        self.flush(now, &mut effects);
        effects
    }

    fn handle_extraction(
        &mut self,
        outcome: Result<ExtractedFilters, PipelineError>,
        now: Instant,
    ) -> Vec<SideEffect> {
        match outcome {
            Ok(extracted) => {
                info!(
                    city = extracted.city.as_deref().unwrap_or("-"),
                    filters = extracted.filters.len(),
                    "extraction applied"
                );
                if let Some(city) = &extracted.city {
                    self.query.set_city(city.clone());
                }
                self.store.bulk_set_from_extraction(&extracted);
                self.last_error = None;
                // Structured filters are in; refresh immediately.
                self.debouncer.schedule(Trigger::TextSubmit, now);
                let mut effects = Vec::new();
                self.flush(now, &mut effects);
                effects
            }
            Err(err) => {
                // FilterState stays untouched; the notice is the flag.
                warn!("extraction failed: {err}");
                self.last_error = Some(err);
                Vec::new()
            }
        }
    }

    fn handle_search(
        &mut self,
        epoch: RequestEpoch,
        outcome: Result<SearchResponse, PipelineError>,
    ) -> Vec<SideEffect> {
        // STALE REJECTION: a response for anything but the newest issued
        // request is a no-op, success or failure alike.
        if !self.epochs.is_current(epoch) {
            debug!(
                stale = epoch.0,
                current = self.epochs.current().0,
                "discarding superseded search response"
            );
            return Vec::new();
        }
        match outcome {
            Ok(response) => {
                info!(
                    epoch = epoch.0,
                    results = response.results.len(),
                    vectors = response.heatmap_scores.len(),
                    "search response accepted"
                );
                self.latest = Some(response);
                self.last_error = None;
                self.render_effect().into_iter().collect()
            }
            Err(err) => {
                // Keep showing the last good result set.
                warn!(epoch = epoch.0, "search failed: {err}");
                self.last_error = Some(err);
                Vec::new()
            }
        }
    }

    /// Commits a pending fire, if any: issue a fresh epoch and build the
    /// request from the state as it is NOW.
    fn flush(&mut self, now: Instant, effects: &mut Vec<SideEffect>) {
        if !self.debouncer.take_ready(now) {
            return;
        }
        let epoch = self.epochs.issue();
        let request = SearchRequest {
            query: self.query.text.clone(),
            top_k: self.config.tuning.top_k,
            softmax_temperature: self.config.tuning.softmax_temperature,
            filters: self.store.active_filters(),
        };
        debug!(epoch = epoch.0, filters = request.filters.len(), "dispatching search");
        effects.push(SideEffect::DispatchSearch { epoch, request });
    }

    /// Recombines and prepares the overlay points. Skips the renderer
    /// entirely when nothing survives coordinate cleaning: a bounds fit on
    /// an empty set is invalid, so no call at all is the correct outcome.
    fn render_effect(&self) -> Option<SideEffect> {
        let response = self.latest.as_ref()?;
        let intensities = combine_intensities(&self.store, response, self.config.strategy);
        let points = prepare_points(
            &response.results,
            &intensities,
            self.config.intensity_multiplier,
        );
        if points.is_empty() {
            debug!("no renderable points; skipping heatmap update");
            return None;
        }
        Some(SideEffect::RenderHeatmap {
            points,
            config: self.view,
        })
    }
}

/// Async driver loop: drains events, sleeps until the debounce deadline,
/// and executes side effects. Collaborator calls are spawned and report
/// back over the same channel, so the session itself never awaits I/O.
pub async fn run_session(
    mut session: Session,
    mut rx: mpsc::Receiver<Event>,
    search: SearchService,
    extract: ExtractService,
    mut renderer: Box<dyn HeatmapRenderer + Send>,
) {
    info!("session pipeline started");
    loop {
        let effects = match session.next_deadline() {
            Some(deadline) => {
                let sleep = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline));
                tokio::select! {
                    maybe = rx.recv() => match maybe {
                        Some(event) => session.handle_event(event, Instant::now()),
                        None => break,
                    },
                    _ = sleep => session.poll_timer(Instant::now()),
                }
            }
            None => match rx.recv().await {
                Some(event) => session.handle_event(event, Instant::now()),
                None => break,
            },
        };

        for effect in effects {
            match effect {
                SideEffect::DispatchExtraction { prompt } => extract.dispatch(prompt),
                SideEffect::DispatchSearch { epoch, request } => search.dispatch(epoch, request),
                SideEffect::RenderHeatmap { points, config } => renderer.draw(&points, &config),
            }
        }
    }
    info!("session pipeline stopped");
}
