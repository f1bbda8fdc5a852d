use std::time::Duration;

use crate::heatmap::HeatmapConfig;
use crate::score::AggregationStrategy;

/// Fixed search parameters; not user-controlled per call.
pub const DEFAULT_TOP_K: usize = 2500;
pub const DEFAULT_SOFTMAX_TEMPERATURE: f32 = 0.01;

/// Quiet period for the shared radius-drag debounce timer.
pub const QUIET_PERIOD_MS: u64 = 1000;

/// Display-side intensity multiplier applied when preparing heatmap points.
/// Kept out of the aggregator so aggregation stays a pure average.
pub const INTENSITY_MULTIPLIER: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchTuning {
    pub top_k: usize,
    pub softmax_temperature: f32,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            softmax_temperature: DEFAULT_SOFTMAX_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub tuning: SearchTuning,
    pub quiet_period: Duration,
    /// Bounded timeout on collaborator calls; expiry counts as a request
    /// failure.
    pub request_timeout: Duration,
    pub intensity_multiplier: f32,
    pub heatmap: HeatmapConfig,
    pub strategy: AggregationStrategy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tuning: SearchTuning::default(),
            quiet_period: Duration::from_millis(QUIET_PERIOD_MS),
            request_timeout: Duration::from_secs(10),
            intensity_multiplier: INTENSITY_MULTIPLIER,
            heatmap: HeatmapConfig::default(),
            strategy: AggregationStrategy::default(),
        }
    }
}
