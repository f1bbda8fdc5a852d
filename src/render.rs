use tracing::info;

use crate::heatmap::{HeatPoint, HeatmapConfig, HeatmapRenderer};

/// Console realization of the render effect for the demo binary. A real
/// frontend would swap in a map-overlay implementation here.
pub struct LogRenderer;

impl HeatmapRenderer for LogRenderer {
    fn draw(&mut self, points: &[HeatPoint], config: &HeatmapConfig) {
        let peak = points.iter().map(|p| p.weight).fold(0.0f32, f32::max);
        info!(
            points = points.len(),
            radius = config.radius(),
            opacity = config.opacity(),
            peak,
            "heatmap updated"
        );
    }
}
