use crate::model::{Coordinate, SearchResult};

/// Accepted renderer configuration domain.
pub const MIN_HEAT_RADIUS: f32 = 10.0;
pub const MAX_HEAT_RADIUS: f32 = 100.0;
pub const MIN_OPACITY: f32 = 0.1;
pub const MAX_OPACITY: f32 = 1.0;

const DEFAULT_HEAT_RADIUS: f32 = 40.0;
const DEFAULT_OPACITY: f32 = 0.8;

/// Renderer configuration, clamped on construction so the overlay never
/// receives an out-of-range radius or opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapConfig {
    radius: f32,
    opacity: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HEAT_RADIUS,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl HeatmapConfig {
    pub fn new(radius: f32, opacity: f32) -> Self {
        let radius = if radius.is_finite() {
            radius.clamp(MIN_HEAT_RADIUS, MAX_HEAT_RADIUS)
        } else {
            DEFAULT_HEAT_RADIUS
        };
        let opacity = if opacity.is_finite() {
            opacity.clamp(MIN_OPACITY, MAX_OPACITY)
        } else {
            DEFAULT_OPACITY
        };
        Self { radius, opacity }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// One cleaned `(coordinate, weight)` pair handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub coordinate: Coordinate,
    pub weight: f32,
}

/// External overlay. Implementations (re)draw the weighted layer and fit
/// the viewport to the point bounds. Callers must never invoke `draw` with
/// an empty point set: fitting bounds to nothing is undefined, so the
/// session skips the renderer entirely in that case.
pub trait HeatmapRenderer {
    fn draw(&mut self, points: &[HeatPoint], config: &HeatmapConfig);
}

/// Structured coordinates win; otherwise fall back to parsing the id
/// (format: "lat_lng"). Returns None when neither yields finite values.
pub fn resolve_coordinate(result: &SearchResult) -> Option<Coordinate> {
    if let Some(c) = result.coordinates {
        if c.lat.is_finite() && c.lng.is_finite() {
            return Some(c);
        }
    }
    let mut parts = result.id.splitn(2, '_');
    let lat: f64 = parts.next()?.parse().ok()?;
    let lng: f64 = parts.next()?.parse().ok()?;
    if lat.is_finite() && lng.is_finite() {
        Some(Coordinate { lat, lng })
    } else {
        None
    }
}

/// Zips results with their combined intensities, applies the display
/// multiplier, and drops anything without finite coordinates or a finite
/// weight. Results past the end of `intensities` weigh 0 (defensive, the
/// aggregator already guarantees matching lengths).
pub fn prepare_points(
    results: &[SearchResult],
    intensities: &[f32],
    multiplier: f32,
) -> Vec<HeatPoint> {
    results
        .iter()
        .enumerate()
        .filter_map(|(i, result)| {
            let coordinate = resolve_coordinate(result)?;
            let weight = intensities.get(i).copied().unwrap_or(0.0) * multiplier;
            if weight.is_finite() {
                Some(HeatPoint { coordinate, weight })
            } else {
                None
            }
        })
        .collect()
}
