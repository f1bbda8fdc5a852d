use crate::filters::FilterStore;
use crate::model::SearchResponse;

/// How active amenity vectors are combined into one intensity per result.
/// `UniformMean` is the baseline; `RadiusWeighted` is the extension point
/// that weights each amenity by its current slider radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationStrategy {
    #[default]
    UniformMean,
    RadiusWeighted,
}

/// Pure recombination: FilterState + latest accepted response -> one
/// intensity per result.
///
/// Score vectors are summed element-wise for every amenity that is both
/// present in the response AND currently active. A vector shorter than the
/// result set contributes 0 for its missing tail, so the output length
/// always equals `results.len()` and the renderer can never index out of
/// bounds. Zero contributors (or zero total radius under RadiusWeighted)
/// is a defined state: an all-zero array, not an error.
///
/// The active flags are read from the CURRENT store, not the request-time
/// snapshot: toggling a filter re-aggregates already-fetched vectors
/// without a new backend call.
pub fn combine_intensities(
    filters: &FilterStore,
    response: &SearchResponse,
    strategy: AggregationStrategy,
) -> Vec<f32> {
    let n = response.results.len();
    let mut acc = vec![0.0f32; n];
    let mut total_weight = 0.0f32;

    for (&amenity, scores) in &response.heatmap_scores {
        if !filters.is_active(amenity) {
            continue;
        }
        let weight = match strategy {
            AggregationStrategy::UniformMean => 1.0,
            AggregationStrategy::RadiusWeighted => filters.get(amenity).radius,
        };
        for (i, slot) in acc.iter_mut().enumerate() {
            *slot += weight * scores.get(i).copied().unwrap_or(0.0);
        }
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        // No active criteria: defined all-zero state.
        return vec![0.0; n];
    }

    for slot in &mut acc {
        *slot /= total_weight;
    }
    acc
}
