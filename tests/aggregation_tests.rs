use std::collections::HashMap;

use planit::filters::{AmenityId, FilterStore};
use planit::model::{SearchResponse, SearchResult};
use planit::score::{combine_intensities, AggregationStrategy};

fn result(id: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        coordinates: None,
        caption: String::new(),
        score: 0.0,
    }
}

fn response(results: &[&str], scores: &[(AmenityId, &[f32])]) -> SearchResponse {
    SearchResponse {
        query: "test".to_string(),
        results: results.iter().map(|id| result(id)).collect(),
        heatmap_scores: scores
            .iter()
            .map(|(id, v)| (*id, v.to_vec()))
            .collect::<HashMap<_, _>>(),
    }
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-6, "index {i}: got {a}, expected {e}");
    }
}

#[test]
fn test_two_active_amenities_average() {
    let store = FilterStore::new();
    let resp = response(
        &["r1", "r2"],
        &[
            (AmenityId::Bus, &[0.8, 0.2]),
            (AmenityId::Park, &[0.4, 0.6]),
        ],
    );

    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_close(&combined, &[0.6, 0.4]);
}

#[test]
fn test_deactivation_recombines_without_new_response() {
    let mut store = FilterStore::new();
    let resp = response(
        &["r1", "r2"],
        &[
            (AmenityId::Bus, &[0.8, 0.2]),
            (AmenityId::Park, &[0.4, 0.6]),
        ],
    );

    store.toggle_active(AmenityId::Bus);
    // Same response, current active set: only park contributes now.
    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_close(&combined, &[0.4, 0.6]);
}

#[test]
fn test_zero_active_yields_zero_vector() {
    let mut store = FilterStore::new();
    for id in AmenityId::ALL {
        store.toggle_active(id);
    }
    let resp = response(&["r1", "r2", "r3"], &[(AmenityId::Bus, &[0.9, 0.5, 0.1])]);

    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_eq!(combined, vec![0.0, 0.0, 0.0], "no active criteria is a defined zero state");
}

#[test]
fn test_short_vector_padded_with_zero() {
    let store = FilterStore::new();
    // Park vector is one short of the result count.
    let resp = response(
        &["r1", "r2", "r3"],
        &[
            (AmenityId::Bus, &[0.6, 0.6, 0.6]),
            (AmenityId::Park, &[0.2, 0.2]),
        ],
    );

    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_eq!(combined.len(), resp.results.len(), "output must match result count");
    assert_close(&combined, &[0.4, 0.4, 0.3]);
}

#[test]
fn test_inactive_vector_in_response_ignored() {
    let mut store = FilterStore::new();
    store.toggle_active(AmenityId::Bus);
    // Response still carries the bus vector from the request that produced it.
    let resp = response(
        &["r1"],
        &[(AmenityId::Bus, &[1.0]), (AmenityId::Park, &[0.5])],
    );

    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_close(&combined, &[0.5]);
}

#[test]
fn test_aggregation_is_idempotent() {
    let store = FilterStore::new();
    let resp = response(
        &["r1", "r2"],
        &[
            (AmenityId::Bus, &[0.8, 0.2]),
            (AmenityId::School, &[0.1, 0.9]),
        ],
    );

    let first = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    let second = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert_eq!(first, second, "pure function of its inputs");
}

#[test]
fn test_empty_results_yield_empty_output() {
    let store = FilterStore::new();
    let resp = response(&[], &[(AmenityId::Bus, &[])]);
    let combined = combine_intensities(&store, &resp, AggregationStrategy::UniformMean);
    assert!(combined.is_empty());
}

#[test]
fn test_radius_weighted_strategy() {
    let mut store = FilterStore::new();
    store.set_radius(AmenityId::Bus, 10.0);
    store.set_radius(AmenityId::Park, 5.0);
    let resp = response(
        &["r1"],
        &[(AmenityId::Bus, &[1.0]), (AmenityId::Park, &[0.4])],
    );

    let combined = combine_intensities(&store, &resp, AggregationStrategy::RadiusWeighted);
    // (10*1.0 + 5*0.4) / 15 = 0.8
    assert_close(&combined, &[0.8]);
}

#[test]
fn test_radius_weighted_zero_total_radius() {
    let store = FilterStore::new(); // all radii default to 0
    let resp = response(&["r1", "r2"], &[(AmenityId::Bus, &[0.7, 0.3])]);

    let combined = combine_intensities(&store, &resp, AggregationStrategy::RadiusWeighted);
    assert_eq!(combined, vec![0.0, 0.0], "zero total weight degenerates to zeros");
}
