use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filters::AmenityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// One ranked location from the search backend. `id` is the join key between
/// a result set and its score vectors; it is stable within one response but
/// NOT across responses, which is why result sets are always replaced
/// wholesale and never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    /// Backend may omit coordinates; they are then derivable from the id
    /// (format: "lat_lng").
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub score: f32,
}

/// Search backend response. Each score vector in `heatmap_scores` is aligned
/// by position with `results` and is only present for amenities that were
/// active in the request that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub heatmap_scores: HashMap<AmenityId, Vec<f32>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub softmax_temperature: f32,
    pub filters: HashMap<AmenityId, f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub prompt: String,
}

/// Structured output of the extraction collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedFilters {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub filters: HashMap<AmenityId, f32>,
}
