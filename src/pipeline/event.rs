use crate::error::PipelineError;
use crate::filters::AmenityId;
use crate::model::{ExtractedFilters, SearchResponse};

use super::epoch::RequestEpoch;

/// Everything the session reacts to: user input plus collaborator
/// completions. Completions arrive over the same channel as input, so a
/// single owner processes them in arrival order with no locking.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    ExtractionCompleted {
        outcome: Result<ExtractedFilters, PipelineError>,
    },
    /// Tagged with the epoch issued at dispatch; the session drops it if a
    /// newer request has been issued since.
    SearchCompleted {
        epoch: RequestEpoch,
        outcome: Result<SearchResponse, PipelineError>,
    },
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keystroke-level edit; mutates state only, never fires a request.
    QueryEdited(String),
    /// Explicit submit of the current query text.
    QuerySubmitted,
    RadiusChanged { amenity: AmenityId, value: f32 },
    Toggled { amenity: AmenityId },
    /// Heatmap display sliders (overlay radius / opacity).
    ViewChanged { radius: f32, opacity: f32 },
}
