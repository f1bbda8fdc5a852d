use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ExtractedFilters;

/// Closed amenity set. The backend and the extraction model both key their
/// payloads by these ids, so the set is NOT user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityId {
    Bus,
    School,
    Store,
    Restaurant,
    Park,
    Nightlife,
}

impl AmenityId {
    pub const ALL: [AmenityId; 6] = [
        AmenityId::Bus,
        AmenityId::School,
        AmenityId::Store,
        AmenityId::Restaurant,
        AmenityId::Park,
        AmenityId::Nightlife,
    ];

    pub fn wire_id(self) -> &'static str {
        match self {
            AmenityId::Bus => "bus",
            AmenityId::School => "school",
            AmenityId::Store => "store",
            AmenityId::Restaurant => "restaurant",
            AmenityId::Park => "park",
            AmenityId::Nightlife => "nightlife",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.wire_id() == s)
    }

    fn index(self) -> usize {
        match self {
            AmenityId::Bus => 0,
            AmenityId::School => 1,
            AmenityId::Store => 2,
            AmenityId::Restaurant => 3,
            AmenityId::Park => 4,
            AmenityId::Nightlife => 5,
        }
    }
}

/// Radius sliders run 0..25 miles.
pub const MIN_RADIUS: f32 = 0.0;
pub const MAX_RADIUS: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmenityFilter {
    pub radius: f32,
    pub active: bool,
}

impl Default for AmenityFilter {
    fn default() -> Self {
        // Every amenity starts active with no radius until extraction or the
        // user sets one.
        Self {
            radius: 0.0,
            active: true,
        }
    }
}

/// Total mapping AmenityId -> filter. Every amenity always has an entry, so
/// lookups can never fall into a "missing key" default path.
///
/// The store is owned exclusively by the Session; everything else gets a
/// snapshot copy, never a live reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    entries: [AmenityFilter; 6],
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: AmenityId) -> AmenityFilter {
        self.entries[id.index()]
    }

    pub fn is_active(&self, id: AmenityId) -> bool {
        self.entries[id.index()].active
    }

    /// Clamps to [MIN_RADIUS, MAX_RADIUS]. Non-finite input is rejected and
    /// the prior value retained; returns whether the value was accepted.
    pub fn set_radius(&mut self, id: AmenityId, value: f32) -> bool {
        if !value.is_finite() {
            debug!(amenity = id.wire_id(), "rejecting non-finite radius");
            return false;
        }
        self.entries[id.index()].radius = value.clamp(MIN_RADIUS, MAX_RADIUS);
        true
    }

    /// Flips the active flag; returns the new state.
    pub fn toggle_active(&mut self, id: AmenityId) -> bool {
        let entry = &mut self.entries[id.index()];
        entry.active = !entry.active;
        entry.active
    }

    /// Applies an extraction result: every amenity present in the map gets
    /// its radius set and is forced active. Amenities the model did not
    /// mention keep their prior radius AND prior active flag.
    pub fn bulk_set_from_extraction(&mut self, extracted: &ExtractedFilters) {
        for (&id, &radius) in &extracted.filters {
            if self.set_radius(id, radius) {
                self.entries[id.index()].active = true;
            }
        }
    }

    /// The `{amenity: radius}` map sent to the search backend. Inactive
    /// amenities are omitted entirely, matching what the backend expects.
    pub fn active_filters(&self) -> HashMap<AmenityId, f32> {
        AmenityId::ALL
            .into_iter()
            .filter(|&id| self.is_active(id))
            .map(|id| (id, self.get(id).radius))
            .collect()
    }

    /// Read-only copy handed to anything outside the Session.
    pub fn snapshot(&self) -> FilterStore {
        self.clone()
    }
}

/// Free-text query plus the advisory city parsed out of it. The city is
/// metadata for the backend, not an input to any filtering logic here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub text: String,
    pub city: Option<String>,
}

impl QueryState {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }
}
