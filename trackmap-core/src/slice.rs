//! Region selection for slicing a chart.

use std::sync::Arc;
use crate::track::Track;
use crate::types::{Coord, Feature};

/// Whether `feature` belongs in the window `[from, to]`.
pub fn in_window(feature: &Feature, from: Coord, to: Coord) -> bool {
    let start = feature.position;
    let end = feature.end();
    (from <= start && start <= to)
        || (from < end && end < to)
        || (start < from && end > to)
        || (start > from && end < to)
}

/// Features from every track that fall in the window, in ascending
/// position order (stable for equal positions).
pub fn select(tracks: &[Track], from: Coord, to: Coord) -> Vec<Arc<Feature>> {
    let mut selected: Vec<Arc<Feature>> = tracks
        .iter()
        .flat_map(|track| track.features().iter())
        .filter(|feature| in_window(feature, from, to))
        .cloned()
        .collect();
    selected.sort_by_key(|feature| feature.position);
    selected
}
