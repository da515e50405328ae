//! Tracks and the greedy first-fit allocator.
//!
//! Only the most recently added feature of each track is inspected, so
//! features must arrive in non-decreasing `position` order. Out-of-order
//! input is accepted but is not repacked, so it can use more tracks than
//! the overlap depth requires.

use std::sync::Arc;
use serde::Serialize;
use crate::coords::units_per_pixel;
use crate::types::{CoordRange, Feature};

/// Minimum horizontal gap between neighbouring features in one track.
pub const OVERLAP_GAP_PX: f64 = 3.0;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Track {
    features: Vec<Arc<Feature>>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn features(&self) -> &[Arc<Feature>] {
        &self.features
    }

    pub fn last(&self) -> Option<&Arc<Feature>> {
        self.features.last()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether `feature` can follow this track's last feature.
    pub fn accepts(&self, feature: &Feature, tolerance: f64) -> bool {
        match self.last() {
            Some(prev) => fits_after(prev, feature, tolerance),
            None => true,
        }
    }

    fn push(&mut self, feature: Arc<Feature>) {
        self.features.push(feature);
    }
}

/// Where a feature landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub track: usize,
    pub feature: Arc<Feature>,
}

pub fn fits_after(prev: &Feature, feature: &Feature, tolerance: f64) -> bool {
    feature.position as f64 - tolerance > prev.end() as f64
}

/// The 3 px gap in coordinate units. Zero when the range is unknown or
/// degenerate.
pub fn overlap_tolerance(range: Option<CoordRange>, display_width: u32) -> f64 {
    match range {
        Some(range) if !range.is_degenerate() && display_width > 0 => {
            OVERLAP_GAP_PX * units_per_pixel(range, display_width)
        }
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackAllocator {
    tracks: Vec<Track>,
}

impl TrackAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Lowest-indexed track that accepts `feature`.
    pub fn first_fit(&self, feature: &Feature, tolerance: f64) -> Option<usize> {
        self.tracks
            .iter()
            .position(|track| track.accepts(feature, tolerance))
    }

    /// Place `feature` in the first track that fits, opening a new track
    /// when none does. Never fails.
    pub fn place(&mut self, feature: Arc<Feature>, tolerance: f64) -> Placement {
        let index = match self.first_fit(&feature, tolerance) {
            Some(index) => index,
            None => {
                self.tracks.push(Track::new());
                log::debug!(
                    "opened track {} for feature at {}..{}",
                    self.tracks.len() - 1,
                    feature.position,
                    feature.end()
                );
                self.tracks.len() - 1
            }
        };
        log::trace!("placed feature at {} in track {}", feature.position, index);
        self.tracks[index].push(Arc::clone(&feature));
        Placement { track: index, feature }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(position: i64, length: i64) -> Arc<Feature> {
        Arc::new(Feature::gene(position, length, None))
    }

    #[test]
    fn test_fits_after_requires_gap() {
        let prev = Feature::gene(0, 100, None);
        assert!(!fits_after(&prev, &Feature::gene(100, 10, None), 0.0));
        assert!(fits_after(&prev, &Feature::gene(101, 10, None), 0.0));
        assert!(!fits_after(&prev, &Feature::gene(101, 10, None), 1.5));
        assert!(fits_after(&prev, &Feature::gene(102, 10, None), 1.5));
    }

    #[test]
    fn test_overlap_tolerance() {
        let range = CoordRange::new(0, 1000);
        assert_eq!(overlap_tolerance(Some(range), 500), 6.0);
        assert_eq!(overlap_tolerance(Some(CoordRange::new(5, 5)), 500), 0.0);
        assert_eq!(overlap_tolerance(None, 500), 0.0);
    }

    #[test]
    fn test_first_fit_prefers_lowest_track() {
        let mut alloc = TrackAllocator::new();
        assert_eq!(alloc.place(gene(0, 100), 0.0).track, 0);
        assert_eq!(alloc.place(gene(50, 100), 0.0).track, 1);
        assert_eq!(alloc.place(gene(60, 10), 0.0).track, 2);
        // both track 0 (ends 100) and track 2 (ends 70) fit; lowest wins
        assert_eq!(alloc.place(gene(200, 10), 0.0).track, 0);
        assert_eq!(alloc.tracks().len(), 3);
        assert_eq!(alloc.tracks()[0].len(), 2);
    }

    #[test]
    fn test_out_of_order_input_is_not_repacked() {
        let mut alloc = TrackAllocator::new();
        alloc.place(gene(100, 10), 0.0);
        // would share track 0 if it had arrived first
        assert_eq!(alloc.place(gene(0, 10), 0.0).track, 1);

        let mut sorted = TrackAllocator::new();
        sorted.place(gene(0, 10), 0.0);
        assert_eq!(sorted.place(gene(100, 10), 0.0).track, 0);
    }

    #[test]
    fn test_placement_returns_shared_handle() {
        let mut alloc = TrackAllocator::new();
        let f = gene(10, 5);
        let p = alloc.place(Arc::clone(&f), 0.0);
        assert!(Arc::ptr_eq(&p.feature, &f));
        assert!(Arc::ptr_eq(alloc.tracks()[0].last().unwrap(), &f));
    }
}
