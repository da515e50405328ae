//! Chart container: configuration, tracks and the entry points that
//! drive allocation, scale planning and slicing.

use std::sync::Arc;
use crate::config::ChartConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::frame::{self, Frame};
use crate::measure::TextMeasurer;
use crate::scale::{self, ScalePlan};
use crate::slice;
use crate::track::{overlap_tolerance, Placement, Track, TrackAllocator};
use crate::types::{Coord, CoordRange, Feature, Strand};

#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    allocator: TrackAllocator,
    /// Extent of every feature placed so far
    extent: Option<CoordRange>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> LayoutResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    pub fn with_width(display_width: u32) -> LayoutResult<Self> {
        Self::new(ChartConfig::with_width(display_width))
    }

    fn from_valid_config(config: ChartConfig) -> Self {
        Self {
            config,
            allocator: TrackAllocator::new(),
            extent: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn tracks(&self) -> &[Track] {
        self.allocator.tracks()
    }

    pub fn track_count(&self) -> usize {
        self.tracks().len()
    }

    pub fn feature_count(&self) -> usize {
        self.tracks().iter().map(Track::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Every placed feature, track by track.
    pub fn features(&self) -> impl Iterator<Item = &Arc<Feature>> {
        self.tracks().iter().flat_map(|track| track.features().iter())
    }

    /// Range as currently known: explicit `scale.min`/`scale.max` win over
    /// the extent of placed features.
    pub fn current_range(&self) -> Option<CoordRange> {
        let min = self.config.scale.min.or(self.extent.map(|e| e.min))?;
        let max = self.config.scale.max.or(self.extent.map(|e| e.max))?;
        Some(CoordRange::new(min, max))
    }

    /// Overwrite the explicit range, e.g. to keep a source range on a slice.
    pub fn set_range(&mut self, min: Coord, max: Coord) -> LayoutResult<()> {
        if max <= min {
            return Err(LayoutError::DegenerateRange { min, max });
        }
        self.config.scale.min = Some(min);
        self.config.scale.max = Some(max);
        Ok(())
    }

    pub fn units_per_pixel(&self) -> Option<f64> {
        self.current_range()
            .filter(|range| !range.is_degenerate())
            .map(|range| crate::coords::units_per_pixel(range, self.config.display_width))
    }

    /// Place a feature in the lowest track it fits in.
    ///
    /// Callers must add features in non-decreasing `position` order.
    pub fn add_feature(&mut self, feature: Feature) -> Placement {
        self.add_shared(Arc::new(feature))
    }

    pub fn add_shared(&mut self, feature: Arc<Feature>) -> Placement {
        let tolerance = overlap_tolerance(self.current_range(), self.config.display_width);
        let (start, end) = (feature.position, feature.end());
        let placement = self.allocator.place(feature, tolerance);
        match self.extent.as_mut() {
            Some(extent) => extent.include(start, end),
            None => self.extent = Some(CoordRange::new(start, end)),
        }
        placement
    }

    pub fn add_gene(&mut self, position: Coord, length: Coord, strand: Option<Strand>) -> Placement {
        self.add_feature(Feature::gene(position, length, strand))
    }

    pub fn add_protein(&mut self, position: Coord, length: Coord, strand: Option<Strand>) -> Placement {
        self.add_feature(Feature::protein(position, length, strand))
    }

    /// Add features in iteration order; returns how many were placed.
    pub fn load_features<I>(&mut self, features: I) -> usize
    where
        I: IntoIterator<Item = Feature>,
    {
        features
            .into_iter()
            .map(|feature| self.add_feature(feature))
            .count()
    }

    /// A new chart holding only the features in `[from, to]`, packed into
    /// fresh tracks. Display settings carry over; scale settings do not.
    pub fn slice(&self, from: Coord, to: Coord) -> Chart {
        let selected = slice::select(self.tracks(), from, to);
        let config = ChartConfig {
            display_width: self.config.display_width,
            track_spacing_px: self.config.track_spacing_px,
            glyph: self.config.glyph.clone(),
            ..ChartConfig::default()
        };
        let mut sliced = Chart::from_valid_config(config);
        for feature in selected {
            sliced.add_shared(feature);
        }
        log::debug!(
            "sliced {}..{}: {} of {} features in {} tracks",
            from,
            to,
            sliced.feature_count(),
            self.feature_count(),
            sliced.track_count()
        );
        sliced
    }

    /// Total height: scale band plus every track and its spacing.
    pub fn chart_height(&self) -> u32 {
        let per_track = self.config.track_spacing_px + self.config.glyph.track_height;
        self.config.scale_band_height() + per_track * self.track_count() as u32
    }

    /// Range to render before scale planning. `None` for an empty chart
    /// with no explicit range.
    pub fn render_range(&self) -> LayoutResult<Option<CoordRange>> {
        if !self.config.scale.auto && self.config.explicit_range().is_none() && !self.is_empty() {
            return Err(LayoutError::MissingRange);
        }
        match self.current_range() {
            None => Ok(None),
            Some(range) if range.is_degenerate() => Err(LayoutError::DegenerateRange {
                min: range.min,
                max: range.max,
            }),
            Some(range) => Ok(Some(range)),
        }
    }

    pub fn scale_plan<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> LayoutResult<Option<ScalePlan>> {
        Ok(self
            .render_range()?
            .map(|range| scale::plan(range, &self.config, measurer)))
    }

    /// Pure layout of the chart into drawable primitives.
    pub fn frame<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> LayoutResult<Frame> {
        frame::build(self, measurer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    #[test]
    fn test_three_features_need_two_tracks() {
        let mut chart = Chart::with_width(1000).unwrap();
        assert_eq!(chart.add_gene(0, 100, None).track, 0);
        assert_eq!(chart.add_gene(50, 100, None).track, 1);
        assert_eq!(chart.add_gene(120, 80, None).track, 0);
        assert_eq!(chart.track_count(), 2);
        assert_eq!(chart.feature_count(), 3);
    }

    #[test]
    fn test_tolerance_uses_range_known_at_placement() {
        // after [0,100) the range is 0..100 at 100px: 1 unit per pixel,
        // so a follower needs to start beyond 103
        let mut chart = Chart::with_width(100).unwrap();
        chart.add_gene(0, 100, None);
        assert_eq!(chart.add_gene(103, 10, None).track, 1);
        assert_eq!(chart.add_gene(104, 10, None).track, 0);
    }

    #[test]
    fn test_first_feature_tolerance_is_zero_on_degenerate_range() {
        let mut chart = Chart::with_width(100).unwrap();
        chart.add_gene(10, 0, None);
        assert_eq!(chart.units_per_pixel(), None);
        assert_eq!(chart.add_gene(11, 5, None).track, 0);
    }

    #[test]
    fn test_current_range_prefers_explicit_values() {
        let mut config = ChartConfig::with_width(500);
        config.scale.min = Some(-50);
        let mut chart = Chart::new(config).unwrap();
        assert_eq!(chart.current_range(), None);
        chart.add_gene(10, 90, None);
        assert_eq!(chart.current_range(), Some(CoordRange::new(-50, 100)));
        chart.set_range(0, 1000).unwrap();
        assert_eq!(chart.current_range(), Some(CoordRange::new(0, 1000)));
        assert!(chart.set_range(5, 5).is_err());
    }

    #[test]
    fn test_load_features_and_convenience_kinds() {
        let mut chart = Chart::with_width(800).unwrap();
        let placed = chart.load_features(vec![
            Feature::gene(0, 10, Some(Strand::Forward)),
            Feature::protein(100, 10, Some(Strand::Reverse)),
        ]);
        assert_eq!(placed, 2);
        let p = chart.add_protein(300, 20, None);
        assert_eq!(p.feature.kind, crate::types::FeatureKind::Protein);
    }

    #[test]
    fn test_chart_height() {
        let mut chart = Chart::with_width(800).unwrap();
        assert_eq!(chart.chart_height(), 30);
        chart.add_gene(0, 100, None);
        chart.add_gene(50, 100, None);
        assert_eq!(chart.chart_height(), 30 + 2 * 55);
    }

    #[test]
    fn test_slice_resets_scale_and_repacks() {
        let mut config = ChartConfig::with_width(640);
        config.scale.min = Some(0);
        config.scale.max = Some(10_000);
        config.track_spacing_px = 9;
        let mut chart = Chart::new(config).unwrap();
        chart.add_gene(0, 100, None);
        chart.add_gene(50, 100, None);
        chart.add_gene(500, 100, None);

        let sliced = chart.slice(400, 700);
        assert_eq!(sliced.feature_count(), 1);
        assert_eq!(sliced.track_count(), 1);
        assert_eq!(sliced.config().display_width, 640);
        assert_eq!(sliced.config().track_spacing_px, 9);
        assert_eq!(sliced.config().scale.min, None);
        assert_eq!(sliced.current_range(), Some(CoordRange::new(500, 600)));
    }

    #[test]
    fn test_slice_of_empty_window_is_empty() {
        let mut chart = Chart::with_width(800).unwrap();
        chart.add_gene(0, 10, None);
        let sliced = chart.slice(500, 600);
        assert!(sliced.is_empty());
        assert_eq!(sliced.track_count(), 0);
    }

    #[test]
    fn test_render_range_errors() {
        let mut config = ChartConfig::with_width(800);
        config.scale.auto = false;
        let mut chart = Chart::new(config).unwrap();
        assert!(matches!(chart.render_range(), Ok(None)));
        chart.add_gene(0, 10, None);
        assert!(matches!(chart.render_range(), Err(LayoutError::MissingRange)));

        let mut chart = Chart::with_width(800).unwrap();
        chart.add_gene(5, 0, None);
        assert!(matches!(
            chart.render_range(),
            Err(LayoutError::DegenerateRange { min: 5, max: 5 })
        ));
    }

    #[test]
    fn test_scale_plan_on_empty_chart_short_circuits() {
        let chart = Chart::with_width(800).unwrap();
        assert_eq!(chart.scale_plan(&MonospaceMeasurer::default()).unwrap(), None);
    }
}
