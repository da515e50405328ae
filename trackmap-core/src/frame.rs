//! Frame descriptor: everything a drawing surface needs for one render,
//! in pixels, with no drawing state carried between calls.

use std::sync::Arc;
use serde::Serialize;
use crate::chart::Chart;
use crate::config::ChartConfig;
use crate::coords::UnitConverter;
use crate::error::LayoutResult;
use crate::measure::TextMeasurer;
use crate::scale::{tick_text, ScalePlan, TickKind};
use crate::types::{Coord, Feature};

/// Space left of the first tick label.
pub const LABEL_MARGIN_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: Coord,
    pub kind: TickKind,
    pub x: f64,
    /// Upper end of the tick mark
    pub top: f64,
    /// Lower end of the tick mark, shared by all kinds
    pub bottom: f64,
    /// Present on major ticks only
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glyph {
    pub track: usize,
    pub rect: Rect,
    pub feature: Arc<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackLayout {
    pub index: usize,
    pub y: f64,
    pub height: f64,
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    /// Horizontal shift applied to every x so the first label is not cut off
    pub offset: f64,
    pub label_font_px: f64,
    pub label_font_family: String,
    pub plan: Option<ScalePlan>,
    pub ticks: Vec<Tick>,
    pub tracks: Vec<TrackLayout>,
}

impl Frame {
    fn empty(width: f64, height: f64, config: &ChartConfig) -> Self {
        Self {
            width,
            height,
            offset: 0.0,
            label_font_px: config.scale.font.size_px as f64,
            label_font_family: config.scale.font.family.clone(),
            plan: None,
            ticks: Vec::new(),
            tracks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_none()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.tracks.iter().flat_map(|track| track.glyphs.iter())
    }

    /// Topmost glyph under the pixel, later glyphs first.
    pub fn glyph_at(&self, x: f64, y: f64) -> Option<&Glyph> {
        self.tracks
            .iter()
            .filter(|track| y >= track.y && y <= track.y + track.height)
            .flat_map(|track| track.glyphs.iter().rev())
            .find(|glyph| glyph.rect.contains(x, y))
    }
}

pub fn build<M: TextMeasurer + ?Sized>(chart: &Chart, measurer: &M) -> LayoutResult<Frame> {
    let config = chart.config();
    let display_width = config.display_width as f64;

    let plan = match chart.scale_plan(measurer)? {
        Some(plan) => plan,
        None => {
            log::debug!("empty chart, nothing to lay out");
            return Ok(Frame::empty(display_width, chart.chart_height() as f64, config));
        }
    };

    let font = &config.scale.font;
    let min_label = tick_text(plan.range.min, config.tick.auto);
    let offset = measurer.measure_width(&min_label, font.size_px as f64, &font.family) / 2.0
        + LABEL_MARGIN_PX;
    let conv = UnitConverter::new(plan.range, config.display_width)?.with_offset(offset);

    let ticks = if config.scale.visible {
        let font_px = font.size_px as f64;
        let size_px = config.scale.size_px as f64;
        let bottom = font_px + size_px;
        plan.ticks()
            .into_iter()
            .map(|(position, kind)| {
                let (top, label) = match kind {
                    TickKind::Major => (font_px + 2.0, Some(tick_text(position, config.tick.auto))),
                    TickKind::Half => (font_px + size_px * 0.33, None),
                    TickKind::Minor => (font_px + size_px * 0.66, None),
                };
                Tick {
                    position,
                    kind,
                    x: conv.to_pixel(position),
                    top,
                    bottom,
                    label,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let spacing = config.track_spacing_px as f64;
    let track_height = config.glyph.track_height as f64;
    let mut y = config.scale_band_height() as f64 + spacing;
    let mut tracks = Vec::with_capacity(chart.track_count());
    for (index, track) in chart.tracks().iter().enumerate() {
        let glyphs = track
            .features()
            .iter()
            .map(|feature| Glyph {
                track: index,
                rect: Rect {
                    x: conv.to_pixel(feature.position),
                    y,
                    width: conv.length_to_pixels(feature.length),
                    height: track_height,
                },
                feature: Arc::clone(feature),
            })
            .collect();
        tracks.push(TrackLayout {
            index,
            y,
            height: track_height,
            glyphs,
        });
        y += track_height + spacing;
    }

    Ok(Frame {
        width: display_width + 2.0 * offset,
        height: chart.chart_height() as f64,
        offset,
        label_font_px: font.size_px as f64,
        label_font_family: font.family.clone(),
        plan: Some(plan),
        ticks,
        tracks,
    })
}
