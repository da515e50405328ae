//! Walks a frame and issues paint calls.

use trackmap_core::{Feature, FeatureKind, Frame, Rect, Strand, TextMeasurer, TickKind};
use crate::surface::{Stroke, Surface, TextAnchor, TextStyle};
use crate::ExportConfig;

/// Outline of a feature glyph: an arrow pointing along the strand, or a
/// plain box when the strand is unknown. The head never exceeds half the
/// glyph height or the glyph width.
pub fn block_arrow(rect: &Rect, strand: Option<Strand>) -> Vec<(f64, f64)> {
    let Rect { x, y, width, height } = *rect;
    let head = (height / 2.0).min(width);
    let mid = y + height / 2.0;
    match strand {
        Some(Strand::Forward) => vec![
            (x, y),
            (x + width - head, y),
            (x + width, mid),
            (x + width - head, y + height),
            (x, y + height),
        ],
        Some(Strand::Reverse) => vec![
            (x + head, y),
            (x + width, y),
            (x + width, y + height),
            (x + head, y + height),
            (x, mid),
        ],
        None => vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ],
    }
}

pub struct Painter {
    config: ExportConfig,
}

impl Painter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Paint `frame` onto `surface`. `measurer` decides whether a feature
    /// name fits inside its glyph; pass the one the frame was laid out with.
    pub fn paint<S, M>(&self, frame: &Frame, measurer: &M, surface: &mut S)
    where
        S: Surface + ?Sized,
        M: TextMeasurer + ?Sized,
    {
        if frame.is_empty() {
            log::debug!("nothing to paint");
            return;
        }
        self.paint_scale(frame, surface);
        self.paint_tracks(frame, measurer, surface);
    }

    fn paint_scale<S: Surface + ?Sized>(&self, frame: &Frame, surface: &mut S) {
        let label_style = TextStyle {
            size: frame.label_font_px,
            family: frame.label_font_family.clone(),
            color: self.config.label_color.clone(),
            anchor: TextAnchor::Middle,
        };
        for tick in &frame.ticks {
            let color = match tick.kind {
                TickKind::Major => &self.config.major_tick_color,
                TickKind::Half => &self.config.half_tick_color,
                TickKind::Minor => &self.config.minor_tick_color,
            };
            surface.line(tick.x, tick.bottom, tick.x, tick.top, &Stroke::new(color.as_str(), 1.0));
            if let Some(label) = &tick.label {
                surface.text(tick.x, 0.0, label, &label_style);
            }
        }
    }

    fn paint_tracks<S, M>(&self, frame: &Frame, measurer: &M, surface: &mut S)
    where
        S: Surface + ?Sized,
        M: TextMeasurer + ?Sized,
    {
        let outline = Stroke::new(self.config.outline_color.as_str(), 1.0);
        let name_style = TextStyle {
            size: self.config.font_size as f64,
            family: self.config.font_family.clone(),
            color: self.config.label_color.clone(),
            anchor: TextAnchor::Middle,
        };

        for glyph in frame.glyphs() {
            let feature = &glyph.feature;
            let points = block_arrow(&glyph.rect, feature.strand);
            surface.polygon(&points, self.fill_for(feature), Some(&outline));
            surface.describe(&describe(feature));

            if !self.config.show_feature_names {
                continue;
            }
            if let Some(name) = &feature.name {
                let width = measurer.measure_width(name, name_style.size, &name_style.family);
                if width <= glyph.rect.width {
                    let cx = glyph.rect.x + glyph.rect.width / 2.0;
                    let ty = glyph.rect.y + (glyph.rect.height - name_style.size) / 2.0;
                    surface.text(cx, ty, name, &name_style);
                }
            }
        }
    }

    fn fill_for(&self, feature: &Feature) -> &str {
        match feature.kind {
            FeatureKind::Gene => &self.config.gene_color,
            FeatureKind::Protein => &self.config.protein_color,
            FeatureKind::Other(_) => &self.config.other_color,
        }
    }
}

fn describe(feature: &Feature) -> String {
    let strand = feature.strand.map(char::from).unwrap_or('.');
    match &feature.name {
        Some(name) => format!(
            "{} {} [{}-{}] {}",
            feature.kind.as_str(), name, feature.position, feature.end(), strand
        ),
        None => format!(
            "{} [{}-{}] {}",
            feature.kind.as_str(), feature.position, feature.end(), strand
        ),
    }
}
