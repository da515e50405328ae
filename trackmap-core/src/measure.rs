//! Text measurement seam used to size tick labels.

/// Measures rendered text width. Implemented by whatever surface draws
/// the labels; layout only needs widths.
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, font_size_px: f64, font_family: &str) -> f64;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64, &str) -> f64,
{
    fn measure_width(&self, text: &str, font_size_px: f64, font_family: &str) -> f64 {
        self(text, font_size_px, font_family)
    }
}

/// Fixed advance per character, as a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        // Average Arial glyph advance
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, font_size_px: f64, _font_family: &str) -> f64 {
        text.chars().count() as f64 * font_size_px * self.advance_ratio
    }
}
