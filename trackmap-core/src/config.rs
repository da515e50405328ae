//! Chart configuration
//!
//! One immutable value per chart, split into named sections. Every field
//! has a serde default so partial TOML/JSON documents deserialize.

use serde::{Deserialize, Serialize};
use crate::error::{LayoutError, LayoutResult};
use crate::types::{Coord, CoordRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Pixel width available for the coordinate range
    #[serde(default = "default_display_width")]
    pub display_width: u32,

    /// Vertical gap between stacked tracks, in pixels
    #[serde(default = "default_track_spacing")]
    pub track_spacing_px: u32,

    #[serde(default)]
    pub scale: ScaleConfig,

    #[serde(default)]
    pub tick: TickConfig,

    #[serde(default)]
    pub glyph: GlyphConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Snap the range outward to major tick boundaries
    #[serde(default = "default_true")]
    pub auto: bool,

    /// Enable pretty scale planning (tick selection and snapping)
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Draw the scale band; the range is still computed when off
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Coord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Coord>,

    /// Height of the tick band in pixels
    #[serde(default = "default_scale_size")]
    pub size_px: u32,

    #[serde(default)]
    pub font: ScaleFont,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleFont {
    #[serde(default = "default_scale_font_size")]
    pub size_px: u32,

    #[serde(default = "default_font_family")]
    pub family: String,

    /// Space kept between two neighbouring tick labels
    #[serde(default = "default_label_buffer")]
    pub buffer_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Pick the major interval automatically and abbreviate labels
    #[serde(default = "default_true")]
    pub auto: bool,

    /// Major interval in coordinate units (seed for auto selection)
    #[serde(default = "default_major_size")]
    pub major_size: Coord,

    #[serde(default = "default_minor_size")]
    pub minor_size: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphConfig {
    #[serde(default = "default_track_height")]
    pub track_height: u32,

    #[serde(default = "default_roundness")]
    pub roundness: u32,

    #[serde(default = "default_glyph_text_size")]
    pub text_size_px: u32,

    #[serde(default = "default_font_family")]
    pub text_family: String,
}

// Default value functions
fn default_true() -> bool { true }
fn default_display_width() -> u32 { 800 }
fn default_track_spacing() -> u32 { 5 }
fn default_scale_size() -> u32 { 15 }
fn default_scale_font_size() -> u32 { 15 }
fn default_font_family() -> String { "arial".to_string() }
fn default_label_buffer() -> u32 { 4 }
fn default_major_size() -> Coord { 10 }
fn default_minor_size() -> Coord { 1 }
fn default_track_height() -> u32 { 50 }
fn default_roundness() -> u32 { 6 }
fn default_glyph_text_size() -> u32 { 13 }

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            display_width: default_display_width(),
            track_spacing_px: default_track_spacing(),
            scale: ScaleConfig::default(),
            tick: TickConfig::default(),
            glyph: GlyphConfig::default(),
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            auto: true,
            pretty: true,
            visible: true,
            min: None,
            max: None,
            size_px: default_scale_size(),
            font: ScaleFont::default(),
        }
    }
}

impl Default for ScaleFont {
    fn default() -> Self {
        Self {
            size_px: default_scale_font_size(),
            family: default_font_family(),
            buffer_px: default_label_buffer(),
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            auto: true,
            major_size: default_major_size(),
            minor_size: default_minor_size(),
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            track_height: default_track_height(),
            roundness: default_roundness(),
            text_size_px: default_glyph_text_size(),
            text_family: default_font_family(),
        }
    }
}

impl ChartConfig {
    pub fn with_width(display_width: u32) -> Self {
        Self {
            display_width,
            ..Self::default()
        }
    }

    /// Reject values the layout engine cannot work with.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.display_width == 0 {
            return Err(LayoutError::invalid_config("display_width must be positive"));
        }
        if self.tick.major_size < 1 {
            return Err(LayoutError::invalid_config("tick.major_size must be at least 1"));
        }
        if self.tick.minor_size < 1 {
            return Err(LayoutError::invalid_config("tick.minor_size must be at least 1"));
        }
        if self.glyph.track_height == 0 {
            return Err(LayoutError::invalid_config("glyph.track_height must be positive"));
        }
        if let (Some(min), Some(max)) = (self.scale.min, self.scale.max) {
            if max <= min {
                return Err(LayoutError::DegenerateRange { min, max });
            }
        }
        Ok(())
    }

    /// Height of the scale band: tick marks plus their labels.
    pub fn scale_band_height(&self) -> u32 {
        self.scale.size_px + self.scale.font.size_px
    }

    /// Explicit range, if both ends were supplied.
    pub fn explicit_range(&self) -> Option<CoordRange> {
        match (self.scale.min, self.scale.max) {
            (Some(min), Some(max)) => Some(CoordRange::new(min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.display_width, 800);
        assert_eq!(config.track_spacing_px, 5);
        assert_eq!(config.tick.major_size, 10);
        assert_eq!(config.tick.minor_size, 1);
        assert_eq!(config.scale.font.buffer_px, 4);
        assert_eq!(config.glyph.track_height, 50);
        assert_eq!(config.scale_band_height(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ChartConfig::with_width(0);
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig { .. })));

        config.display_width = 100;
        config.tick.minor_size = 0;
        assert!(config.validate().is_err());

        config.tick.minor_size = 1;
        config.scale.min = Some(50);
        config.scale.max = Some(50);
        assert!(matches!(config.validate(), Err(LayoutError::DegenerateRange { .. })));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let json = r#"{ "display_width": 640, "tick": { "auto": false, "major_size": 100 } }"#;
        let config: ChartConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.display_width, 640);
        assert!(!config.tick.auto);
        assert_eq!(config.tick.major_size, 100);
        assert_eq!(config.tick.minor_size, 1);
        assert!(config.scale.pretty);
        assert_eq!(config.explicit_range(), None);
    }
}
