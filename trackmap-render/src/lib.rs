/*!
# Trackmap Rendering

Turns a [`Frame`](trackmap_core::Frame) into paint calls on a [`Surface`].

## Architecture

1. **Layout** happens in `trackmap-core`; a frame is plain data in pixels.
2. **Painting** walks the frame once: tick marks and labels, then one
   glyph per feature, track by track.
3. **Surfaces** receive stroke/fill/text primitives. [`SvgSurface`]
   collects them into an SVG document.
*/

pub mod surface;
pub mod paint;
pub mod svg;

pub use surface::{Stroke, Surface, TextAnchor, TextStyle};
pub use paint::{block_arrow, Painter};
pub use svg::{SvgExporter, SvgSurface};

/// Colours and fonts used when painting a frame
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub background_color: String,
    pub major_tick_color: String,
    pub minor_tick_color: String,
    pub half_tick_color: String,
    pub label_color: String,
    pub gene_color: String,
    pub protein_color: String,
    pub other_color: String,
    pub outline_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub show_feature_names: bool,
    pub show_footer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            major_tick_color: "black".to_string(),
            minor_tick_color: "rgb(55,55,55)".to_string(),
            half_tick_color: "rgb(10,10,10)".to_string(),
            label_color: "black".to_string(),
            gene_color: "rgb(63,128,205)".to_string(),
            protein_color: "#99ccff".to_string(),
            other_color: "#b0b0b0".to_string(),
            outline_color: "rgb(40,40,40)".to_string(),
            font_family: "arial".to_string(),
            font_size: 13,
            show_feature_names: true,
            show_footer: false,
            title: None,
            provenance_comment: None,
        }
    }
}
