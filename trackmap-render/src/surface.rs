//! Immediate-mode drawing primitives.

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new<S: Into<String>>(color: S, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub family: String,
    pub color: String,
    pub anchor: TextAnchor,
}

/// A drawing target. Coordinates are absolute pixels; no transform
/// state is kept between calls.
pub trait Surface {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke);

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: Option<&Stroke>);

    /// `y` is the top of the text box.
    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);

    /// Tooltip-style annotation attached to the last shape, if supported.
    fn describe(&mut self, _description: &str) {}
}
