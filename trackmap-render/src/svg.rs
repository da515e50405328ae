/*!
# SVG Export

Collects paint calls into an SVG document and writes it out with an
optional title, provenance comment and footer.
*/

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use trackmap_core::{Frame, TextMeasurer};
use crate::paint::Painter;
use crate::surface::{Stroke, Surface, TextStyle};
use crate::ExportConfig;

/// Space reserved above the chart when a title is drawn.
const TITLE_BAND_PX: f64 = 24.0;
/// Space reserved below the chart for the footer line.
const FOOTER_BAND_PX: f64 = 18.0;

/// SVG surface: every primitive becomes one element.
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
    top_comments: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            top_comments: Vec::new(),
        }
    }

    pub fn add_background(&mut self, color: &str) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            fmt_num(self.width), fmt_num(self.height), escape_xml(color)
        ));
    }

    pub fn add_comment(&mut self, text: &str) {
        self.top_comments.push(text.to_string());
    }

    /// Open a group translated down by `dy` pixels.
    pub fn begin_group(&mut self, dy: f64) {
        self.elements.push(format!(r#"<g transform="translate(0 {})">"#, fmt_num(dy)));
    }

    pub fn end_group(&mut self) {
        self.elements.push("</g>".to_string());
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn finish(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height)
        ));
        for c in &self.top_comments {
            for line in c.lines() {
                // "--" is not allowed inside XML comments
                out.push_str(&format!("  <!-- {} -->\n", line.replace("--", "- -")));
            }
        }
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt_num(x1), fmt_num(y1), fmt_num(x2), fmt_num(y2),
            escape_xml(&stroke.color), fmt_num(stroke.width)
        ));
    }

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: Option<&Stroke>) {
        let points = points
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect::<Vec<_>>()
            .join(" ");
        let stroke = match stroke {
            Some(s) => format!(
                r#" stroke="{}" stroke-width="{}""#,
                escape_xml(&s.color), fmt_num(s.width)
            ),
            None => String::new(),
        };
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}"{}/>"#,
            points, escape_xml(fill), stroke
        ));
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" fill="{}" text-anchor="{}" dominant-baseline="hanging">{}</text>"#,
            fmt_num(x), fmt_num(y), escape_xml(&style.family), fmt_num(style.size),
            escape_xml(&style.color), style.anchor.as_svg(), escape_xml(text)
        ));
    }

    fn describe(&mut self, description: &str) {
        // Wrap the last shape so the title becomes its tooltip
        if let Some(last) = self.elements.pop() {
            self.elements.push(format!(
                "<g>{}<title>{}</title></g>",
                last,
                escape_xml(description)
            ));
        }
    }
}

/// Vector export of a laid-out frame
pub struct SvgExporter {
    config: ExportConfig,
}

impl SvgExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Render to an SVG document string.
    pub fn render<M: TextMeasurer + ?Sized>(&self, frame: &Frame, measurer: &M) -> String {
        let top = if self.config.title.is_some() { TITLE_BAND_PX } else { 0.0 };
        let bottom = if self.config.show_footer { FOOTER_BAND_PX } else { 0.0 };
        let mut svg = SvgSurface::new(frame.width, frame.height + top + bottom);

        svg.add_background(&self.config.background_color);
        if let Some(comment) = &self.config.provenance_comment {
            svg.add_comment(comment);
        }
        if let Some(title) = &self.config.title {
            svg.text(
                frame.width / 2.0,
                4.0,
                title,
                &TextStyle {
                    size: self.config.font_size as f64 + 4.0,
                    family: self.config.font_family.clone(),
                    color: self.config.label_color.clone(),
                    anchor: crate::surface::TextAnchor::Middle,
                },
            );
        }

        svg.begin_group(top);
        Painter::new(self.config.clone()).paint(frame, measurer, &mut svg);
        svg.end_group();

        if self.config.show_footer {
            self.add_footer(&mut svg, frame, top);
        }
        log::debug!("rendered SVG with {} elements", svg.element_count());
        svg.finish()
    }

    /// Export to an SVG file
    pub fn export_svg<P, M>(&self, path: P, frame: &Frame, measurer: &M) -> Result<()>
    where
        P: AsRef<Path>,
        M: TextMeasurer + ?Sized,
    {
        let path = path.as_ref();
        let document = self.render(frame, measurer);
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
        file.write_all(document.as_bytes())
            .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    fn add_footer(&self, svg: &mut SvgSurface, frame: &Frame, top: f64) {
        let range = match frame.plan {
            Some(plan) => format!("{}-{}", plan.range.min, plan.range.max),
            None => "empty".to_string(),
        };
        let footer_text = format!(
            "trackmap v{} | Range: {} | Tracks: {} | Generated: {}",
            env!("CARGO_PKG_VERSION"),
            range,
            frame.tracks.len(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        svg.text(
            4.0,
            top + frame.height + 2.0,
            &footer_text,
            &TextStyle {
                size: (self.config.font_size as f64 - 2.0).max(6.0),
                family: self.config.font_family.clone(),
                color: "gray".to_string(),
                anchor: crate::surface::TextAnchor::Start,
            },
        );
    }
}

/// Fixed precision keeps output byte-stable across platforms.
fn fmt_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
