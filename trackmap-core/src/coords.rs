//! Conversion between coordinate units and pixels.
//!
//! The free functions mirror the raw arithmetic and yield non-finite
//! values on a degenerate range. [`UnitConverter`] validates first and
//! carries the horizontal offset explicitly instead of relying on a
//! stateful drawing transform.

use crate::error::{LayoutError, LayoutResult};
use crate::types::{Coord, CoordRange};

pub fn pixels_per_unit(range: CoordRange, display_width: u32) -> f64 {
    display_width as f64 / range.span() as f64
}

pub fn units_per_pixel(range: CoordRange, display_width: u32) -> f64 {
    1.0 / pixels_per_unit(range, display_width)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    range: CoordRange,
    display_width: u32,
    offset: f64,
}

impl UnitConverter {
    pub fn new(range: CoordRange, display_width: u32) -> LayoutResult<Self> {
        if range.is_degenerate() {
            return Err(LayoutError::DegenerateRange {
                min: range.min,
                max: range.max,
            });
        }
        if display_width == 0 {
            return Err(LayoutError::invalid_config("display_width must be positive"));
        }
        Ok(Self {
            range,
            display_width,
            offset: 0.0,
        })
    }

    /// Shift every pixel result right by `offset` pixels.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn range(&self) -> CoordRange {
        self.range
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn pixels_per_unit(&self) -> f64 {
        pixels_per_unit(self.range, self.display_width)
    }

    pub fn units_per_pixel(&self) -> f64 {
        units_per_pixel(self.range, self.display_width)
    }

    pub fn to_pixel(&self, coord: Coord) -> f64 {
        self.offset + (coord - self.range.min) as f64 * self.pixels_per_unit()
    }

    pub fn to_coord(&self, pixel: f64) -> f64 {
        self.range.min as f64 + (pixel - self.offset) * self.units_per_pixel()
    }

    pub fn length_to_pixels(&self, length: Coord) -> f64 {
        length as f64 * self.pixels_per_unit()
    }

    pub fn pixels_to_length(&self, pixels: f64) -> f64 {
        pixels * self.units_per_pixel()
    }
}
