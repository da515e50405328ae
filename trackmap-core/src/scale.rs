//! Pretty scale planning
//!
//! Picks a readable major tick interval for the display width, snaps the
//! coordinate range outward onto that interval and classifies every
//! coordinate as a major, half or minor tick.
//!
//! Intervals are always `10^k` or `5 × 10^k`.

use serde::{Deserialize, Serialize};
use crate::config::ChartConfig;
use crate::measure::TextMeasurer;
use crate::types::{Coord, CoordRange};

/// Upward bias applied before rounding to the nearest integer. Keeps the
/// last label from being clipped.
pub const ROUNDING_BIAS: f64 = 0.4;

/// Upper bound on interval/range refinement rounds in [`plan`]. The major
/// interval only grows, so this is never reached in practice.
const MAX_REFINEMENTS: usize = 64;

/// Minor ticks per major interval in automatic mode.
pub const MINOR_TICKS_PER_MAJOR: Coord = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    Major,
    /// Minor tick exactly halfway between two major ticks
    Half,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalePlan {
    pub range: CoordRange,
    pub major: Coord,
    pub minor: Coord,
}

impl ScalePlan {
    pub fn classify(&self, position: Coord) -> Option<TickKind> {
        if position.rem_euclid(self.major) == 0 {
            Some(TickKind::Major)
        } else if position.rem_euclid(self.minor) == 0 {
            if self.major % 2 == 0 && position.rem_euclid(self.major / 2) == 0 {
                Some(TickKind::Half)
            } else {
                Some(TickKind::Minor)
            }
        } else {
            None
        }
    }

    /// Every tick inside the range, left to right.
    pub fn ticks(&self) -> Vec<(Coord, TickKind)> {
        let step = gcd(self.major, self.minor).max(1);
        let first = self.range.min + (-self.range.min).rem_euclid(step);
        let mut ticks = Vec::new();
        let mut position = first;
        while position <= self.range.max {
            if let Some(kind) = self.classify(position) {
                ticks.push((position, kind));
            }
            position += step;
        }
        ticks
    }
}

fn gcd(mut a: Coord, mut b: Coord) -> Coord {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// `Math.round(x + 0.4)`: half-up rounding after the upward bias.
pub fn biased_round(x: f64) -> f64 {
    (x + (ROUNDING_BIAS + 0.5)).floor()
}

/// Round an interval up to the next "nice" step.
///
/// With `d` decimal digits and `p = 10^d`, a leading fraction in
/// `(0.1, 0.5]` becomes `0.5` and one above `0.5` becomes `1`.
pub fn nice_interval(interval: Coord) -> Coord {
    if interval < 1 {
        return 1;
    }
    let digits = interval.to_string().len() as u32;
    let places = match 10i128.checked_pow(digits) {
        Some(p) => p,
        None => return interval,
    };
    let n = interval as i128;
    let nice = if n * 10 > places && n * 2 <= places {
        places / 2
    } else if n * 2 > places {
        places
    } else {
        n
    };
    Coord::try_from(nice).unwrap_or(interval)
}

/// Choose a major interval so labels of `label_width_px` fit across the
/// display, as a refinement of `previous_major`.
pub fn determine_major_tick(
    range: CoordRange,
    previous_major: Coord,
    display_width: u32,
    label_width_px: f64,
    label_buffer_px: f64,
) -> Coord {
    let previous_major = previous_major.max(1);
    let fit_count = display_width as f64 / (label_width_px + label_buffer_px);
    let raw = range.span() as f64 / fit_count;
    let multiple = biased_round(raw / previous_major as f64);
    let multiple = if multiple.is_finite() && multiple >= 1.0 {
        multiple as Coord
    } else {
        1
    };
    nice_interval(multiple.saturating_mul(previous_major))
}

/// Move `min` down and `max` up onto the major tick grid.
pub fn snap_range(range: CoordRange, major: Coord) -> CoordRange {
    let major = major.max(1);
    let min = range.min - range.min.rem_euclid(major);
    let mut max = biased_round(range.max as f64 / major as f64) as Coord * major;
    // the bias can round a short range's max down onto its min
    if max <= min {
        max = min + major;
    }
    CoordRange::new(min, max)
}

/// Label text for a tick. Automatic labels abbreviate thousands (`k`) and
/// millions (`m`); otherwise the raw value is printed.
pub fn tick_text(value: Coord, auto: bool) -> String {
    if !auto {
        return value.to_string();
    }
    if value >= 1_000_000 {
        format!("{}m", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Finalise range and intervals for a render.
///
/// The major interval and the snapped range feed each other: snapping
/// widens the range, which can change the widest label and so the
/// interval. Both are refined until neither moves, so planning a
/// finished plan's range with its major interval as the seed returns
/// the same plan.
pub fn plan<M: TextMeasurer + ?Sized>(range: CoordRange, config: &ChartConfig, measurer: &M) -> ScalePlan {
    let mut major = config.tick.major_size.max(1);
    let mut minor = config.tick.minor_size.max(1);
    let mut snapped = range;

    if config.scale.pretty {
        if config.tick.auto {
            let font = &config.scale.font;
            for _ in 0..MAX_REFINEMENTS {
                let label = tick_text(snapped.max, true);
                let label_width = measurer.measure_width(&label, font.size_px as f64, &font.family);
                let next = determine_major_tick(
                    snapped,
                    major,
                    config.display_width,
                    label_width,
                    font.buffer_px as f64,
                );
                let next_range = if config.scale.auto { snap_range(range, next) } else { range };
                if next == major && next_range == snapped {
                    break;
                }
                major = next;
                snapped = next_range;
            }
            minor = (major / MINOR_TICKS_PER_MAJOR).max(1);
        } else if config.scale.auto {
            snapped = snap_range(range, major);
        }
    }

    log::debug!(
        "scale plan: range {}..{} major {} minor {}",
        snapped.min, snapped.max, major, minor
    );
    ScalePlan { range: snapped, major, minor }
}
