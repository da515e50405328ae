//! Trackmap Core Library
//!
//! Track allocation, pretty scale planning, region slicing and frame
//! descriptors for linear feature maps.

pub mod types;
pub mod error;
pub mod config;
pub mod coords;
pub mod measure;
pub mod scale;
pub mod track;
pub mod slice;
pub mod chart;
pub mod frame;
pub mod events;
pub mod io;

// Re-export commonly used types and functions
pub use types::{Coord, CoordRange, Feature, FeatureKind, Strand};
pub use error::{LayoutError, LayoutResult};
pub use config::{ChartConfig, GlyphConfig, ScaleConfig, ScaleFont, TickConfig};
pub use coords::UnitConverter;
pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use scale::{ScalePlan, TickKind};
pub use track::{Placement, Track};
pub use chart::Chart;
pub use frame::{Frame, Glyph, Rect, Tick, TrackLayout};
pub use events::{FeatureEvents, FeatureHit, PointerEvent};

/// Version information for the trackmap core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
