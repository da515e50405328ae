use serde::{Deserialize, Serialize};

/// Linear position along a sequence, in coordinate units (e.g. bp).
pub type Coord = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl From<bool> for Strand {
    fn from(forward: bool) -> Self {
        if forward {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl Strand {
    /// Parse a strand column (`+`, `-`, anything else is unstranded).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Gene,
    Protein,
    Other(String),
}

impl FeatureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FeatureKind::Gene => "gene",
            FeatureKind::Protein => "protein",
            FeatureKind::Other(name) => name,
        }
    }
}

/// A positioned, sized annotation. `position + length` is the exclusive end.
///
/// Features are shared read-only once placed; to change one, add a new
/// feature instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub position: Coord,
    pub length: Coord,
    pub strand: Option<Strand>,
    pub name: Option<String>,
}

impl Feature {
    pub fn new(kind: FeatureKind, position: Coord, length: Coord, strand: Option<Strand>) -> Self {
        Self {
            kind,
            position,
            length,
            strand,
            name: None,
        }
    }

    pub fn gene(position: Coord, length: Coord, strand: Option<Strand>) -> Self {
        Self::new(FeatureKind::Gene, position, length, strand)
    }

    pub fn protein(position: Coord, length: Coord, strand: Option<Strand>) -> Self {
        Self::new(FeatureKind::Protein, position, length, strand)
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn end(&self) -> Coord {
        self.position + self.length
    }
}

/// Inclusive coordinate range shown across the display width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordRange {
    pub min: Coord,
    pub max: Coord,
}

impl CoordRange {
    pub fn new(min: Coord, max: Coord) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> Coord {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Grow the range so it covers `[start, end]`.
    pub fn include(&mut self, start: Coord, end: Coord) {
        self.min = self.min.min(start);
        self.max = self.max.max(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_end_is_exclusive() {
        let f = Feature::gene(10, 5, Some(Strand::Forward));
        assert_eq!(f.end(), 15);
    }

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse("+"), Some(Strand::Forward));
        assert_eq!(Strand::parse("-"), Some(Strand::Reverse));
        assert_eq!(Strand::parse("."), None);
        assert_eq!(char::from(Strand::Reverse), '-');
    }

    #[test]
    fn test_range_include_and_degenerate() {
        let mut r = CoordRange::new(10, 10);
        assert!(r.is_degenerate());
        r.include(5, 40);
        assert_eq!(r, CoordRange::new(5, 40));
        assert_eq!(r.span(), 35);
        assert!(!r.is_degenerate());
    }
}
