//! Feature loaders
//!
//! Readers turn annotation files into [`Feature`] records sorted by
//! position, ready for [`Chart::load_features`](crate::Chart::load_features).

pub mod bed;
pub mod genbank;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use flate2::read::MultiGzDecoder;
use crate::error::{LayoutError, LayoutResult};
use crate::types::Feature;

pub use bed::BedReader;
pub use genbank::GenBankReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFormat {
    Bed,
    GenBank,
}

impl FeatureFormat {
    /// Guess the format from the file name, looking through a `.gz` suffix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let ext = name.rsplit('.').next()?;
        match ext {
            "bed" => Some(FeatureFormat::Bed),
            "gb" | "gbk" | "genbank" => Some(FeatureFormat::GenBank),
            _ => None,
        }
    }
}

/// Open a file for line reading, decompressing gzip transparently.
pub fn open_reader(path: &Path) -> LayoutResult<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Load features from a BED or GenBank file, sorted by position.
pub fn load_features(path: &Path) -> LayoutResult<Vec<Feature>> {
    let format = FeatureFormat::from_path(path).ok_or_else(|| {
        LayoutError::invalid_config(format!(
            "cannot tell feature format of {} (expected .bed or .gb/.gbk)",
            path.display()
        ))
    })?;
    let reader = open_reader(path)?;
    let mut features = match format {
        FeatureFormat::Bed => BedReader::new(reader).read_features()?,
        FeatureFormat::GenBank => GenBankReader::new(reader).read_features()?,
    };
    sort_by_position(&mut features);
    log::info!("Loaded {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Stable sort, the order the allocator expects.
pub fn sort_by_position(features: &mut [Feature]) {
    features.sort_by_key(|feature| feature.position);
}
