use std::io::BufRead;
use std::sync::OnceLock;
use regex::Regex;
use crate::error::{LayoutError, LayoutResult};
use crate::types::{Coord, Feature, FeatureKind, Strand};

/// Column where feature locations and qualifiers start.
const QUALIFIER_COLUMN: usize = 21;

fn location_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid location regex"))
}

fn name_qualifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^/(gene|locus_tag|label|product)="?([^"]*)"?$"#).expect("valid qualifier regex")
    })
}

/// Reads the FEATURES table of a GenBank flat file.
///
/// `gene` becomes a gene, `CDS` a protein, anything else keeps its key.
/// The `source` feature spans the whole record and is skipped. Joined
/// locations are drawn from their first to their last base.
pub struct GenBankReader<R: BufRead> {
    reader: R,
}

struct Pending {
    key: String,
    location: String,
    line: usize,
    name: Option<String>,
    name_rank: usize,
}

impl<R: BufRead> GenBankReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read_features(self) -> LayoutResult<Vec<Feature>> {
        let mut features = Vec::new();
        let mut in_features = false;
        let mut pending: Option<Pending> = None;
        let mut continuing_location = false;

        for (index, line) in self.reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if !in_features {
                in_features = line.starts_with("FEATURES");
                continue;
            }
            if !line.starts_with(' ') {
                // ORIGIN, CONTIG or the next record ends the table
                if let Some(p) = pending.take() {
                    push_feature(&mut features, p)?;
                }
                in_features = line.starts_with("FEATURES");
                continue;
            }

            let key = line.get(5..QUALIFIER_COLUMN).unwrap_or("").trim();
            let rest = line.get(QUALIFIER_COLUMN..).unwrap_or("").trim();
            if !key.is_empty() {
                if let Some(p) = pending.take() {
                    push_feature(&mut features, p)?;
                }
                continuing_location = rest.ends_with(',');
                pending = Some(Pending {
                    key: key.to_string(),
                    location: rest.to_string(),
                    line: line_no,
                    name: None,
                    name_rank: usize::MAX,
                });
                continue;
            }

            let Some(p) = pending.as_mut() else {
                continue;
            };
            if continuing_location {
                p.location.push_str(rest);
                continuing_location = rest.ends_with(',');
            } else if let Some(caps) = name_qualifier().captures(rest) {
                let rank = match &caps[1] {
                    "gene" => 0,
                    "locus_tag" => 1,
                    "label" => 2,
                    _ => 3,
                };
                if rank < p.name_rank {
                    p.name = Some(caps[2].to_string());
                    p.name_rank = rank;
                }
            }
        }
        if let Some(p) = pending.take() {
            push_feature(&mut features, p)?;
        }
        Ok(features)
    }
}

fn push_feature(features: &mut Vec<Feature>, pending: Pending) -> LayoutResult<()> {
    if pending.key == "source" {
        return Ok(());
    }
    if pending.location.contains(':') {
        log::warn!(
            "line {}: skipping {} with a location in another record: {}",
            pending.line,
            pending.key,
            pending.location
        );
        return Ok(());
    }
    let (start, end, strand) = parse_location(&pending.location)
        .ok_or_else(|| LayoutError::parse(pending.line, format!("invalid location: {}", pending.location)))?;
    let kind = match pending.key.as_str() {
        "gene" => FeatureKind::Gene,
        "CDS" => FeatureKind::Protein,
        other => FeatureKind::Other(other.to_string()),
    };
    // 1-based inclusive to 0-based half-open
    let mut feature = Feature::new(kind, start - 1, end - start + 1, Some(strand));
    if let Some(name) = pending.name {
        feature = feature.with_name(name);
    }
    features.push(feature);
    Ok(())
}

fn parse_location(location: &str) -> Option<(Coord, Coord, Strand)> {
    let strand = if location.starts_with("complement(") {
        Strand::Reverse
    } else {
        Strand::Forward
    };
    let numbers: Vec<Coord> = location_number()
        .find_iter(location)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    let start = *numbers.iter().min()?;
    let end = *numbers.iter().max()?;
    if start < 1 {
        return None;
    }
    Some((start, end, strand))
}
