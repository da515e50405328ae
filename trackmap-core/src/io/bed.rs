use std::io::BufRead;
use crate::error::{LayoutError, LayoutResult};
use crate::types::{Coord, Feature, FeatureKind, Strand};

/// Reads BED3..BED6 records. Header lines (`#`, `track`, `browser`) and
/// blank lines are skipped.
pub struct BedReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read_features(self) -> LayoutResult<Vec<Feature>> {
        let mut features = Vec::new();
        for (index, line) in self.reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') || is_header(line) {
                continue;
            }
            features.push(parse_bed_line(line, index + 1)?);
        }
        Ok(features)
    }
}

/// `track` and `browser` lines, matched on the whole first field so
/// chromosomes such as `track_7` are still read.
fn is_header(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some("track") | Some("browser"))
}

fn parse_bed_line(line: &str, line_no: usize) -> LayoutResult<Feature> {
    let fields: Vec<&str> = if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    };
    if fields.len() < 3 {
        return Err(LayoutError::parse(
            line_no,
            format!("BED record needs at least 3 fields, found {}", fields.len()),
        ));
    }

    let start: Coord = fields[1]
        .trim()
        .parse()
        .map_err(|_| LayoutError::parse(line_no, format!("invalid start: {}", fields[1])))?;
    let end: Coord = fields[2]
        .trim()
        .parse()
        .map_err(|_| LayoutError::parse(line_no, format!("invalid end: {}", fields[2])))?;
    if end < start {
        return Err(LayoutError::parse(
            line_no,
            format!("end {} is before start {}", end, start),
        ));
    }

    let name = fields
        .get(3)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != ".");
    let strand = fields.get(5).and_then(|s| Strand::parse(s.trim()));

    let mut feature = Feature::new(FeatureKind::Gene, start, end - start, strand);
    if let Some(name) = name {
        feature = feature.with_name(name);
    }
    Ok(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> LayoutResult<Vec<Feature>> {
        BedReader::new(Cursor::new(text.to_string())).read_features()
    }

    #[test]
    fn test_bed3_and_bed6() {
        let features = read(
            "track name=demo\n\
             # comment\n\
             chr1\t100\t250\n\
             \n\
             chr1\t300\t400\tlacZ\t0\t-\n",
        )
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].position, 100);
        assert_eq!(features[0].length, 150);
        assert_eq!(features[0].strand, None);
        assert_eq!(features[1].name.as_deref(), Some("lacZ"));
        assert_eq!(features[1].strand, Some(Strand::Reverse));
    }

    #[test]
    fn test_whitespace_separated() {
        let features = read("chr2 5 10 geneA\n").unwrap();
        assert_eq!(features[0].position, 5);
        assert_eq!(features[0].length, 5);
        assert_eq!(features[0].name.as_deref(), Some("geneA"));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = read("chr1\t1\t2\nchr1\tx\t5\n").unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 2, .. }));
        let err = read("chr1\t10\t5\n").unwrap_err();
        assert!(err.to_string().contains("before start"));
        let err = read("chr1\t10\n").unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_header_keyword_must_be_whole_field() {
        let features = read(
            "browser position chr1:1-100\n\
             track\n\
             trackA\t10\t20\n\
             browser_scaffold 30 45\n",
        )
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].position, 10);
        assert_eq!(features[1].length, 15);
    }
}
