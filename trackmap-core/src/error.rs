//! Error handling for layout and loading

use thiserror::Error;
use crate::types::Coord;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Degenerate coordinate range: min {min} must be below max {max}")]
    DegenerateRange { min: Coord, max: Coord },

    #[error("Scale range is not automatic but scale.min and scale.max are not both set")]
    MissingRange,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::DegenerateRange { min: 5, max: 5 };
        assert_eq!(
            err.to_string(),
            "Degenerate coordinate range: min 5 must be below max 5"
        );
        let err = LayoutError::parse(3, "bad start");
        assert_eq!(err.to_string(), "Parse error at line 3: bad start");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LayoutError = io_err.into();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
