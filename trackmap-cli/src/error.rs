//! Error handling for the trackmap CLI

use thiserror::Error;
use std::path::PathBuf;
use trackmap_core::LayoutError;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn layout<S: Into<String>>(message: S) -> Self {
        Self::Layout { message: message.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }

    /// Attach the input file to a loader error.
    pub fn from_layout(file: &std::path::Path, err: LayoutError) -> Self {
        match err {
            LayoutError::Parse { line, message } => {
                Self::parse(file.display().to_string(), format!("line {}: {}", line, message))
            }
            LayoutError::InvalidConfig { message } => Self::invalid_format(message),
            LayoutError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::file_not_found(file.to_path_buf())
            }
            LayoutError::Io(e) => Self::io(e.to_string()),
            other => Self::layout(other.to_string()),
        }
    }
}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        Self::layout(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Supported inputs are BED (.bed) and GenBank (.gb, .gbk, .genbank)\n\
                 • Gzipped inputs need a trailing .gz extension",
            );
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • BED coordinates must be integers with end >= start\n\
                 • Ensure the file is not corrupted or truncated",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your trackmap.toml configuration file\n\
                 • Use 'trackmap config --example' to generate a sample configuration",
            );
        }

        CliError::Layout { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Pass --min and --max when scale auto mode is disabled\n\
                 • Make sure the range maximum is greater than the minimum",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
