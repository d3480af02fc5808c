use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A CSV file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input text is structurally unreadable (e.g. no header line).
    #[error("Malformed input: {0}")]
    Format(String),

    /// A numeric cell failed to parse under the strict coercion policy.
    #[error("Column '{column}' contains non-numeric value '{value}'")]
    NumericParse { column: String, value: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/some/sales.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/sales.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_format() {
        let err = DashboardError::Format("input contains no header line".to_string());
        assert_eq!(err.to_string(), "Malformed input: input contains no header line");
    }

    #[test]
    fn test_error_display_numeric_parse() {
        let err = DashboardError::NumericParse {
            column: "Total".to_string(),
            value: "1,234.00".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Total"));
        assert!(msg.contains("1,234.00"));
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("top-products must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: top-products must be positive"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
