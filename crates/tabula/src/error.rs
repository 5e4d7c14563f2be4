//! Error types for table configuration and stylesheet loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised fail-fast when a render is requested with configuration
/// that cannot produce output.
///
/// Per-cell problems are never errors: classification is total, and a value
/// that cannot honor its column's type hint silently degrades to automatic
/// classification. These variants cover the caller-supplied configuration
/// only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The consumer requires a table name and none was set.
    #[error("table name must not be empty")]
    EmptyTableName,

    /// The consumer requires headers and none were set.
    #[error("headers must not be empty")]
    EmptyHeaders,

    /// The consumer requires at least one row and the matrix is empty.
    #[error("value matrix must not be empty")]
    EmptyValueMatrix,

    /// A style or hint referenced a header name that does not exist.
    /// Lookup is exact and case-sensitive.
    #[error("no column named '{name}'")]
    InvalidColumnSpecifier { name: String },

    /// A style or hint referenced a column index past the last column.
    #[error("column index {index} out of bounds for {column_count} columns")]
    ColumnIndexOutOfBounds { index: usize, column_count: usize },

    /// A theme name was not found in the registry.
    #[error("unknown theme '{name}'")]
    UnknownTheme { name: String },
}

/// Errors from loading a stylesheet file.
#[derive(Debug, Error)]
pub enum StylesheetError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML did not parse, or contained an unknown style field.
    #[error("failed to parse stylesheet: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result type for table configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::EmptyTableName.to_string(),
            "table name must not be empty"
        );
        assert_eq!(
            ConfigError::InvalidColumnSpecifier {
                name: "prise".to_string()
            }
            .to_string(),
            "no column named 'prise'"
        );
        assert_eq!(
            ConfigError::ColumnIndexOutOfBounds {
                index: 4,
                column_count: 3
            }
            .to_string(),
            "column index 4 out of bounds for 3 columns"
        );
    }

    #[test]
    fn stylesheet_io_error_includes_path() {
        let err = StylesheetError::Io {
            path: PathBuf::from("/no/such/styles.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/no/such/styles.yaml"));
    }
}
