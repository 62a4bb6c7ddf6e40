use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Journal name must not be empty (omit --journal to include every journal)")]
    EmptyJournal,

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Failures that abort loading the dataset. Per-row problems (bad dates,
/// empty cells) never surface here.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("Dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is empty or has no header row", path.display())]
    Empty { path: PathBuf },

    #[error("Required column '{column}' not found in {}", path.display())]
    MissingColumn { column: &'static str, path: PathBuf },
}

impl LoadError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to finish CSV output: {0}")]
    Flush(std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn app_error_display_locale() {
        let e = AppError::UnsupportedLocale {
            input: "xx".to_string(),
        };
        assert_eq!(e.to_string(), "Unsupported locale: xx");
    }

    #[test]
    fn load_error_not_found_display() {
        let e = LoadError::NotFound {
            path: PathBuf::from("metadata.csv"),
        };
        assert_eq!(e.to_string(), "Dataset not found: metadata.csv");
    }

    #[test]
    fn load_error_missing_column_display() {
        let e = LoadError::MissingColumn {
            column: "publish_time",
            path: PathBuf::from("data.csv"),
        };
        assert_eq!(
            e.to_string(),
            "Required column 'publish_time' not found in data.csv"
        );
    }

    #[test]
    fn from_io_maps_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            LoadError::from_io(Path::new("x.csv"), err),
            LoadError::NotFound { .. }
        ));
    }

    #[test]
    fn from_io_keeps_other_kinds() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            LoadError::from_io(Path::new("x.csv"), err),
            LoadError::Read { .. }
        ));
    }

    #[test]
    fn app_error_from_load_error_is_transparent() {
        let app: AppError = LoadError::Empty {
            path: PathBuf::from("empty.csv"),
        }
        .into();
        assert_eq!(app.to_string(), "empty.csv is empty or has no header row");
    }
}
