/// Standard date format used throughout the codebase: "2020-05-01"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dataset read when neither `--data` nor the config file names one
pub(crate) const DEFAULT_DATA_FILE: &str = "metadata.csv";

/// File name offered for the filtered download
pub(crate) const EXPORT_FILE_NAME: &str = "filtered_metadata.csv";

/// Inclusive year range selected when none is given
pub(crate) const DEFAULT_YEAR_RANGE: (i32, i32) = (2020, 2021);

/// Journal selection meaning "no constraint"
pub(crate) const ALL_JOURNALS: &str = "All";

pub(crate) const SAMPLE_ROWS: usize = 10;
pub(crate) const TOP_N: usize = 10;
pub(crate) const MAX_WORDS: usize = 100;
