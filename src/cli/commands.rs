//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

use crate::consts::{EXPORT_FILE_NAME, MAX_WORDS, TOP_N};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Sample table plus every enabled chart (default)
    Dashboard,
    /// First rows of the filtered selection
    Sample {
        /// Rows to show (defaults to config `sample_rows`, else 10)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Publications per year
    Years,
    /// Most frequent journals
    Journals {
        #[arg(short, long, default_value_t = TOP_N)]
        limit: usize,
    },
    /// Most frequent title words, shown as a word cloud
    Words {
        #[arg(short, long, default_value_t = MAX_WORDS)]
        limit: usize,
    },
    /// Papers per source
    Sources {
        #[arg(short, long, default_value_t = TOP_N)]
        limit: usize,
    },
    /// Journal names accepted by --journal
    ListJournals,
    /// Write the filtered selection as CSV
    Export {
        /// Destination file, or `-` for stdout
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
        /// Every column plus derived `year`, instead of the sample columns
        #[arg(long)]
        full: bool,
    },
}
