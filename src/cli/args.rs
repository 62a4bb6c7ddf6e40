//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::consts::{DEFAULT_DATA_FILE, DEFAULT_YEAR_RANGE};
use crate::core::{FilterCriteria, JournalFilter, ViewToggles};
use crate::error::AppError;
use crate::logging::{LogConfig, LogFormat};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "cordstats")]
#[command(about = "Explore CORD-19 paper metadata from the terminal", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Metadata CSV to load
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) data: Option<PathBuf>,

    /// First publication year to include
    #[arg(long, global = true, value_name = "YEAR")]
    pub(crate) from: Option<i32>,

    /// Last publication year to include
    #[arg(long, global = true, value_name = "YEAR")]
    pub(crate) to: Option<i32>,

    /// Only papers from this journal (exact match; "All" for every journal)
    #[arg(short = 'J', long, global = true, value_name = "NAME")]
    pub(crate) journal: Option<String>,

    /// Hide the title word cloud
    #[arg(long, global = true)]
    pub(crate) no_wordcloud: bool,

    /// Hide the source distribution
    #[arg(long, global = true)]
    pub(crate) no_sources: bool,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Locale for number formatting (e.g., "en", "zh", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Keep parsed records in ~/.cache/cordstats between runs
    #[arg(long, global = true)]
    pub(crate) cache: bool,

    /// Always parse the CSV, even when the config enables the record cache
    #[arg(long, global = true)]
    pub(crate) no_cache: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Enable debug output (same as -vv)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    pub(crate) log_format: Option<LogFormat>,

    /// Sample size from config; `sample --limit` takes precedence
    #[arg(skip)]
    pub(crate) sample_rows: Option<usize>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_wordcloud && config.no_wordcloud {
            self.no_wordcloud = true;
        }
        if !self.no_sources && config.no_sources {
            self.no_sources = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.cache && config.cache {
            self.cache = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // Value options: only apply if CLI didn't set them
        if self.data.is_none() {
            self.data = config.data.clone();
        }
        if self.from.is_none() {
            self.from = config.from;
        }
        if self.to.is_none() {
            self.to = config.to;
        }
        if self.journal.is_none() {
            self.journal = config.journal.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.log_format.is_none() {
            self.log_format = config.log_format;
        }
        if self.sample_rows.is_none() {
            self.sample_rows = config.sample_rows;
        }

        self
    }

    pub(crate) fn data_path(&self) -> PathBuf {
        self.data
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub(crate) fn criteria(&self) -> Result<FilterCriteria, AppError> {
        if let Some(journal) = &self.journal
            && journal.trim().is_empty()
        {
            return Err(AppError::EmptyJournal);
        }
        Ok(FilterCriteria::new(
            self.from.unwrap_or(DEFAULT_YEAR_RANGE.0),
            self.to.unwrap_or(DEFAULT_YEAR_RANGE.1),
            JournalFilter::from_selection(self.journal.as_deref()),
        ))
    }

    /// The on-disk record cache is opt-in; `--no-cache` always wins
    pub(crate) fn disk_cache_enabled(&self) -> bool {
        self.cache && !self.no_cache
    }

    pub(crate) fn toggles(&self) -> ViewToggles {
        ViewToggles {
            word_cloud: !self.no_wordcloud,
            sources: !self.no_sources,
        }
    }

    fn color_enabled(&self, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal,
        }
    }

    pub(crate) fn use_color(&self) -> bool {
        self.color_enabled(std::io::stdout().is_terminal())
    }

    pub(crate) fn log_config(&self) -> LogConfig {
        let verbosity = if self.debug {
            self.verbose.max(2)
        } else {
            self.verbose
        };
        LogConfig::from_verbosity(verbosity)
            .with_format(self.log_format.unwrap_or_default())
            .with_ansi(self.color_enabled(std::io::stderr().is_terminal()))
    }
}
