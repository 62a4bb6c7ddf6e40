//! Core data types for the metadata explorer
//!
//! `Record` is the unified row every loader produces; the remaining types
//! describe one render cycle (criteria in, view model out).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::consts::{ALL_JOURNALS, DEFAULT_YEAR_RANGE, MAX_WORDS, SAMPLE_ROWS, TOP_N};

/// One paper from the metadata table.
///
/// `year` and `abstract_word_count` are derived in [`Record::new`] and are
/// read-only afterwards, so they always agree with the fields they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub(crate) title: Option<String>,
    pub(crate) journal: Option<String>,
    pub(crate) publish_date: Option<NaiveDate>,
    pub(crate) abstract_text: Option<String>,
    /// Raw `source_x` value, possibly several sources joined by `;`
    pub(crate) source: Option<String>,
    year: Option<i32>,
    abstract_word_count: usize,
}

impl Record {
    pub(crate) fn new(
        title: Option<String>,
        journal: Option<String>,
        publish_date: Option<NaiveDate>,
        abstract_text: Option<String>,
        source: Option<String>,
    ) -> Self {
        let abstract_word_count = abstract_text
            .as_deref()
            .map_or(0, |text| text.split_whitespace().count());
        Record {
            title,
            journal,
            year: publish_date.map(|d| d.year()),
            publish_date,
            abstract_text,
            source,
            abstract_word_count,
        }
    }

    pub(crate) fn year(&self) -> Option<i32> {
        self.year
    }

    pub(crate) fn abstract_word_count(&self) -> usize {
        self.abstract_word_count
    }
}

/// Journal selector value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub(crate) enum JournalFilter {
    /// No constraint (serialized as `null`)
    #[default]
    All,
    Exact(String),
}

impl JournalFilter {
    /// Map a selector value to a filter. `None` and the literal `All` both
    /// mean "no constraint", mirroring the selector's first option.
    pub(crate) fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            None => JournalFilter::All,
            Some(name) if name == ALL_JOURNALS => JournalFilter::All,
            Some(name) => JournalFilter::Exact(name.to_string()),
        }
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            JournalFilter::All => ALL_JOURNALS,
            JournalFilter::Exact(name) => name,
        }
    }
}

/// User-selected constraints for one render cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FilterCriteria {
    pub(crate) year_min: i32,
    pub(crate) year_max: i32,
    pub(crate) journal: JournalFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            year_min: DEFAULT_YEAR_RANGE.0,
            year_max: DEFAULT_YEAR_RANGE.1,
            journal: JournalFilter::All,
        }
    }
}

impl FilterCriteria {
    pub(crate) fn new(year_min: i32, year_max: i32, journal: JournalFilter) -> Self {
        Self {
            year_min,
            year_max,
            journal,
        }
    }

    /// True when the range can never match anything
    pub(crate) fn is_inverted(&self) -> bool {
        self.year_min > self.year_max
    }
}

/// Presentation switches; they gate views, never the filter or export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ViewToggles {
    pub(crate) word_cloud: bool,
    pub(crate) sources: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        ViewToggles {
            word_cloud: true,
            sources: true,
        }
    }
}

/// Row limits applied while building a view model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ViewLimits {
    pub(crate) sample_rows: usize,
    pub(crate) top_journals: usize,
    pub(crate) title_words: usize,
    pub(crate) sources: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        ViewLimits {
            sample_rows: SAMPLE_ROWS,
            top_journals: TOP_N,
            title_words: MAX_WORDS,
            sources: TOP_N,
        }
    }
}

/// One (label, count) pair of an aggregator result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CountRow<K> {
    pub(crate) label: K,
    pub(crate) count: usize,
}

impl<K> CountRow<K> {
    pub(crate) fn new(label: K, count: usize) -> Self {
        Self { label, count }
    }
}

/// Row of the sample table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SampleRow {
    pub(crate) title: Option<String>,
    pub(crate) journal: Option<String>,
    /// `YYYY-MM-DD`, absent when the date did not parse
    pub(crate) publish_time: Option<String>,
    pub(crate) abstract_word_count: usize,
}

/// Everything the presentation layer needs for one render cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ViewModel {
    pub(crate) criteria: FilterCriteria,
    pub(crate) total_records: usize,
    pub(crate) matched_records: usize,
    pub(crate) sample: Vec<SampleRow>,
    pub(crate) yearly: Vec<CountRow<i32>>,
    pub(crate) top_journals: Vec<CountRow<String>>,
    /// `None` when the word cloud is switched off
    pub(crate) title_words: Option<Vec<CountRow<String>>>,
    /// `None` when the source distribution is switched off
    pub(crate) sources: Option<Vec<CountRow<String>>>,
}
