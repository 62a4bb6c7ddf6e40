//! Metadata CSV parser
//!
//! Reads `metadata.csv` style tables into [`Record`]s. Structural problems
//! (no header, ragged rows, bad UTF-8) fail the load; per-cell problems
//! degrade to absent values.

use rayon::prelude::*;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::core::Record;
use crate::error::LoadError;
use crate::utils::parse_publish_date;

pub(crate) const REQUIRED_COLUMNS: &[&str] = &["title", "publish_time"];
pub(crate) const OPTIONAL_COLUMNS: &[&str] = &["journal", "abstract", "source_x"];

// ============================================================================
// Row shape
// ============================================================================

/// One CSV row. Empty cells and missing columns both deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    journal: Option<String>,
    #[serde(default)]
    publish_time: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    source_x: Option<String>,
}

impl RawRow {
    fn into_record(self) -> Record {
        let publish_date = self.publish_time.as_deref().and_then(parse_publish_date);
        Record::new(
            self.title,
            self.journal,
            publish_date,
            self.abstract_text,
            self.source_x,
        )
    }
}

/// Parsed table: records in file order plus the header names
#[derive(Debug)]
pub(crate) struct ParsedTable {
    pub(crate) records: Vec<Record>,
    pub(crate) columns: Vec<String>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a metadata table from any reader. `origin` is only used in errors.
pub(crate) fn parse_reader<R: Read>(reader: R, origin: &Path) -> Result<ParsedTable, LoadError> {
    let parse_error = |source: csv::Error| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(LoadError::Empty {
            path: origin.to_path_buf(),
        });
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == column) {
            return Err(LoadError::MissingColumn {
                column,
                path: origin.to_path_buf(),
            });
        }
    }
    for &column in OPTIONAL_COLUMNS {
        if !columns.iter().any(|c| c == column) {
            tracing::warn!(
                path = %origin.display(),
                column,
                "optional column missing, every record will leave it empty"
            );
        }
    }

    // Trimmed names so " title" style headers still bind to the row fields
    rdr.set_headers(columns.iter().collect());

    let rows: Vec<RawRow> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(parse_error)?;

    let records: Vec<Record> = rows.into_par_iter().map(RawRow::into_record).collect();

    let undated = records.iter().filter(|r| r.year().is_none()).count();
    tracing::debug!(
        path = %origin.display(),
        rows = records.len(),
        undated,
        "parsed metadata table"
    );

    Ok(ParsedTable { records, columns })
}
