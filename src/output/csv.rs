//! CSV export of a filtered selection

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::Record;
use crate::error::ExportError;
use crate::utils::format_date;

/// Column set written by `export`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ExportLayout {
    /// The sample-table columns
    #[default]
    Summary,
    /// Every loaded column plus the derived ones; re-loads cleanly
    Full,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    title: &'a str,
    journal: &'a str,
    publish_time: String,
    abstract_word_count: usize,
}

#[derive(Serialize)]
struct FullRow<'a> {
    title: &'a str,
    journal: &'a str,
    publish_time: String,
    #[serde(rename = "abstract")]
    abstract_text: &'a str,
    source_x: &'a str,
    year: Option<i32>,
    abstract_word_count: usize,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

const SUMMARY_HEADER: [&str; 4] = ["title", "journal", "publish_time", "abstract_word_count"];
const FULL_HEADER: [&str; 7] = [
    "title",
    "journal",
    "publish_time",
    "abstract",
    "source_x",
    "year",
    "abstract_word_count",
];

/// Encode `records` in order. An empty selection yields the header row only.
pub(crate) fn serialize(records: &[&Record], layout: ExportLayout) -> Result<Vec<u8>, ExportError> {
    // Header is written explicitly so empty selections still get one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    match layout {
        ExportLayout::Summary => {
            wtr.write_record(SUMMARY_HEADER)?;
            for r in records {
                wtr.serialize(SummaryRow {
                    title: text(&r.title),
                    journal: text(&r.journal),
                    publish_time: format_date(r.publish_date),
                    abstract_word_count: r.abstract_word_count(),
                })?;
            }
        }
        ExportLayout::Full => {
            wtr.write_record(FULL_HEADER)?;
            for r in records {
                wtr.serialize(FullRow {
                    title: text(&r.title),
                    journal: text(&r.journal),
                    publish_time: format_date(r.publish_date),
                    abstract_text: text(&r.abstract_text),
                    source_x: text(&r.source),
                    year: r.year(),
                    abstract_word_count: r.abstract_word_count(),
                })?;
            }
        }
    }
    wtr.into_inner()
        .map_err(|e| ExportError::Flush(e.into_error()))
}

/// Write encoded bytes to `path`, or to stdout when `path` is `-`
pub(crate) fn write_export(bytes: &[u8], path: &Path) -> Result<(), ExportError> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(ExportError::Flush);
    }
    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
