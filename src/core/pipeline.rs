//! Render pipeline: filter once, then run every enabled aggregator over the
//! selection. Pure; safe to call from any host, any number of times.

use crate::core::aggregator::{source_distribution, title_tokens, top_journals, yearly_counts};
use crate::core::filter::filter;
use crate::core::types::{FilterCriteria, Record, SampleRow, ViewLimits, ViewModel, ViewToggles};
use crate::utils::format_date;

pub(crate) fn render(
    records: &[Record],
    criteria: &FilterCriteria,
    toggles: ViewToggles,
) -> ViewModel {
    render_with(records, criteria, toggles, &ViewLimits::default())
}

pub(crate) fn render_with(
    records: &[Record],
    criteria: &FilterCriteria,
    toggles: ViewToggles,
    limits: &ViewLimits,
) -> ViewModel {
    let selected = filter(records, criteria);

    ViewModel {
        criteria: criteria.clone(),
        total_records: records.len(),
        matched_records: selected.len(),
        sample: sample_rows(&selected, limits.sample_rows),
        yearly: yearly_counts(&selected),
        top_journals: top_journals(&selected, limits.top_journals),
        title_words: toggles
            .word_cloud
            .then(|| title_tokens(&selected, limits.title_words)),
        sources: toggles
            .sources
            .then(|| source_distribution(&selected, limits.sources)),
    }
}

/// First `limit` records projected onto the sample-table columns
pub(crate) fn sample_rows(records: &[&Record], limit: usize) -> Vec<SampleRow> {
    records
        .iter()
        .take(limit)
        .map(|r| SampleRow {
            title: r.title.clone(),
            journal: r.journal.clone(),
            publish_time: r.publish_date.map(|d| format_date(Some(d))),
            abstract_word_count: r.abstract_word_count(),
        })
        .collect()
}
