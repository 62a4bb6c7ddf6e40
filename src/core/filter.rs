//! Filter engine
//!
//! Conjunctive year-range and journal predicates over borrowed records.

use crate::core::types::{FilterCriteria, JournalFilter, Record};

impl FilterCriteria {
    /// Year must be present and inside the inclusive range; the journal must
    /// match exactly unless the selection is `All`.
    pub(crate) fn matches(&self, record: &Record) -> bool {
        let Some(year) = record.year() else {
            return false;
        };
        if year < self.year_min || year > self.year_max {
            return false;
        }
        match &self.journal {
            JournalFilter::All => true,
            JournalFilter::Exact(name) => record.journal.as_deref() == Some(name.as_str()),
        }
    }
}

/// Keep the records satisfying `criteria`, in their original order.
///
/// Accepts the loaded slice as well as a previous selection, so filters can
/// be applied to their own output.
pub(crate) fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
