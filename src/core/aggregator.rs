//! Aggregators over a filtered selection
//!
//! Each function turns borrowed records into an ordered (label, count) table.
//! Equal counts are ordered by label so output is deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::types::{CountRow, Record};

/// Sort by count descending, then label ascending, and keep the first `limit`
fn rank(counts: HashMap<&str, usize>, limit: usize) -> Vec<CountRow<String>> {
    let mut rows: Vec<(&str, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows.truncate(limit);
    rows.into_iter()
        .map(|(label, count)| CountRow::new(label.to_string(), count))
        .collect()
}

/// Publications per year, ascending by year (records without a year are skipped)
pub(crate) fn yearly_counts(records: &[&Record]) -> Vec<CountRow<i32>> {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year()) {
        *years.entry(year).or_default() += 1;
    }
    years
        .into_iter()
        .map(|(year, count)| CountRow::new(year, count))
        .collect()
}

/// Most frequent journals (absent or empty names are skipped)
pub(crate) fn top_journals(records: &[&Record], limit: usize) -> Vec<CountRow<String>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for journal in records.iter().filter_map(|r| r.journal.as_deref()) {
        if journal.is_empty() {
            continue;
        }
        *counts.entry(journal).or_default() += 1;
    }
    rank(counts, limit)
}

/// Lower-cased whitespace tokens of all titles, most frequent first
pub(crate) fn title_tokens(records: &[&Record], limit: usize) -> Vec<CountRow<String>> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for title in records.iter().filter_map(|r| r.title.as_deref()) {
        for token in title.to_lowercase().split_whitespace() {
            match counts.get_mut(token) {
                Some(n) => *n += 1,
                None => {
                    counts.insert(token.to_string(), 1);
                }
            }
        }
    }
    let borrowed: HashMap<&str, usize> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rank(borrowed, limit)
}

/// Source observations; a record listing `A;B` counts once for each
pub(crate) fn source_distribution(records: &[&Record], limit: usize) -> Vec<CountRow<String>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for source in records.iter().filter_map(|r| r.source.as_deref()) {
        for piece in source.split(';').map(str::trim) {
            if piece.is_empty() {
                continue;
            }
            *counts.entry(piece).or_default() += 1;
        }
    }
    rank(counts, limit)
}

/// Options for the journal selector: distinct non-empty names, sorted
pub(crate) fn journal_options(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.journal.as_deref())
        .filter(|j| !j.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(
        title: Option<&str>,
        journal: Option<&str>,
        year: Option<i32>,
        source: Option<&str>,
    ) -> Record {
        Record::new(
            title.map(str::to_string),
            journal.map(str::to_string),
            year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
            None,
            source.map(str::to_string),
        )
    }

    fn refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    fn is_count_desc(rows: &[CountRow<String>]) -> bool {
        rows.windows(2).all(|w| w[0].count >= w[1].count)
    }

    #[test]
    fn empty_input_gives_empty_tables() {
        let none: Vec<&Record> = Vec::new();
        assert!(yearly_counts(&none).is_empty());
        assert!(top_journals(&none, 10).is_empty());
        assert!(title_tokens(&none, 100).is_empty());
        assert!(source_distribution(&none, 10).is_empty());
        assert!(journal_options(&[]).is_empty());
    }

    #[test]
    fn yearly_counts_ascending_and_skip_absent() {
        let records = vec![
            rec(None, None, Some(2021), None),
            rec(None, None, Some(2020), None),
            rec(None, None, None, None),
            rec(None, None, Some(2021), None),
        ];
        let rows = yearly_counts(&refs(&records));
        assert_eq!(rows, vec![CountRow::new(2020, 1), CountRow::new(2021, 2)]);
    }

    #[test]
    fn yearly_counts_sum_matches_dated_records() {
        let records: Vec<Record> = (0..50)
            .map(|i| rec(None, None, (i % 7 != 0).then_some(2015 + i % 5), None))
            .collect();
        let dated = records.iter().filter(|r| r.year().is_some()).count();
        let total: usize = yearly_counts(&refs(&records)).iter().map(|r| r.count).sum();
        assert_eq!(total, dated);
    }

    #[test]
    fn top_journals_skip_absent_and_empty() {
        let records = vec![
            rec(None, Some("J1"), None, None),
            rec(None, Some(""), None, None),
            rec(None, None, None, None),
            rec(None, Some("J1"), None, None),
            rec(None, Some("J2"), None, None),
        ];
        let rows = top_journals(&refs(&records), 10);
        assert_eq!(
            rows,
            vec![CountRow::new("J1".to_string(), 2), CountRow::new("J2".to_string(), 1)]
        );
    }

    #[test]
    fn top_journals_truncates_and_sorts() {
        let records: Vec<Record> = (0..30)
            .flat_map(|i| {
                let name = format!("Journal {i:02}");
                (0..=i % 6).map(move |_| rec(None, Some(&name), None, None))
            })
            .collect();
        let rows = top_journals(&refs(&records), 10);
        assert_eq!(rows.len(), 10);
        assert!(is_count_desc(&rows));
        assert_eq!(rows[0].count, 6);
    }

    #[test]
    fn ties_are_broken_alphabetically() {
        let records = vec![
            rec(None, Some("Zeta"), None, None),
            rec(None, Some("Alpha"), None, None),
            rec(None, Some("Mid"), None, None),
        ];
        let labels: Vec<String> = top_journals(&refs(&records), 10)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, ["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn title_tokens_lowercase_and_count() {
        let records = vec![
            rec(Some("Covid study"), None, None, None),
            rec(Some("COVID  vaccine study"), None, None, None),
            rec(None, None, None, None),
        ];
        let rows = title_tokens(&refs(&records), 100);
        assert_eq!(
            rows,
            vec![
                CountRow::new("covid".to_string(), 2),
                CountRow::new("study".to_string(), 2),
                CountRow::new("vaccine".to_string(), 1),
            ]
        );
    }

    #[test]
    fn title_tokens_respect_limit() {
        let records = vec![rec(Some("a b c d e f g"), None, None, None)];
        assert_eq!(title_tokens(&refs(&records), 3).len(), 3);
    }

    #[test]
    fn source_distribution_explodes_multi_values() {
        let records = vec![
            rec(None, None, None, Some("A;B")),
            rec(None, None, None, Some("A")),
        ];
        let rows = source_distribution(&refs(&records), 10);
        assert_eq!(
            rows,
            vec![CountRow::new("A".to_string(), 2), CountRow::new("B".to_string(), 1)]
        );
    }

    #[test]
    fn source_distribution_trims_and_skips_empty_pieces() {
        let records = vec![
            rec(None, None, None, Some("Elsevier; Medline;;PMC")),
            rec(None, None, None, Some("Medline")),
            rec(None, None, None, None),
        ];
        let rows = source_distribution(&refs(&records), 10);
        assert_eq!(rows[0], CountRow::new("Medline".to_string(), 2));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| !r.label.is_empty()));
    }

    #[test]
    fn source_distribution_truncates_to_limit() {
        let joined: String = (0..15).map(|i| format!("S{i};")).collect();
        let records = vec![rec(None, None, None, Some(&joined))];
        let rows = source_distribution(&refs(&records), 10);
        assert_eq!(rows.len(), 10);
        assert!(is_count_desc(&rows));
    }

    #[test]
    fn journal_options_are_sorted_and_distinct() {
        let records = vec![
            rec(None, Some("Lancet"), None, None),
            rec(None, Some("BMJ"), None, None),
            rec(None, Some("Lancet"), None, None),
            rec(None, Some(""), None, None),
            rec(None, None, None, None),
        ];
        assert_eq!(journal_options(&records), ["BMJ", "Lancet"]);
    }
}
