use comfy_table::{Cell, Color, Table};

use crate::core::{SampleRow, ViewModel};
use crate::output::chart::print_count_chart;
use crate::output::cloud::print_word_cloud;
use crate::output::format::{
    NumberFormat, create_styled_table, format_number, header_cell, missing_cell, right_cell,
    truncate_text,
};

const TITLE_WIDTH: usize = 60;
const JOURNAL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DisplayOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

/// Print the match summary with optional load timing
pub(crate) fn print_summary_line(
    matched: usize,
    total: usize,
    opts: &DisplayOptions,
    elapsed_ms: Option<f64>,
) {
    let stats_text = format!(
        "{} of {} papers match",
        format_number(matched, opts.number_format),
        format_number(total, opts.number_format)
    );

    if let Some(ms) = elapsed_ms {
        if opts.use_color {
            println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, ms);
        } else {
            println!("\n  {} | {:.0}ms\n", stats_text, ms);
        }
    } else {
        println!("\n  {}\n", stats_text);
    }
}

fn text_cell(value: Option<&str>, max: usize, use_color: bool) -> Cell {
    match value {
        Some(text) if !text.is_empty() => Cell::new(truncate_text(text, max)),
        _ => missing_cell(use_color),
    }
}

pub(super) fn build_sample_table(rows: &[SampleRow], opts: &DisplayOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Title", c),
        header_cell("Journal", c),
        header_cell("Published", c),
        header_cell("Abstract Words", c),
    ]);
    for row in rows {
        table.add_row(vec![
            text_cell(row.title.as_deref(), TITLE_WIDTH, c),
            text_cell(row.journal.as_deref(), JOURNAL_WIDTH, c),
            text_cell(row.publish_time.as_deref(), 10, c),
            right_cell(&format_number(row.abstract_word_count, opts.number_format)),
        ]);
    }
    table
}

pub(crate) fn print_sample_table(rows: &[SampleRow], opts: &DisplayOptions) {
    println!("\n  Sample of Filtered Data\n");
    if rows.is_empty() {
        println!("  No papers match the current filters.");
        return;
    }
    println!("{}", build_sample_table(rows, opts));
}

/// Print every section of a view model in dashboard order
pub(crate) fn print_dashboard(view: &ViewModel, opts: &DisplayOptions, elapsed_ms: Option<f64>) {
    let heading = "CORD-19 Data Explorer";
    if opts.use_color {
        println!("\n  \x1b[1m{heading}\x1b[0m");
    } else {
        println!("\n  {heading}");
    }
    println!(
        "  Years {}-{} | Journal: {}",
        view.criteria.year_min,
        view.criteria.year_max,
        view.criteria.journal.label()
    );
    print_summary_line(view.matched_records, view.total_records, opts, elapsed_ms);

    print_sample_table(&view.sample, opts);
    print_count_chart(
        "Publications by Year",
        &view.yearly,
        "Year",
        Color::Green,
        opts,
    );
    print_count_chart(
        "Top Journals",
        &view.top_journals,
        "Journal",
        Color::Blue,
        opts,
    );
    if let Some(words) = &view.title_words {
        print_word_cloud(words, opts);
    }
    if let Some(sources) = &view.sources {
        print_count_chart("Papers by Source", sources, "Source", Color::Yellow, opts);
    }
    println!();
}

pub(super) fn build_journal_list(journals: &[String], opts: &DisplayOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![header_cell("Journal", opts.use_color)]);
    for journal in journals {
        table.add_row(vec![Cell::new(journal)]);
    }
    table
}

/// Print the journal selector options, `All` first
pub(crate) fn print_journal_list(journals: &[String], opts: &DisplayOptions) {
    println!("\n  Journals\n");
    println!("{}", build_journal_list(journals, opts));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: Option<&str>, journal: Option<&str>, words: usize) -> SampleRow {
        SampleRow {
            title: title.map(str::to_string),
            journal: journal.map(str::to_string),
            publish_time: Some("2020-05-01".into()),
            abstract_word_count: words,
        }
    }

    #[test]
    fn sample_table_shows_rows() {
        let rows = vec![sample(Some("Covid study"), Some("Lancet"), 1500)];
        let text = build_sample_table(&rows, &DisplayOptions::default()).to_string();
        assert!(text.contains("Covid study"));
        assert!(text.contains("Lancet"));
        assert!(text.contains("2020-05-01"));
        assert!(text.contains("1,500"));
    }

    #[test]
    fn sample_table_marks_missing_values() {
        let rows = vec![sample(None, Some(""), 0)];
        let text = build_sample_table(&rows, &DisplayOptions::default()).to_string();
        assert_eq!(text.matches('—').count(), 2);
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(200);
        let rows = vec![sample(Some(&long), None, 0)];
        let text = build_sample_table(&rows, &DisplayOptions::default()).to_string();
        assert!(!text.contains(&long));
        assert!(text.contains('…'));
    }

    #[test]
    fn journal_list_has_one_row_per_name() {
        let names = vec!["All".to_string(), "BMJ".to_string(), "Lancet".to_string()];
        let text = build_journal_list(&names, &DisplayOptions::default()).to_string();
        for name in &names {
            assert!(text.contains(name.as_str()));
        }
    }
}
