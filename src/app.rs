use std::path::Path;
use std::time::Instant;

use comfy_table::Color;

use crate::cli::{Cli, Commands};
use crate::consts::{ALL_JOURNALS, SAMPLE_ROWS};
use crate::core::{
    CountRow, FilterCriteria, Record, ViewLimits, filter, journal_options, render, render_with,
    sample_rows, source_distribution, title_tokens, top_journals, yearly_counts,
};
use crate::error::AppError;
use crate::output::{
    DisplayOptions, ExportLayout, NumberFormat, output_counts_json, output_dashboard_json,
    output_journal_list_json, output_sample_json, print_count_chart, print_dashboard,
    print_journal_list, print_sample_table, print_summary_line, print_word_cloud, serialize_csv,
    write_export,
};
use crate::source::{DataLoader, Dataset, DatasetCache, DiskCache};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) dataset: &'a Dataset,
    pub(crate) criteria: FilterCriteria,
    pub(crate) display: DisplayOptions,
    pub(crate) elapsed_ms: f64,
}

impl CommandContext<'_> {
    fn selection(&self) -> Vec<&Record> {
        let selected = filter(&self.dataset.records, &self.criteria);
        tracing::debug!(
            matched = selected.len(),
            total = self.dataset.records.len(),
            "applied filter"
        );
        selected
    }
}

fn handle_dashboard(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let records = &ctx.dataset.records;
    let toggles = ctx.cli.toggles();
    let view = match ctx.cli.sample_rows {
        Some(rows) => render_with(
            records,
            &ctx.criteria,
            toggles,
            &ViewLimits {
                sample_rows: rows,
                ..ViewLimits::default()
            },
        ),
        None => render(records, &ctx.criteria, toggles),
    };

    if ctx.cli.json {
        println!("{}", output_dashboard_json(&view)?);
    } else {
        print_dashboard(&view, &ctx.display, Some(ctx.elapsed_ms));
    }
    Ok(())
}

fn handle_sample(ctx: &CommandContext<'_>, limit: usize) -> Result<(), AppError> {
    let selected = ctx.selection();
    let rows = sample_rows(&selected, limit);
    if ctx.cli.json {
        println!(
            "{}",
            output_sample_json(&ctx.criteria, selected.len(), &rows)?
        );
    } else {
        print_summary_line(
            selected.len(),
            ctx.dataset.records.len(),
            &ctx.display,
            None,
        );
        print_sample_table(&rows, &ctx.display);
    }
    Ok(())
}

/// Shared shape of the single-view commands: counts as JSON or as a chart
fn handle_counts<K: serde::Serialize + std::fmt::Display>(
    ctx: &CommandContext<'_>,
    matched: usize,
    rows: &[CountRow<K>],
    chart: (&str, &str, Color),
) -> Result<(), AppError> {
    if ctx.cli.json {
        println!("{}", output_counts_json(&ctx.criteria, matched, rows)?);
    } else {
        let (title, label, color) = chart;
        print_summary_line(matched, ctx.dataset.records.len(), &ctx.display, None);
        print_count_chart(title, rows, label, color, &ctx.display);
    }
    Ok(())
}

fn handle_years(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let selected = ctx.selection();
    let rows = yearly_counts(&selected);
    handle_counts(
        ctx,
        selected.len(),
        &rows,
        ("Publications by Year", "Year", Color::Green),
    )
}

fn handle_journals(ctx: &CommandContext<'_>, limit: usize) -> Result<(), AppError> {
    let selected = ctx.selection();
    let rows = top_journals(&selected, limit);
    handle_counts(
        ctx,
        selected.len(),
        &rows,
        ("Top Journals", "Journal", Color::Blue),
    )
}

fn handle_sources(ctx: &CommandContext<'_>, limit: usize) -> Result<(), AppError> {
    let selected = ctx.selection();
    let rows = source_distribution(&selected, limit);
    handle_counts(
        ctx,
        selected.len(),
        &rows,
        ("Papers by Source", "Source", Color::Yellow),
    )
}

fn handle_words(ctx: &CommandContext<'_>, limit: usize) -> Result<(), AppError> {
    let selected = ctx.selection();
    let rows = title_tokens(&selected, limit);
    if ctx.cli.json {
        println!(
            "{}",
            output_counts_json(&ctx.criteria, selected.len(), &rows)?
        );
    } else {
        print_summary_line(
            selected.len(),
            ctx.dataset.records.len(),
            &ctx.display,
            None,
        );
        print_word_cloud(&rows, &ctx.display);
    }
    Ok(())
}

fn handle_list_journals(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut options = vec![ALL_JOURNALS.to_string()];
    options.extend(journal_options(&ctx.dataset.records));
    if ctx.cli.json {
        println!("{}", output_journal_list_json(&options)?);
    } else {
        print_journal_list(&options, &ctx.display);
    }
    Ok(())
}

fn handle_export(ctx: &CommandContext<'_>, output: &Path, full: bool) -> Result<(), AppError> {
    let layout = if full {
        ExportLayout::Full
    } else {
        ExportLayout::Summary
    };
    let selected = ctx.selection();
    let bytes = serialize_csv(&selected, layout)?;
    write_export(&bytes, output)?;
    tracing::info!(
        path = %output.display(),
        rows = selected.len(),
        bytes = bytes.len(),
        "exported selection"
    );

    if output.as_os_str() != "-" {
        println!(
            "Exported {} papers to {}",
            selected.len(),
            output.display()
        );
    }
    Ok(())
}

/// Load the dataset once and dispatch the selected command
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let criteria = cli.criteria()?;
    if criteria.is_inverted() {
        tracing::warn!(
            from = criteria.year_min,
            to = criteria.year_max,
            "year range is inverted, nothing will match"
        );
    }

    let memory = DatasetCache::new();
    let disk = if cli.disk_cache_enabled() {
        DiskCache::default_location()
    } else {
        None
    };
    let start = Instant::now();
    let dataset = DataLoader::new(&memory, disk).load(&cli.data_path())?;

    let ctx = CommandContext {
        cli,
        dataset: &dataset,
        criteria,
        display: DisplayOptions {
            use_color: cli.use_color(),
            number_format,
        },
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    match &cli.command {
        None | Some(Commands::Dashboard) => handle_dashboard(&ctx),
        Some(Commands::Sample { limit }) => {
            let limit = limit.or(cli.sample_rows).unwrap_or(SAMPLE_ROWS);
            handle_sample(&ctx, limit)
        }
        Some(Commands::Years) => handle_years(&ctx),
        Some(Commands::Journals { limit }) => handle_journals(&ctx, *limit),
        Some(Commands::Words { limit }) => handle_words(&ctx, *limit),
        Some(Commands::Sources { limit }) => handle_sources(&ctx, *limit),
        Some(Commands::ListJournals) => handle_list_journals(&ctx),
        Some(Commands::Export { output, full }) => handle_export(&ctx, output, *full),
    }
}
