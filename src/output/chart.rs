//! Horizontal bar charts rendered as table rows

use comfy_table::{Cell, Color, Table};
use std::fmt::Display;

use crate::core::CountRow;
use crate::output::format::{create_styled_table, format_number, header_cell, right_cell};
use crate::output::table::DisplayOptions;

const BAR_WIDTH: usize = 30;
const BAR_CHAR: char = '█';

/// Bar length for `count`, scaled so `max` fills `width`. Non-zero counts
/// always get at least one block.
pub(super) fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    let scaled = (count as f64 / max as f64 * width as f64).round() as usize;
    scaled.clamp(1, width)
}

pub(super) fn build_count_chart<K: Display>(
    rows: &[CountRow<K>],
    label_header: &str,
    bar_color: Color,
    opts: &DisplayOptions,
) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(label_header, c),
        header_cell("Papers", c),
        header_cell("", c),
    ]);

    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    for row in rows {
        let bar: String = std::iter::repeat_n(BAR_CHAR, bar_length(row.count, max, BAR_WIDTH))
            .collect();
        let mut bar_cell = Cell::new(bar);
        if c {
            bar_cell = bar_cell.fg(bar_color);
        }
        table.add_row(vec![
            Cell::new(row.label.to_string()),
            right_cell(&format_number(row.count, opts.number_format)),
            bar_cell,
        ]);
    }
    table
}

pub(crate) fn print_count_chart<K: Display>(
    title: &str,
    rows: &[CountRow<K>],
    label_header: &str,
    bar_color: Color,
    opts: &DisplayOptions,
) {
    println!("\n  {title}\n");
    if rows.is_empty() {
        println!("  No data for the current filters.");
        return;
    }
    println!("{}", build_count_chart(rows, label_header, bar_color, opts));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_length_scales_to_width() {
        assert_eq!(bar_length(10, 10, 30), 30);
        assert_eq!(bar_length(5, 10, 30), 15);
        assert_eq!(bar_length(1, 1000, 30), 1);
        assert_eq!(bar_length(0, 10, 30), 0);
        assert_eq!(bar_length(0, 0, 30), 0);
    }

    #[test]
    fn chart_contains_labels_and_counts() {
        let rows = vec![CountRow::new(2020, 1200), CountRow::new(2021, 600)];
        let table = build_count_chart(&rows, "Year", Color::Green, &DisplayOptions::default());
        let text = table.to_string();
        assert!(text.contains("2020"));
        assert!(text.contains("1,200"));
        assert!(text.contains("600"));
        assert!(text.contains(&BAR_CHAR.to_string().repeat(BAR_WIDTH)));
    }
}
