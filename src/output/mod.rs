mod chart;
mod cloud;
mod csv;
mod format;
mod json;
mod table;

pub(crate) use chart::print_count_chart;
pub(crate) use cloud::print_word_cloud;
pub(crate) use csv::{ExportLayout, serialize as serialize_csv, write_export};
pub(crate) use format::NumberFormat;
pub(crate) use json::{
    output_counts_json, output_dashboard_json, output_journal_list_json, output_sample_json,
};
pub(crate) use table::{
    DisplayOptions, print_dashboard, print_journal_list, print_sample_table, print_summary_line,
};
