//! Core module - record model, filter engine, aggregators and render pipeline

mod aggregator;
mod filter;
mod pipeline;
mod types;

pub(crate) use aggregator::{
    journal_options, source_distribution, title_tokens, top_journals, yearly_counts,
};
pub(crate) use filter::filter;
pub(crate) use pipeline::{render, render_with, sample_rows};
pub(crate) use types::{
    CountRow, FilterCriteria, JournalFilter, Record, SampleRow, ViewLimits, ViewModel,
    ViewToggles,
};
