//! Title word cloud, rendered as a weighted term table
//!
//! Stop words are dropped here rather than in the aggregator: which words
//! are worth drawing is a presentation decision.

use comfy_table::{Attribute, Cell, Color, Table};
use serde::Serialize;

use crate::core::CountRow;
use crate::output::format::{create_styled_table, format_number, header_cell, right_cell};
use crate::output::table::DisplayOptions;

const MAX_WEIGHT: u8 = 5;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "against", "all", "also", "among", "an", "and", "any", "are", "as",
    "at", "be", "been", "before", "between", "both", "but", "by", "can", "could", "did", "do",
    "does", "during", "each", "for", "from", "had", "has", "have", "he", "her", "his", "how",
    "however", "i", "if", "in", "into", "is", "it", "its", "more", "most", "no", "not", "of",
    "on", "or", "other", "our", "over", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "under", "up", "using", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "why", "will", "with", "within", "without", "would", "you", "your", "-", "&", ":",
];

/// A term sized for display; `weight` runs from 1 (smallest) to 5
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CloudTerm {
    pub(crate) term: String,
    pub(crate) count: usize,
    pub(crate) weight: u8,
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn weight(count: usize, max: usize) -> u8 {
    if max == 0 {
        return 1;
    }
    let scaled = (count as f64 / max as f64 * f64::from(MAX_WEIGHT)).ceil() as u8;
    scaled.clamp(1, MAX_WEIGHT)
}

/// Drop stop words and attach a relative weight to the remaining terms
pub(crate) fn cloud_terms(words: &[CountRow<String>]) -> Vec<CloudTerm> {
    let kept: Vec<&CountRow<String>> = words.iter().filter(|w| !is_stop_word(&w.label)).collect();
    let max = kept.iter().map(|w| w.count).max().unwrap_or(0);
    kept.into_iter()
        .map(|w| CloudTerm {
            term: w.label.clone(),
            count: w.count,
            weight: weight(w.count, max),
        })
        .collect()
}

fn weight_color(weight: u8) -> Color {
    match weight {
        5 => Color::Magenta,
        4 => Color::Blue,
        3 => Color::Cyan,
        2 => Color::Green,
        _ => Color::DarkGrey,
    }
}

pub(super) fn build_cloud_table(terms: &[CloudTerm], opts: &DisplayOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Term", c),
        header_cell("Count", c),
        header_cell("Size", c),
    ]);
    for term in terms {
        let mut term_cell = Cell::new(&term.term);
        if c {
            term_cell = term_cell.fg(weight_color(term.weight));
        }
        if term.weight == MAX_WEIGHT {
            term_cell = term_cell.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            term_cell,
            right_cell(&format_number(term.count, opts.number_format)),
            Cell::new("●".repeat(usize::from(term.weight))),
        ]);
    }
    table
}

pub(crate) fn print_word_cloud(words: &[CountRow<String>], opts: &DisplayOptions) {
    println!("\n  Word Cloud of Paper Titles\n");
    let terms = cloud_terms(words);
    if terms.is_empty() {
        println!("  No title words for the current filters.");
        return;
    }
    println!("{}", build_cloud_table(&terms, opts));
}
