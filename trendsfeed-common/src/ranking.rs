//! Article filtering and ranking by keyword frequency
//!
//! Articles whose keyword is among the selected keywords are grouped by that
//! keyword's rank; within a group the input order is kept. Identifiers are
//! then reassigned 1..N in output order.

use std::collections::HashMap;

use crate::keywords::KeywordCount;
use crate::records::ArticleRecord;

/// Filter `records` to the selected keywords and order them by keyword rank
pub fn filter_and_rank(
    records: &[ArticleRecord],
    selected: &[KeywordCount],
    field: &str,
) -> Vec<ArticleRecord> {
    let rank_of: HashMap<&str, usize> = selected
        .iter()
        .enumerate()
        .map(|(rank, kw)| (kw.label.as_str(), rank))
        .collect();

    let mut kept: Vec<(usize, &ArticleRecord)> = records
        .iter()
        .filter_map(|record| {
            let label = record.keyword(field)?;
            rank_of.get(label).map(|&rank| (rank, record))
        })
        .collect();

    // Stable: same-keyword articles stay in document order
    kept.sort_by_key(|(rank, _)| *rank);

    kept.into_iter()
        .enumerate()
        .map(|(i, (_, record))| {
            let mut out = record.clone();
            out.id = i as u64 + 1;
            out
        })
        .collect()
}
