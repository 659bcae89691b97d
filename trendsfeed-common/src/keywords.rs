//! Keyword frequency counting and top-K selection
//!
//! Counting is case-sensitive over trimmed, non-empty keyword values.
//! Selection orders labels by descending count; equal counts keep the order
//! in which each label was first seen in the input.

use std::collections::HashMap;

use crate::records::ArticleRecord;

/// Default number of keywords kept by top-K selection
pub const DEFAULT_TOP_K: usize = 10;

/// How many distinct keywords survive selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSelection {
    /// Keep the `k` most frequent keywords
    TopK(usize),
    /// Keep every distinct keyword, still frequency ordered
    Unlimited,
}

impl Default for TagSelection {
    fn default() -> Self {
        TagSelection::TopK(DEFAULT_TOP_K)
    }
}

/// One distinct keyword with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    /// Trimmed keyword, the join key between tags and articles
    pub label: String,
    /// Keyword exactly as it appeared on its first occurrence
    pub first_verbatim: String,
    /// Number of records carrying this keyword
    pub count: usize,
}

/// Keyword occurrence counts in first-seen order
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<KeywordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count keyword values of `field` across `records` in a single pass
    ///
    /// Records whose keyword is missing, non-string or blank are skipped.
    pub fn build(records: &[ArticleRecord], field: &str) -> Self {
        let mut table = Self::default();
        for record in records {
            let raw = record.keyword_raw(field);
            let label = raw.trim();
            if label.is_empty() {
                continue;
            }

            match table.index.get(label) {
                Some(&i) => table.entries[i].count += 1,
                None => {
                    table.index.insert(label.to_string(), table.entries.len());
                    table.entries.push(KeywordCount {
                        label: label.to_string(),
                        first_verbatim: raw.to_string(),
                        count: 1,
                    });
                }
            }
        }
        table
    }

    /// Occurrence count for a trimmed label (0 when never seen)
    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// Number of distinct labels
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total number of counted occurrences
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct labels in first-seen order
    pub fn entries(&self) -> &[KeywordCount] {
        &self.entries
    }

    /// Select keywords by descending count
    ///
    /// `sort_by` is stable and `entries` is in first-seen order, so ties go to
    /// the label that appeared earliest in the input.
    pub fn select(&self, selection: TagSelection) -> Vec<KeywordCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        if let TagSelection::TopK(k) = selection {
            ranked.truncate(k);
        }
        ranked
    }
}

/// Count keywords and select the ranked list in one call
pub fn extract_keywords(
    records: &[ArticleRecord],
    field: &str,
    selection: TagSelection,
) -> (FrequencyTable, Vec<KeywordCount>) {
    let table = FrequencyTable::build(records, field);
    let top = table.select(selection);
    (table, top)
}
