//! Tag registry construction

use crate::keywords::KeywordCount;
use crate::records::TagRecord;

/// Build tag records from ranked keywords
///
/// Identifier is the 1-based rank; the label is the keyword as first seen.
pub fn build_tag_registry(selected: &[KeywordCount]) -> Vec<TagRecord> {
    selected
        .iter()
        .enumerate()
        .map(|(i, kw)| TagRecord {
            id: i as u64 + 1,
            label: kw.first_verbatim.clone(),
        })
        .collect()
}
