//! Article and tag records
//!
//! Both record types serialize to the artifact formats consumed by the API:
//! - tags: `{"id": 1, "Tag": "..."}`
//! - articles: `{"id": 1, "<field>": "...", ...}` with field order preserved

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One article: an ordered set of named fields plus a sequential identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// 1-based position in whichever sequence the record currently belongs to
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,

    /// Remaining fields in source order (title, summary, keyword, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ArticleRecord {
    /// Create a record from a field map, dropping any `id` key it carries
    pub fn new(id: u64, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Raw keyword value for `field`
    ///
    /// Missing fields and non-string values are treated as the empty string,
    /// matching spreadsheet data with merged or blank cells.
    pub fn keyword_raw(&self, field: &str) -> &str {
        match self.fields.get(field) {
            Some(Value::String(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Keyword value for `field` with surrounding whitespace removed
    ///
    /// Returns `None` when the keyword is missing or blank.
    pub fn keyword(&self, field: &str) -> Option<&str> {
        let kw = self.keyword_raw(field).trim();
        if kw.is_empty() {
            None
        } else {
            Some(kw)
        }
    }

    /// Get a field as a string slice, if it is a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Accept whatever an upstream tool wrote for `id`
///
/// Ids are reassigned on every ranking pass, so a malformed one only needs to
/// not reject the record. Numeric strings and integral floats keep their value;
/// anything else becomes 0.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(id)
}

/// One selected keyword and its rank-derived identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: u64,

    #[serde(rename = "Tag")]
    pub label: String,
}
