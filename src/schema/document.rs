/// Raw document shapes accepted by the library builder.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One raw entry of an ingested knowledge-base document.
///
/// `content` is `None` when the JSON field is absent or carries a
/// non-string value; classification treats both as "skip".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default, deserialize_with = "string_or_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub comment: String,
    /// Optional hint naming the outlet this entry was authored for.
    #[serde(default, rename = "outletName", skip_serializing_if = "Option::is_none")]
    pub outlet_name: Option<String>,
}

impl RawEntry {
    pub fn new(comment: &str, content: &str) -> Self {
        RawEntry {
            content: Some(content.to_string()),
            comment: comment.to_string(),
            outlet_name: None,
        }
    }
}

/// Accept any JSON value but keep only strings.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// A raw document: a flat array of entries, or an object carrying an
/// `entries` map whose values are entries. Any other shape normalizes
/// to no entries at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Flat(Vec<RawEntry>),
    Keyed { entries: IndexMap<String, RawEntry> },
    Unsupported(serde_json::Value),
}

impl Document {
    /// Parse a raw JSON document.
    pub fn from_json(input: &str) -> Result<Document, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Normalize to an entry sequence in document order.
    pub fn entries(&self) -> Vec<&RawEntry> {
        match self {
            Document::Flat(list) => list.iter().collect(),
            Document::Keyed { entries } => entries.values().collect(),
            Document::Unsupported(_) => Vec::new(),
        }
    }
}
