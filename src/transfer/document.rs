use crate::models::Word;
use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Portable dictionary document. Content only: ids and learning progress
/// never leave the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDocument {
    #[serde(alias = "schema")]
    pub schema_version: u32,
    /// Epoch milliseconds.
    #[serde(default)]
    pub exported_at: i64,
    #[serde(default)]
    pub words: Vec<WordRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub category: String,
}

impl From<&Word> for WordRecord {
    fn from(word: &Word) -> Self {
        Self {
            original: word.original.trim().to_string(),
            translation: word.translation.trim().to_string(),
            category: word.category.trim().to_string(),
        }
    }
}

impl DictionaryDocument {
    pub fn new(exported_at: i64, words: Vec<WordRecord>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            exported_at,
            words,
        }
    }
}
