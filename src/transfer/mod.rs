//! Dictionary exchange: export to and merge from the portable JSON document.

pub mod document;
mod export;
mod import;

pub use document::{DictionaryDocument, WordRecord, CURRENT_SCHEMA_VERSION};

use rusqlite::Connection;

/// Import/export over one store connection.
pub struct DictionaryTransfer<'a> {
    conn: &'a Connection,
}

impl<'a> DictionaryTransfer<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub exported_count: usize,
}

impl ExportReport {
    pub fn summary(&self) -> String {
        format!("Exported {} words", self.exported_count)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl ImportReport {
    pub fn total_processed(&self) -> usize {
        self.added + self.updated + self.skipped
    }

    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.added, "added"),
            (self.updated, "updated"),
            (self.skipped, "skipped"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{} {}", count, label))
        .collect();

        if parts.is_empty() {
            "Import finished: nothing changed".to_string()
        } else {
            format!("Import finished: {}", parts.join(", "))
        }
    }
}
