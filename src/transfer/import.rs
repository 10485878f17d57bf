use super::document::{DictionaryDocument, WordRecord, CURRENT_SCHEMA_VERSION};
use super::{DictionaryTransfer, ImportReport};
use crate::db::word;
use crate::error::{Error, Result};
use crate::models::NewWord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordOutcome {
    Added,
    Updated,
    Skipped,
}

impl DictionaryTransfer<'_> {
    /// Merges the document read from `source` into the dictionary.
    ///
    /// Unreadable input, bad JSON, a foreign schema version or an empty word
    /// list abort before anything is written. After that each record is
    /// applied on its own: a word already present under the same
    /// (category, original) key gets its text refreshed with its progress
    /// kept, anything else is inserted as a new custom word.
    pub fn import_from<R: Read>(&self, mut source: R) -> Result<ImportReport> {
        let mut json = String::new();
        source.read_to_string(&mut json)?;
        if json.trim().is_empty() {
            return Err(Error::EmptyDocument);
        }

        let document: DictionaryDocument = serde_json::from_str(&json)?;
        if document.schema_version != CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                version = document.schema_version,
                "Rejected import with unsupported schema"
            );
            return Err(Error::UnsupportedSchema(document.schema_version));
        }
        if document.words.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut report = ImportReport::default();
        for record in &document.words {
            let outcome = match self.apply_record(record) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(original = %record.original, "Skipping import record: {}", e);
                    RecordOutcome::Skipped
                }
            };
            match outcome {
                RecordOutcome::Added => report.added += 1,
                RecordOutcome::Updated => report.updated += 1,
                RecordOutcome::Skipped => report.skipped += 1,
            }
        }

        tracing::info!(
            added = report.added,
            updated = report.updated,
            skipped = report.skipped,
            "Dictionary imported"
        );
        Ok(report)
    }

    pub fn import_from_path(&self, path: &Path) -> Result<ImportReport> {
        let file = File::open(path)?;
        self.import_from(BufReader::new(file))
    }

    fn apply_record(&self, record: &WordRecord) -> Result<RecordOutcome> {
        let original = record.original.trim();
        let translation = record.translation.trim();
        let category = record.category.trim();

        if original.is_empty() || translation.is_empty() {
            return Ok(RecordOutcome::Skipped);
        }

        match word::find_by_normalized_key(self.conn, original, category)? {
            Some(existing) => {
                word::update_content(self.conn, existing.id, original, translation, category)?;
                Ok(RecordOutcome::Updated)
            }
            None => {
                word::insert_word(self.conn, &NewWord::custom(original, translation, category))?;
                Ok(RecordOutcome::Added)
            }
        }
    }
}
