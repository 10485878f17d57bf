use super::document::{DictionaryDocument, WordRecord};
use super::{DictionaryTransfer, ExportReport};
use crate::db::word;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl DictionaryTransfer<'_> {
    /// Serializes the whole dictionary to `sink` as pretty-printed JSON.
    pub fn export_to<W: Write>(&self, mut sink: W) -> Result<ExportReport> {
        let words = word::get_all_words(self.conn)?;
        if words.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        let records: Vec<WordRecord> = words.iter().map(WordRecord::from).collect();
        let document = DictionaryDocument::new(word::now_millis(), records);
        let json = serde_json::to_string_pretty(&document)?;

        sink.write_all(json.as_bytes())?;
        sink.flush()?;

        tracing::info!(count = document.words.len(), "Dictionary exported");
        Ok(ExportReport {
            exported_count: document.words.len(),
        })
    }

    pub fn export_to_path(&self, path: &Path) -> Result<ExportReport> {
        // Checked up front: an empty dictionary must not leave an empty file.
        if word::count_all(self.conn)? == 0 {
            return Err(Error::EmptyDictionary);
        }
        let file = File::create(path)?;
        self.export_to(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{test_db, word};
    use crate::error::Error;
    use crate::models::NewWord;
    use crate::transfer::{DictionaryDocument, DictionaryTransfer, CURRENT_SCHEMA_VERSION};

    #[test]
    fn test_export_writes_content_fields_only() {
        let (_dir, conn) = test_db();
        let id = word::insert_word(&conn, &NewWord::custom("cat", "кот", "General")).unwrap();
        word::mark_correct(&conn, id, 1).unwrap();
        word::insert_word(&conn, &NewWord::custom("dog", "собака", "General")).unwrap();

        let mut buffer = Vec::new();
        let report = DictionaryTransfer::new(&conn).export_to(&mut buffer).unwrap();
        assert_eq!(report.exported_count, 2);

        let doc: DictionaryDocument = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(doc.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(doc.exported_at > 0);
        assert_eq!(doc.words.len(), 2);
        assert_eq!(doc.words[0].original, "cat");
        assert_eq!(doc.words[0].translation, "кот");

        let raw: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let record = raw["words"][0].as_object().unwrap();
        assert_eq!(record.len(), 3);
        assert!(!record.contains_key("difficultyLevel"));
    }

    #[test]
    fn test_export_empty_dictionary_fails() {
        let (_dir, conn) = test_db();
        let mut buffer = Vec::new();

        let result = DictionaryTransfer::new(&conn).export_to(&mut buffer);
        assert!(matches!(result, Err(Error::EmptyDictionary)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_export_to_path() {
        let (dir, conn) = test_db();
        word::insert_word(&conn, &NewWord::custom("cat", "кот", "General")).unwrap();
        let path = dir.path().join("export.json");

        let report = DictionaryTransfer::new(&conn).export_to_path(&path).unwrap();
        assert_eq!(report.exported_count, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"schemaVersion\": 1"));
    }

    #[test]
    fn test_export_to_path_empty_leaves_no_file() {
        let (dir, conn) = test_db();
        let path = dir.path().join("export.json");

        let result = DictionaryTransfer::new(&conn).export_to_path(&path);
        assert!(matches!(result, Err(Error::EmptyDictionary)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_to_unwritable_path_is_io_error() {
        let (dir, conn) = test_db();
        word::insert_word(&conn, &NewWord::custom("cat", "кот", "General")).unwrap();
        let path = dir.path().join("missing-dir").join("export.json");

        let result = DictionaryTransfer::new(&conn).export_to_path(&path);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
