use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON format: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u32),

    #[error("The file contains no words")]
    EmptyDocument,

    #[error("Dictionary is empty, nothing to export")]
    EmptyDictionary,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Word {0} not found")]
    WordNotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}
