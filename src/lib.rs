pub mod app;
pub mod config;
pub mod db;
pub mod dictionary;
pub mod error;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod session;
pub mod settings;
pub mod transfer;
pub mod transfer_worker;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{AppState, Question, Statistics, Word};
pub use quiz::QuizEngine;
pub use session::{handle_quiz_input, QuizSession};
pub use transfer::{DictionaryDocument, DictionaryTransfer, ExportReport, ImportReport};
pub use transfer_worker::{spawn_transfer_worker, TransferRequest, TransferResponse};
