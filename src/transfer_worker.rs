use crate::db;
use crate::transfer::{DictionaryTransfer, ExportReport, ImportReport};
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;

#[derive(Debug, Clone, PartialEq)]
pub enum TransferRequest {
    Export { path: PathBuf },
    Import { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransferResponse {
    Exported(ExportReport),
    Imported(ImportReport),
    Failed { operation: &'static str, error: String },
}

impl TransferResponse {
    pub fn message(&self) -> String {
        match self {
            TransferResponse::Exported(report) => report.summary(),
            TransferResponse::Imported(report) => report.summary(),
            TransferResponse::Failed { operation, error } => {
                format!("{} failed: {}", operation, error)
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TransferResponse::Failed { .. })
    }
}

impl TransferRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            TransferRequest::Export { .. } => "Export",
            TransferRequest::Import { .. } => "Import",
        }
    }
}

/// Runs one request against `transfer`, folding any error into
/// `TransferResponse::Failed`.
pub fn execute(transfer: &DictionaryTransfer, request: &TransferRequest) -> TransferResponse {
    let result = match request {
        TransferRequest::Export { path } => transfer
            .export_to_path(path)
            .map(TransferResponse::Exported),
        TransferRequest::Import { path } => transfer
            .import_from_path(path)
            .map(TransferResponse::Imported),
    };

    result.unwrap_or_else(|e| TransferResponse::Failed {
        operation: request.operation(),
        error: e.to_string(),
    })
}

fn run_request(db_path: &Path, request: &TransferRequest) -> TransferResponse {
    match db::open_db(db_path) {
        Ok(conn) => execute(&DictionaryTransfer::new(&conn), request),
        Err(e) => TransferResponse::Failed {
            operation: request.operation(),
            error: e.to_string(),
        },
    }
}

/// Runs import/export requests on a background thread with its own
/// connection to `db_path`, so the UI stays responsive.
pub fn spawn_transfer_worker(
    db_path: PathBuf,
    response_tx: Sender<TransferResponse>,
    request_rx: Receiver<TransferRequest>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("word-quiz::transfer_worker".to_string())
        .spawn(move || {
            while let Ok(request) = request_rx.recv() {
                tracing::info!(?request, "Worker received transfer request");
                let response = run_request(&db_path, &request);
                if response.is_failure() {
                    tracing::warn!("{}", response.message());
                }
                if response_tx.send(response).is_err() {
                    break;
                }
            }
            tracing::debug!("Transfer worker channel disconnected, exiting");
        })
}
