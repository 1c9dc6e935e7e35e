use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriagemError {
    #[error("not a readable xlsx workbook: {0}")]
    InvalidWorkbook(String),

    #[error("sheet '{sheet}' could not be parsed: {reason}")]
    SheetStructure { sheet: String, reason: String },

    #[error("no sheet produced schedule data ({0})")]
    NoScheduleData(String),

    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
