use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read input file {path}: {source}")]
    InputError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read {path} with any of the attempted encodings ({tried})")]
    EncodingError { path: String, tried: String },
    #[error("Failed to parse dish table: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to generate QR code: {0}")]
    QrError(String),
    #[error("Failed to load image: {0}")]
    AssetError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
