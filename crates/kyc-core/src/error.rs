//! Error types for the kyc-core library.

use thiserror::Error;

use crate::models::record::DocumentKind;

/// Main error type for the kyc library.
#[derive(Error, Debug)]
pub enum KycError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No OCR engine is available.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Writing to or reading from the backing files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The store is in an unusable state (e.g. a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures that abort a request before a record is assembled.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    /// Uploaded bytes are not a decodable image.
    #[error("cannot identify image file: {0}")]
    Decode(#[from] image::ImageError),

    /// The OCR capability failed.
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Outcome of a failed extraction request.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The required upload field was not supplied.
    #[error("No {} file uploaded", .0.display_name())]
    InputMissing(DocumentKind),

    /// Decoding or OCR failed; nothing was persisted.
    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    /// The record was assembled but the insert failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    /// Whether the failure was caused by the caller's request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InputMissing(_))
    }
}

/// Result type for the kyc library.
pub type Result<T> = std::result::Result<T, KycError>;
