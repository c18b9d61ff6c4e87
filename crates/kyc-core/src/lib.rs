//! Core library for KYC document OCR processing.
//!
//! This crate provides:
//! - Line classification against ordered, per-document rule tables
//! - Field extraction for Aadhaar (identity) and PAN (tax-id) cards
//! - Record assembly and insert-only persistence
//! - An extraction service wiring OCR, extraction and storage together

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod service;
pub mod store;

pub use error::{ExtractionFailure, KycError, OcrError, Result, ServiceError, StoreError};
pub use extract::{ExtractionResult, FieldValues, RawText, RuleExtractor, assemble};
pub use models::config::KycConfig;
pub use models::record::{
    DocumentKind, ExtractedRecord, FieldKind, IdentityRecord, PersistedRecord, TaxIdRecord,
};
pub use ocr::{DisabledRecognizer, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use service::{ExtractionResponse, ExtractionService};
pub use store::{JsonlStore, MemoryStore, RecordStore, open_store};
