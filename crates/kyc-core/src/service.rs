//! Extraction service: upload → OCR → field extraction → persistence.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ExtractionFailure, ServiceError};
use crate::extract::{ExtractionResult, RawText, RuleExtractor};
use crate::models::record::{DocumentKind, ExtractedRecord, PersistedRecord};
use crate::ocr::TextRecognizer;
use crate::store::RecordStore;

/// Successful extraction response body.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResponse {
    pub message: String,
    pub extracted_data: ExtractedRecord,
    pub inserted_id: String,
}

impl From<PersistedRecord> for ExtractionResponse {
    fn from(persisted: PersistedRecord) -> Self {
        Self {
            message: format!(
                "{} data extracted successfully!",
                persisted.kind().display_name()
            ),
            extracted_data: persisted.record,
            inserted_id: persisted.id,
        }
    }
}

/// Runs one extraction request end to end.
///
/// Holds no per-request state; the OCR engine and the record store are
/// injected and shared.
#[derive(Clone)]
pub struct ExtractionService {
    ocr: Arc<dyn TextRecognizer>,
    store: Arc<dyn RecordStore>,
}

impl ExtractionService {
    pub fn new(ocr: Arc<dyn TextRecognizer>, store: Arc<dyn RecordStore>) -> Self {
        Self { ocr, store }
    }

    /// Name of the injected OCR engine.
    pub fn ocr_engine(&self) -> &'static str {
        self.ocr.name()
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Process an uploaded image of a `kind` document.
    ///
    /// `upload` is `None` when the request carried no file for the
    /// document's upload field.
    pub fn process(
        &self,
        kind: DocumentKind,
        upload: Option<&[u8]>,
    ) -> Result<ExtractionResponse, ServiceError> {
        let bytes = upload.ok_or(ServiceError::InputMissing(kind))?;
        info!("{} extraction requested ({} bytes)", kind, bytes.len());

        let text = self.recognize(bytes)?;
        self.process_text(kind, &text)
    }

    /// Decode image bytes and run OCR on them.
    pub fn recognize(&self, bytes: &[u8]) -> Result<String, ExtractionFailure> {
        let image = image::load_from_memory(bytes)?;
        let text = self.ocr.recognize(&image)?;
        debug!("Extracted text:\n{}", text);
        Ok(text)
    }

    /// Extract and persist a record from already recognized text.
    pub fn process_text(
        &self,
        kind: DocumentKind,
        text: &str,
    ) -> Result<ExtractionResponse, ServiceError> {
        let result = self.extract(kind, text);
        let persisted = self.store.insert(&result.record)?;

        info!(
            "{} data inserted into {} with id {}",
            kind,
            kind.collection(),
            persisted.id
        );

        Ok(persisted.into())
    }

    /// Extract a record without persisting it.
    pub fn extract(&self, kind: DocumentKind, text: &str) -> ExtractionResult {
        RuleExtractor::for_kind(kind).extract(&RawText::new(text))
    }
}
