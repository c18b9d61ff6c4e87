//! HTTP routes for the extraction service.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

use kyc_core::models::config::ServerConfig;
use kyc_core::{DocumentKind, ExtractionResponse, ExtractionService, ServiceError};

/// Shared application state.
pub struct AppState {
    pub service: ExtractionService,
}

/// Build the router with both extraction routes.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/extract_aadhaar", post(extract_aadhaar))
        .route("/extract_pan", post(extract_pan))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state);

    if config.permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn extract_aadhaar(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResponse>, AppError> {
    extract_document(state, DocumentKind::Identity, multipart).await
}

async fn extract_pan(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResponse>, AppError> {
    extract_document(state, DocumentKind::TaxId, multipart).await
}

async fn extract_document(
    state: Arc<AppState>,
    kind: DocumentKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResponse>, AppError> {
    info!("{} API hit", kind);

    let upload = match multipart {
        Ok(mut multipart) => read_upload(&mut multipart, kind.upload_field()).await?,
        Err(rejection) => {
            debug!("Request is not multipart: {}", rejection);
            None
        }
    };

    // OCR and the store are blocking
    let response = tokio::task::spawn_blocking(move || {
        state.service.process(kind, upload.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))??;

    Ok(Json(response))
}

/// Read the bytes of the named file part, skipping any other fields.
///
/// Plain form values with the right name are not uploads and are ignored.
async fn read_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<Vec<u8>>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(AppError::upload)? {
        if field.name() != Some(field_name) {
            continue;
        }
        if field.file_name().is_none() {
            debug!("Ignoring non-file field {}", field_name);
            continue;
        }
        let bytes = field.bytes().await.map_err(AppError::upload)?;
        upload = Some(bytes.to_vec());
    }

    Ok(upload)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "kyc",
        "version": env!("CARGO_PKG_VERSION"),
        "ocr_engine": state.service.ocr_engine(),
        "store": state.service.store().name(),
    }))
}

// Error handling

#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    /// The multipart body could not be read (too large, malformed).
    Upload(StatusCode, String),
    Internal(String),
}

impl AppError {
    fn upload(err: MultipartError) -> Self {
        Self::Upload(err.status(), format!("failed to read upload: {}", err.body_text()))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Service(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Service(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Upload(status, msg) => (status, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!("Error during extraction: {}", message);
        } else {
            debug!("Rejected request: {}", message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
