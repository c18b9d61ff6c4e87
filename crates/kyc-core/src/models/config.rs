//! Configuration structures for the extraction service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::KycError;

/// Main configuration for the kyc service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KycConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Record storage configuration.
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub bind: String,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// Allow cross-origin requests from any origin.
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            permissive_cors: true,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: Option<PathBuf>,

    /// Keep `[UNK]` tokens in recognized text instead of replacing them with spaces.
    pub keep_unk: bool,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Append-only JSON lines files, one per collection.
    #[default]
    Jsonl,
    /// Process-local memory; records are lost on exit.
    Memory,
}

/// Record storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory for the `jsonl` backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Jsonl,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl KycConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| KycError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
