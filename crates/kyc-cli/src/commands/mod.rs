//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use kyc_core::models::config::{KycConfig, OcrConfig};
use kyc_core::{DisabledRecognizer, PureOcrEngine, TextRecognizer};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kyc")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KycConfig> {
    if let Some(path) = config_path {
        return Ok(KycConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(KycConfig::from_file(&default_path)?)
    } else {
        Ok(KycConfig::default())
    }
}

/// Build the OCR engine from configured model files.
///
/// Without a model directory the service still starts, but every image
/// request fails with an OCR error.
pub fn build_recognizer(config: &OcrConfig) -> anyhow::Result<Arc<dyn TextRecognizer>> {
    match &config.model_dir {
        Some(dir) => Ok(Arc::new(PureOcrEngine::from_dir(dir, config)?)),
        None => {
            warn!("No OCR model directory configured (ocr.model_dir), image extraction is disabled");
            Ok(Arc::new(DisabledRecognizer::new(
                "no OCR model directory configured",
            )))
        }
    }
}
