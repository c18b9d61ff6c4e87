//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::TextRecognizer;

/// Detection model file name inside the model directory.
pub const DETECTION_MODEL: &str = "det.onnx";
/// Recognition model file name inside the model directory.
pub const RECOGNITION_MODEL: &str = "latin_rec.onnx";
/// Character dictionary file name inside the model directory.
pub const DICTIONARY: &str = "latin_dict.txt";

/// Rows closer than this (in pixels) are read left to right.
const ROW_HEIGHT: f64 = 20.0;

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
///
/// The inner engine caches model plans in `RefCell`s, so requests from the
/// blocking pool take turns through the mutex.
pub struct PureOcrEngine {
    engine: Mutex<pure_onnx_ocr::engine::OcrEngine>,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(DETECTION_MODEL);
        let rec_path = model_dir.join(RECOGNITION_MODEL);
        let dict_path = model_dir.join(DICTIONARY);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "missing model file {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine: Mutex::new(engine),
            keep_unk: config.keep_unk,
        })
    }
}

impl TextRecognizer for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let results = {
            let engine = self
                .engine
                .lock()
                .map_err(|e| OcrError::Recognition(format!("OCR engine lock poisoned: {}", e)))?;
            engine
                .run_from_image(image)
                .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?
        };

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut lines: Vec<((f64, f64), String)> = results
            .iter()
            .map(|r| {
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                (top_left(&r.bounding_box), text)
            })
            .collect();

        // Reading order: top to bottom, then left to right within a row
        lines.sort_by(|((ax, ay), _), ((bx, by), _)| {
            let row_a = (ay / ROW_HEIGHT) as i64;
            let row_b = (by / ROW_HEIGHT) as i64;
            row_a
                .cmp(&row_b)
                .then_with(|| ax.partial_cmp(bx).unwrap_or(Ordering::Equal))
        });

        let text = lines
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {} chars in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Smallest x and y of a detected region's polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .fold((f64::INFINITY, f64::INFINITY), |(x, y), c| {
            (x.min(c.x), y.min(c.y))
        })
}
