//! Extract command - run the extraction pipeline on a local file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kyc_core::{
    DisabledRecognizer, DocumentKind, ExtractionService, MemoryStore, RecordStore,
    TextRecognizer, open_store,
};

use super::{build_recognizer, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (card image, or OCR text with --from-text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Treat the input as already recognized text and skip OCR
    #[arg(long)]
    from_text: bool,

    /// Print the extracted record without storing it
    #[arg(long)]
    no_persist: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Aadhaar identity card
    Aadhaar,
    /// PAN tax-id card
    Pan,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Aadhaar => DocumentKind::Identity,
            KindArg::Pan => DocumentKind::TaxId,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let kind = DocumentKind::from(args.kind);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing {} card: {}", kind, args.input.display());

    let ocr: Arc<dyn TextRecognizer> = if args.from_text {
        Arc::new(DisabledRecognizer::new("reading recognized text from file"))
    } else {
        build_recognizer(&config.ocr)?
    };
    let store: Arc<dyn RecordStore> = if args.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        open_store(&config.storage)?
    };
    let service = ExtractionService::new(ocr, store);

    let text = if args.from_text {
        fs::read_to_string(&args.input)?
    } else {
        service.recognize(&fs::read(&args.input)?)?
    };
    debug!("Read {} characters of text", text.len());

    let output = if args.no_persist {
        let result = service.extract(kind, &text);
        serde_json::to_string_pretty(&serde_json::json!({
            "extracted_data": result.record,
            "warnings": result.warnings,
        }))?
    } else {
        serde_json::to_string_pretty(&service.process_text(kind, &text)?)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
