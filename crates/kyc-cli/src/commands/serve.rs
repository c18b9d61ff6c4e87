//! Serve command - run the HTTP extraction service.

use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use kyc_core::{ExtractionService, open_store};

use super::{build_recognizer, load_config};
use crate::server::{AppState, router};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.bind)
    #[arg(short, long)]
    bind: Option<String>,

    /// OCR model directory (overrides ocr.model_dir)
    #[arg(short, long)]
    model_dir: Option<std::path::PathBuf>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(model_dir) = args.model_dir {
        config.ocr.model_dir = Some(model_dir);
    }

    let ocr = build_recognizer(&config.ocr)?;
    let store = open_store(&config.storage)?;
    let state = Arc::new(AppState {
        service: ExtractionService::new(ocr, store),
    });

    let app = router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    let addr = listener.local_addr()?;
    info!("KYC extraction service listening on {}", addr);
    println!(
        "{} Listening on http://{} (POST /extract_aadhaar, POST /extract_pan)",
        style("✓").green(),
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
