//! `sayso serve` - run the HTTP server

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use sayso_core::{AzureSpeechClient, MemoryRecordStore};
use sayso_server::{AppState, SaysoServer, ServerConfig, Staging};

#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Directory for staging uploaded audio (defaults to a temp dir)
    #[arg(long)]
    staging_dir: Option<PathBuf>,

    /// Seconds to wait for one speech-recognition call
    #[arg(long, default_value_t = 30)]
    assess_timeout: u64,

    /// Recognition language passed to the speech service
    #[arg(long, default_value = "en-US")]
    language: String,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let assessor = AzureSpeechClient::from_env()
        .context("speech credentials missing (set AZURE_SPEECH_REGION and AZURE_SPEECH_KEY)")?
        .with_language(&args.language);

    let staging_dir = args
        .staging_dir
        .unwrap_or_else(|| std::env::temp_dir().join("sayso-uploads"));
    let staging = Staging::new(&staging_dir)
        .with_context(|| format!("failed to create staging dir {}", staging_dir.display()))?;
    tracing::info!(dir = %staging_dir.display(), "staging uploads");

    let state = AppState::new(
        Arc::new(MemoryRecordStore::new()),
        Arc::new(assessor),
        staging,
    )
    .with_assess_timeout(Duration::from_secs(args.assess_timeout));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    SaysoServer::new(config, Arc::new(state)).run().await?;
    Ok(())
}
