use anyhow::Result;
use clap::Parser;
use pancreatic_classifier::{config::Config, web::serve};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pancreatic-classifier")]
#[command(about = "Binary pancreatic scan classification service")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,

    /// Model file path (defaults to model.onnx next to the executable)
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// ONNX Runtime intra-op threads
    #[arg(long)]
    intra_threads: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Keep serving when the model fails to load
    #[arg(long)]
    allow_degraded: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting pancreatic classifier service...");
    tracing::info!("Bind address: {}", args.bind);

    let config = Config::new(
        args.bind,
        args.model_path,
        args.intra_threads,
        args.allow_degraded,
    )?;
    tracing::info!("Model path: {}", config.model_path.display());

    serve(config).await?;

    Ok(())
}
