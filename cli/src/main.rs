use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod error;
mod net;
mod tui;

use bookstall_core::config::{self, LoggingConfig};
use bookstall_core::StoreClient;
use error::CliError;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();

    let mut cfg = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(server) = args.server {
        cfg.server.base_url = server;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        cfg.server.timeout_ms = timeout_ms;
    }

    init_tracing(&cfg.logging).map_err(CliError::Init)?;
    tui::check_tui_support().map_err(CliError::Terminal)?;

    tracing::info!(
        target: "bookstall",
        server = %cfg.server.base_url,
        "starting storefront"
    );

    let client = Arc::new(StoreClient::new(
        &cfg.server.base_url,
        cfg.server.timeout_ms,
    )?);
    let app = app::StoreApp::new(cfg.tui.clone());

    tui::run(app, client).await?;
    Ok(0)
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: terminal / runtime error
    match e {
        CliError::Config(_) => 11,
        CliError::Init(_)
        | CliError::Terminal(_)
        | CliError::Client(_)
        | CliError::Io(_) => 20,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("bookstall"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("bookstall.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    // The TUI owns stdout; console logging goes to stderr and is off by
    // default so it doesn't bleed into the alternate screen.
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
