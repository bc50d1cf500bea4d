//! Groq Proxy CLI - forward chat completions with a server-held API key.

use clap::{Parser, Subcommand};
use groq_proxy::api::{create_router_with_state, AppState};
use groq_proxy::config::{Config, LogVerbosity};
use std::path::PathBuf;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "groq-proxy")]
#[command(about = "Forward chat completions to Groq with a server-held API key")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the proxy server (the default when no command is given)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Startup banner verbosity
        #[arg(short, long, value_enum)]
        log_level: Option<LogLevel>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show current configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogLevel {
    Minimal,
    Compact,
    Verbose,
}

impl From<LogLevel> for LogVerbosity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Minimal => LogVerbosity::Minimal,
            LogLevel::Compact => LogVerbosity::Compact,
            LogLevel::Verbose => LogVerbosity::Verbose,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, log_level, config }) => {
            run_server(port, host, log_level, config).await?;
        }
        Some(Commands::Config { path }) => {
            show_config(path)?;
        }
        None => {
            run_server(None, None, None, None).await?;
        }
    }

    Ok(())
}

async fn run_server(
    port_override: Option<u16>,
    host_override: Option<String>,
    log_level: Option<LogLevel>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut config = config.with_env_overrides();

    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(level) = log_level {
        config.app.log_verbosity = level.into();
    }

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let verbosity = config.app.log_verbosity.clone();
    let upstream_url = config.upstream.chat_completions_url();
    let has_key = config.upstream.has_api_key();
    let port = config.server.port;

    let state = AppState::new(config)?;
    let app = create_router_with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    let addr = listener.local_addr()?;

    match verbosity {
        LogVerbosity::Minimal => {
            println!("groq-proxy:{}", port);
        }
        LogVerbosity::Compact => {
            println!("→ Groq Proxy starting on http://{}", addr);
            println!("→ OpenAI-compatible API: http://{}/v1", addr);
        }
        LogVerbosity::Verbose => {
            println!("────────────────────────────────────────");
            println!("Groq Proxy v{}", env!("CARGO_PKG_VERSION"));
            println!("────────────────────────────────────────");
            println!("Gateway:    http://{}", addr);
            println!("API Base:   http://{}/v1", addr);
            println!("Health:     http://{}/health", addr);
            println!("Models:     http://{}/v1/models", addr);
            println!("Upstream:   {}", upstream_url);
            println!("API Key:    {}", if has_key { "configured" } else { "missing" });
            println!("────────────────────────────────────────");
        }
    }

    tracing::info!("Server running on port {}", port);
    if !has_key {
        tracing::warn!("GROQ_API_KEY is not set; upstream calls will be rejected");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\nGateway stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

fn show_config(show_path: bool) -> anyhow::Result<()> {
    if show_path {
        println!("{}", Config::default_path().display());
        return Ok(());
    }

    let config = Config::load()?.with_env_overrides();
    println!("{}", toml::to_string_pretty(&config.redacted())?);
    Ok(())
}
