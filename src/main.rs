//! Todo service (v1)
//!
//! A small CRUD service over an in-memory todo store, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ routing ──▶ request-id ──▶ access log ──▶ handler ──▶ repository
//!                                                          │
//!   Client ◀──────────── JSON body / error envelope ◀──────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use todo_server::config::{self, Environment, ServerConfig};
use todo_server::lifecycle::{wait_for_signal, Shutdown};
use todo_server::observability::{logging, metrics};
use todo_server::{HttpServer, InMemoryTodoRepository};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "HTTP service exposing CRUD operations over todos", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP listen address, e.g. 0.0.0.0:8000 or :8000 for every interface
    #[arg(long)]
    listen_addr: Option<String>,

    /// Debug mode
    #[arg(long)]
    debug: bool,

    /// Environment. Must be one of: production, development
    #[arg(long = "env", value_parser = clap::value_parser!(Environment))]
    environment: Option<Environment>,
}

impl Cli {
    /// Merge file (or default) configuration with command-line overrides.
    fn resolve(&self) -> Result<ServerConfig, config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(listen_addr) = &self.listen_addr {
            config.listener.listen_addr = listen_addr.clone();
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }

        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "HTTP listen and serve");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        listen_addr = %config.listener.listen_addr,
        environment = %config.environment,
        debug = config.debug,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(config.listener.socket_addr()?).await?;
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(InMemoryTodoRepository::new()));
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let signal = tokio::select! {
        result = &mut server_task => return Ok(result??),
        signal = wait_for_signal() => signal,
    };

    tracing::info!(signal, graceful_timeout = ?grace, "Caught shutdown signal");
    shutdown.trigger(signal);

    match tokio::time::timeout(grace, server_task).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(
            graceful_timeout = ?grace,
            "In-flight requests did not finish in time"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
