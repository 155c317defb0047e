//! Scaffold API server entry point.

use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scaffold_api::api::openapi::openapi_json;
use scaffold_api::api::{create_router, AppState};
use scaffold_api::config::Config;
use scaffold_api::metrics;
use scaffold_api::utils::shutdown_signal;
use scaffold_api::AppError;

/// Minimal web-application scaffold.
#[derive(Parser, Debug)]
#[command(name = "scaffold-api")]
#[command(about = "Serve the scaffold HTTP API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("scaffold_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        None => cmd_serve(args.port).await,
    }
}

fn load_config() -> Result<Config, AppError> {
    let config = Config::load()?;
    config.validate().map_err(AppError::InvalidConfig)?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SCAFFOLD API - CONFIGURATION CHECK");
    println!("======================================================================");

    let config = load_config().context("configuration check failed")?;

    println!("Configuration Summary:");
    println!("  Project: {} v{}", config.project_name, config.app_version);
    println!("  Environment: {}", config.environment);
    println!("  API Prefix: {}", config.api_v1_prefix);
    println!("  CORS Origins: {}", config.backend_cors_origins.join(", "));
    println!("  Bind: {}:{}", config.host, config.port);
    if config.rate_limit_enabled {
        println!(
            "  Rate Limit: {} requests / {}s",
            config.rate_limit_requests, config.rate_limit_window_seconds
        );
    } else {
        println!("  Rate Limit: Disabled");
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the OpenAPI document to stdout.
fn cmd_openapi() -> anyhow::Result<()> {
    let json = openapi_json().map_err(AppError::from)?;
    println!("{json}");
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = load_config()?;
    if let Some(port) = port_override {
        config.port = port;
    }

    info!(
        project = %config.project_name,
        version = %config.app_version,
        environment = %config.environment,
        "Starting server"
    );

    let handle = metrics::install_recorder()?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(AppState::new(config).with_metrics(handle));

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(AppError::from)?;

    info!("Server stopped");
    Ok(())
}
