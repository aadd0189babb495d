// Main entry point for the enhance-server application.
// Parses configuration, initializes logging, constructs the Enhancer, and
// starts the Axum HTTP server with graceful shutdown.

use clap::Parser;
use enhance_server::{
    enhancer::{Enhancer, EnhancerConfig},
    web,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::signal;
use tracing::Level;

/// Command line arguments for enhance-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "ENHANCE_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "ENHANCE_SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// Path to the RealESRGAN binary used for external enhancement.
    #[arg(
        long,
        env = "ENHANCE_SERVER_REALESRGAN_PATH",
        default_value = "/usr/bin/realesrgan-ncnn-vulkan"
    )]
    realesrgan_path: PathBuf,

    /// Directory containing the super-resolution model files.
    #[arg(long, env = "ENHANCE_SERVER_MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,

    /// Name of the model passed to the external binary.
    #[arg(
        long,
        env = "ENHANCE_SERVER_MODEL_NAME",
        default_value = "RealESRGAN_General_x4_v3"
    )]
    model_name: String,

    /// Maximum number of seconds a single external enhancement may run.
    #[arg(long, env = "ENHANCE_SERVER_TOOL_TIMEOUT_SECS", default_value_t = 300)]
    tool_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    // Logs will go to stdout. Adjust level and format as needed.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true) // Include module path in logs
        .with_file(true) // Include source file name
        .with_line_number(true) // Include line numbers
        .init();

    tracing::info!("Starting enhance-server...");
    tracing::info!(
        "External enhancer: {} (model '{}' in {})",
        config.realesrgan_path.display(),
        config.model_name,
        config.model_dir.display()
    );

    // --- Construct the Enhancer ---
    // All enhancement configuration is injected here; nothing downstream
    // reads paths from the environment.
    let enhancer = Arc::new(Enhancer::new(EnhancerConfig {
        binary: config.realesrgan_path,
        model_dir: config.model_dir,
        model_name: config.model_name,
        tool_timeout: Duration::from_secs(config.tool_timeout_secs),
    }));

    // --- Build Axum Application Router ---
    let app = web::create_app(enhancer);
    tracing::info!("Axum router configured.");

    // --- Start HTTP Server ---
    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, l)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            eprintln!("FATAL: Could not bind server. Error: {}. Exiting.", e);
            std::process::exit(1);
        }
    };

    // Run the server.
    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {}", e);
    }

    tracing::info!("enhance-server has shut down.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
