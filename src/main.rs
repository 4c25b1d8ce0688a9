//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Builds the upstream catalog client
//! - Starts the HTTP server with graceful shutdown support

use tokio::net::TcpListener;
use tokio::signal;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use planet_residents::client::AppState;
use planet_residents::config::Config;
use planet_residents::route::create_app;

/// Application entry point
///
/// Reads the configuration (see [`Config`] for the variables), builds the
/// shared catalog client, and serves the router until SIGINT or SIGTERM.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("planet_residents=debug,tower_http=debug")),
        )
        .init();

    // Read PORT, catalog URL and upstream limits from the environment
    let config = Config::from_env();

    // One pooled HTTP client shared by every request
    let state = AppState::from_config(&config).expect("Failed to build upstream HTTP client");

    // Create the Axum router with request tracing
    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the configured port
    let listener = TcpListener::bind(config.bind_address())
        .await
        .expect("Failed to bind listener");

    tracing::info!("🚀 Server running at http://localhost:{}", config.port);
    tracing::info!("🪐 Planet catalog: {}", config.planets_url);

    // Serve until SIGTERM or SIGINT, letting in-flight requests finish
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received. In-flight
/// requests are allowed to finish before the server exits.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Shutdown signal received, stopping server.");
}
