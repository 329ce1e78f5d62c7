//! Dual Timer - two independent second counters behind an HTTP display surface
//! 
//! This is the main entry point for the dual-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use dual_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    timer::TICK_INTERVAL,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dual_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting dual-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={:?}, debounce={}ms",
          config.host, config.port, TICK_INTERVAL, config.debounce_ms);

    // Create both timers; their event loops start immediately
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.debounce()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timers/:id/start - Start timer 1 or 2");
    info!("  POST /timers/:id/stop  - Stop timer 1 or 2");
    info!("  POST /timers/:id/reset - Reset timer 1 or 2 to zero");
    info!("  GET  /timers/:id       - Current value of one timer");
    info!("  GET  /status           - Both timers and server info");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let shutdown = shutdown_signal()?;
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
