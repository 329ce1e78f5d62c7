//! Signal handling for graceful shutdown

use std::future::Future;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::info;

/// Install SIGTERM/SIGINT handlers and return a future that resolves on the first one
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;

    Ok(async move {
        if let Some(signal) = signals.next().await {
            info!("Received signal: {}", signal);
        }
    })
}
