//! allowgate RPC server binary

use allowgate_server::{router, AppState, ServerConfig};
use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal: {:#}", e);
        eprintln!("allowgate-server: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    if config.otel_enabled {
        allowgate_server::tracing::init_tracing_stack("allowgate-server")?;
        info!("OpenTelemetry tracing enabled");
    } else {
        allowgate_server::tracing::init_console_logging()?;
    }

    info!("Starting allowgate server v{}", env!("CARGO_PKG_VERSION"));

    allowgate_server::metrics::init_prometheus()?;
    allowgate_server::metrics::init_metrics();

    let state = AppState::bootstrap(&config).with_context(|| {
        format!(
            "Failed to load allow-list from {}",
            config.allow_list_path.display()
        )
    })?;
    let entries = state.authorizer.allow_list().len();
    allowgate_server::metrics::set_allow_list_entries(entries);
    info!(
        "Loaded {} allow-list entries from {} (membership mode: {})",
        entries,
        config.allow_list_path.display(),
        config.membership_mode
    );

    let app = router(state, config.request_timeout);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server started, listening on {}", addr);

    let shutdown_signal = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No handler available; keep serving until the process is killed
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    if config.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        allowgate_server::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
