use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;

mod dashboard_logic;
use dashboard_logic::{config, routes, state};

const APP_NAME: &str = "server_dashboard";

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load_config();
    // Dropping the guard would stop the file writer.
    let _log_guard = lib_common::loggers::setup_logging(&settings.log_dir, APP_NAME, &settings.log_level)?;

    let app_state = state::AppState::from_settings(&settings)?;
    let app = routes::router(app_state);

    let addr = format!("{}:{}", settings.bind_address, settings.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving the dashboard")?;

    tracing::info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Ctrl-C received, initiating shutdown.");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term_signal) => {
                term_signal.recv().await;
                tracing::info!("SIGTERM received, initiating shutdown.");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
