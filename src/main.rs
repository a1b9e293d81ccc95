use anyhow::Result;
use std::sync::Arc;

use kazavel_backend::{app, config, logging, services::SupabaseRpc};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting Kazavel backend"
    );

    let rpc = SupabaseRpc::new(
        &settings.supabase_url,
        &settings.supabase_anon_key,
        settings.rpc_timeout_seconds,
    )?;

    // Non-blocking reachability probe
    tokio::spawn({
        let rpc = rpc.clone();
        async move {
            use kazavel_backend::services::RpcClient;
            match rpc.health_check().await {
                Ok(()) => tracing::info!("Database RPC endpoint is reachable"),
                Err(e) => tracing::warn!(error = %e, "Database RPC endpoint check failed"),
            }
        }
    });

    let state = app::AppState::new(settings.clone(), Arc::new(rpc));
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    tracing::info!("Shutdown signal received, draining connections");
}
