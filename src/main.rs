use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use workshop_orders::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use workshop_orders::database::{run_migrations, seed_initial_data};
use workshop_orders::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🔧 Workshop Orders API");
    info!("======================");
    info!(environment = %config.environment, backend = ?config.storage_backend, "starting");

    let state = match config.storage_backend {
        StorageBackend::Memory => AppState::in_memory(config.clone()),
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set for the postgres backend")?;
            let db_config = DatabaseConfig::new(url);
            info!(url = %db_config.masked_url(), "connecting to database");

            let pool = db_config.create_pool().await.map_err(|e| {
                error!("❌ Error connecting to the database: {}", e);
                e
            })?;
            run_migrations(&pool).await.context("running migrations")?;
            info!("✅ Database ready");

            AppState::postgres(config.clone(), pool)
        }
    };

    if config.seed_data {
        seed_initial_data(
            state.customers.as_ref(),
            state.vehicles.as_ref(),
            state.service_orders.as_ref(),
        )
        .await
        .context("seeding demo data")?;
    }

    let app = create_app(state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server_url()))?;

    info!("🌐 Server listening on http://{}", addr);
    info!("🔍 Available endpoints:");
    info!("   GET  /health");
    for resource in ["customers", "vehicles", "service-orders"] {
        info!("   GET  /api/{}/search", resource);
        info!("   GET  /api/{}", resource);
        info!("   GET  /api/{}/:id", resource);
        info!("   POST /api/{}", resource);
        info!("   PUT  /api/{}/:id", resource);
    }
    info!("   PUT  /api/service-orders/:id/close");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 SIGTERM received, shutting down...");
        },
    }
}
