use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};

use erp_api::config::ApiConfig;
use erp_api::infra::identity::HttpIdentityProvider;
use erp_api::router::build_router;
use erp_api::state::AppState;
use erp_core::middleware::cors_layer;
use erp_core::shutdown::shutdown_signal;
use erp_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.connect_lazy(true).sqlx_logging(false);
    let db = Arc::new(
        Database::connect(options)
            .await
            .context("failed to configure database pool")?,
    );
    // Startup probe only reports; the server still comes up without a database.
    match db.ping().await {
        Ok(()) => info!("connected to database"),
        Err(e) => warn!(error = %e, "database not reachable at startup"),
    }

    let identity = HttpIdentityProvider::new(
        &config.provider_url,
        config.provider_api_key.clone(),
        config.identity_timeout,
    )?;

    let state = AppState {
        db: Arc::clone(&db),
        identity,
        profile_wait: config.profile_wait,
        cookie_secure: config.cookie_secure,
    };
    let router = build_router(state).layer(cors_layer(&config.client_url)?);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        production = config.production,
        client_url = %config.client_url,
        "ERP server listening on {addr}"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await.context("failed to close database pool")?,
        Err(_) => warn!("database pool still referenced at shutdown, dropping it"),
    }
    info!("shutdown complete");
    Ok(())
}
