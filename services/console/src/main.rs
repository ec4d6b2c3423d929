use anyhow::Context as _;
use tracing::info;

use erp_console::config::ConsoleConfig;
use erp_console::infra::api::ApiClient;
use erp_console::router::build_router;
use erp_console::state::AppState;
use erp_core::shutdown::shutdown_signal;
use erp_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::from_env()?;
    let api = ApiClient::new(&config.api_url, config.api_timeout)?;
    let router = build_router(AppState { api });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(api_url = %config.api_url, "console listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
