use clap::Parser;
use shortly_gateway::backends::build_shortener;
use shortly_gateway::cli::Cli;
use shortly_gateway::{App, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    shortly_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        id_source = %config.id_source,
        cache_backend = %config.cache,
        "starting gateway server"
    );

    let shortener = build_shortener(&config).await?;
    let router = App::router(AppState::new(shortener, config.base_url.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
