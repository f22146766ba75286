use daily_log::{AppState, Config, Storage, WebhookTransmitter, router};
use std::sync::Arc;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let storage = Storage::open(&config.data_path).await;
    let transmitter = Arc::new(WebhookTransmitter::new(config.webhook_url.clone()));
    let state = AppState::new(storage, transmitter);
    let app = router(state);

    let addr = config.addr();
    info!(data_path = %config.data_path.display(), "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
