use skiff_core::SkiffConfig;
use skiff_server::state::AppState;
use skiff_upstream::provider_from_config;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SkiffConfig::from_env();
    tokio::fs::create_dir_all(&config.upload.dir).await?;

    let upstream = provider_from_config(&config);
    tracing::info!(
        provider = upstream.id(),
        upload_dir = %config.upload.dir.display(),
        max_upload_bytes = config.upload.max_bytes,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "starting skiff"
    );

    let addr = config.bind_addr();
    let state = AppState::new(config, upstream);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = skiff_server::app(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
