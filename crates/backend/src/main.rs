pub mod handlers;
pub mod routes;
pub mod shared;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    use shared::app_state::AppState;

    let config = shared::config::load_config()?;
    shared::logger::init_tracing(&config.logging)?;

    match &config.source {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("Using default embedded configuration"),
    }

    if config.enrichment.api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set, every enrichment request will fail");
    }

    tracing::info!(
        "Enrichment: model={}, max_tokens={}, batch_limit={}, cost_per_record={}",
        config.enrichment.model,
        config.enrichment.max_tokens,
        config.enrichment.batch_limit,
        config.enrichment.cost_per_record
    );

    let port = config.server.port;
    let state = AppState::from_config(config)?;
    let app = routes::configure_routes(state);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
