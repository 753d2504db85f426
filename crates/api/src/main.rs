use anyhow::Context;

use heartcheck_api::{config::ServerConfig, context::ServingContext};
use heartcheck_infra::FsArtifactStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    heartcheck_observability::init();

    let config = ServerConfig::from_env()?;
    tracing::info!(models_dir = %config.models_dir.display(), "loading artifacts");

    let store = FsArtifactStore::new(&config.models_dir);
    let ctx = ServingContext::load(&store);
    let app = heartcheck_api::app::build_app(ctx);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
