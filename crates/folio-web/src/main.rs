//! Folio web service.
//!
//! - Config: `$FOLIO_CONFIG` or `folio.yaml` (strict parsing + validate)
//! - Public blog list/detail under `/v1/posts`
//! - Bearer-token principals for authoring and account endpoints

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use folio_core::error::{FolioError, Result};
use folio_web::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        FolioError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg).await?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "folio-web starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| FolioError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FolioError::Internal(format!("server failed: {e}")))
}
