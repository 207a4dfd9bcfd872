use mimalloc::MiMalloc;
use sceneview::config::{Config, DEFAULT_CONFIG_FILE};
use sceneview::db::{self, MongoSource};
use sceneview::render::Renderer;
use sceneview::server::{AppState, sceneview_router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
    let cfg = Config::load(&config_path)?;

    sceneview::utils::logging::init(&cfg.basic.loglevel);

    info!(
        config = %config_path.display(),
        mongo_uri = %cfg.mongo.uri,
        database = %cfg.mongo.database,
        loglevel = %cfg.basic.loglevel,
        debug = cfg.basic.debug,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        css_framework = %cfg.pagination.settings().css_framework,
    );

    let source = MongoSource::connect(&cfg.mongo).await?;
    let store = db::spawn(Arc::new(source)).await?;
    let renderer = Renderer::from_config(&cfg.basic)?;

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let state = AppState::new(store.clone(), renderer, cfg);
    let app = sceneview_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown();
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
