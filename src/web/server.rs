use axum::{routing::get, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::persistence::{spawn_writer, FileBackend, Persister};
use crate::telemetry::{Generator, GeneratorHandle, TelemetryStore};

use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, PersistenceConfig};
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let store = Arc::new(TelemetryStore::new(config.telemetry.capacity));

    let persister = build_persister(&config.persistence);
    if let Some(ref persister) = persister {
        store.seed(persister.load().await);
        if !store.is_empty() {
            log::info!(
                "History seeded with {} samples (capacity {})",
                store.len(),
                store.capacity()
            );
        }
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    let rng = match config.telemetry.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generator = Generator::new(config.telemetry.initial, rng, Arc::clone(&store));
    let (snapshots, writer) = match persister {
        Some(persister) => {
            let (tx, join) = spawn_writer(persister);
            (Some(tx), Some(join))
        }
        None => (None, None),
    };
    let generator: GeneratorHandle = generator.spawn(config.telemetry.interval, snapshots);

    let state = AppState {
        config: Arc::new(config),
        store,
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    generator.stop().await;
    if let Some(writer) = writer {
        if let Err(e) = writer.await {
            log::error!("History writer task failed: {}", e);
        }
    }

    served
}

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.web.static_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Landing page
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        // Telemetry readouts
        .route("/live-data", get(telemetry_handlers::live_data))
        .route("/history", get(telemetry_handlers::history))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_persister(config: &PersistenceConfig) -> Option<Persister> {
    match config {
        PersistenceConfig::None => None,
        PersistenceConfig::File { path, timeout } => Some(Persister::new(
            Arc::new(FileBackend::new(path.clone())),
            *timeout,
        )),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
