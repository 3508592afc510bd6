//! School Records Backend
//!
//! An in-memory REST backend for student, teacher and class records, with
//! image uploads for students and teachers.

mod api;
mod config;
mod errors;
mod models;
mod store;
mod uploads;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::{MonotonicClock, Store};
use uploads::{UploadSink, UPLOADS_MOUNT};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub uploads: Arc<UploadSink>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting School Records Backend");
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);
    match &config.public_dir {
        Some(dir) => tracing::info!("Serving static files from {:?}", dir),
        None => tracing::info!("No public directory configured (SCHOOL_PUBLIC_DIR)"),
    }

    // Student ids and upload names share one clock
    let clock = Arc::new(MonotonicClock::new());
    let store = Arc::new(Store::new(Arc::clone(&clock)));
    let uploads = Arc::new(UploadSink::init(&config.upload_dir, clock).await?);

    // Create application state
    let state = AppState {
        store: Arc::clone(&store),
        uploads,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let counts = store.counts().await;
    tracing::info!(
        "Shut down; discarding {} students, {} teachers, {} classes",
        counts.students,
        counts.teachers,
        counts.classes
    );

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes, shared by every entity kind
    let api_routes = Router::new()
        .route("/{kind}", get(api::list_records))
        .route("/{kind}", post(api::create_record))
        .route("/{kind}/{id}", get(api::get_record))
        .route("/{kind}/{id}", put(api::update_record))
        .route("/{kind}/{id}", delete(api::delete_record))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    let router = Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .nest_service(UPLOADS_MOUNT, ServeDir::new(state.uploads.dir()));

    let router = match &state.config.public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
