//! # Smallie
//!
//! Backend for a 7-day Nigerian livestreaming competition.
//!
//! One daily challenge is active at a time. The current day is re-derived
//! from the clock on every request and paired with its task record through a
//! three-tier fallback: remote store, compiled-in table, placeholder. The
//! contestant roster follows the same policy. Voting and payments happen on
//! external providers; this server only hands their public keys to the page.
//!
//! # General Infrastructure
//! - Single axum server, GET-only surface
//! - Optional Redis document store for tasks and contestants
//! - Store outages never fail a request, the page just degrades to the
//!   built-in data
//!
//! # Setup
//!
//! Run locally without a store:
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Point at a store:
//! ```sh
//! STORE_CREDENTIALS='{"url":"redis://127.0.0.1:6379"}' cargo run
//! ```
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod clock;
pub mod config;
pub mod contestants;
pub mod error;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod store;
pub mod tasks;

use routes::{admin_handler, health_handler, index_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/admin", get(admin_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
