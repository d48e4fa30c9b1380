//! Farcaster Frame for browsing open bounties from the owockibot bounty board.
//!
//!
//!
//! # Flow
//! - A frame-aware client loads `/` and reads the `fc:frame` meta tags
//! - The frame image points at `/image/{index}`, an SVG card rendered per request
//! - Pressing a post button makes the client `POST /action` with the last `fc:frame:state`
//! - The server answers with the frame for the next bounty, carrying the new state
//!
//! No state lives on the server. Every request fetches the listing once from the
//! upstream API and renders from that snapshot.
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | frame for index 0 |
//! | GET | `/image/{index}` | `image/svg+xml`, `Cache-Control: max-age=10` |
//! | POST | `/action` | frame for the next index |
//! | any | anything else | `404 Not Found` |
//!
//! Upstream failures answer `500 Internal Server Error` and are logged, nothing else leaks.
//!
//!
//!
//! # Environment
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `3000` |
//! | `BASE_URL` | `http://localhost:{PORT}` |
//! | `BOUNTY_API` | `https://bounty.owockibot.xyz` |
//! | `BOUNTY_SITE` | `https://bounty.owockibot.xyz` |
//! | `UPSTREAM_TIMEOUT_MS` | `5000` |
//! | `RUST_LOG` | `info` |
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=debug cargo run -p bounty-frame
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod bounties;
pub mod config;
pub mod error;
pub mod html;
pub mod image;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{action_handler, image_handler, image_root_handler, index_handler, not_found};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler).fallback(not_found))
        .route("/image/", get(image_root_handler).fallback(not_found))
        .route("/image/{*rest}", get(image_handler).fallback(not_found))
        .route("/action", post(action_handler).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading config...");
    let config = Config::load()?;
    let state = AppState::new(config)?;

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Bounty frame running on {}", state.config.base_url);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
}
