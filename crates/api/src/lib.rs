//! # Warden API
//!
//! The HTTP side of Warden. Hosting platforms poll this server to decide
//! whether the process is alive; it has no knowledge of Discord.
//!
//! ## Architecture
//!
//! - **Routes**: Define the liveness endpoints
//! - **Config**: Handle environment configuration for the listener

/// Configuration module for API settings
pub mod config;
/// Route definitions
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// When the process started serving
    pub started_at: Instant,
}

impl ApiState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the router with every route and middleware attached.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use warden_api::{app, ApiState};
///
/// let router = app(Arc::new(ApiState::new()), 30);
/// ```
pub fn app(state: Arc<ApiState>, request_timeout: u64) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
}

/// Starts the health server and serves until the listener fails.
///
/// # Arguments
///
/// * `config` - API configuration including host, port and request timeout
///
/// # Returns
///
/// * `Result<()>` - Success or error result
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    let state = Arc::new(ApiState::new());
    let app = app(state, config.request_timeout);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Health server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
