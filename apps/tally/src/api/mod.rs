//! # Tally HTTP API Module
//!
//! This module implements the HTTP JSON API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /average` - Arithmetic mean of `values`
//! - `POST /mse` - Mean squared error of `actual` vs `predicted`
//! - `POST /cart/count` - Sum of item quantities
//! - `POST /cart/remove` - Cart without the items carrying `id`
//! - `POST /user` - Normalised user record with full name
//!
//! ## Security Configuration
//!
//! Taken from [`ServerConfig`]: CORS origins, global rate limit, and an
//! optional bearer API key.

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::keys_match;
pub use handlers::{
    average_handler, cart_count_handler, cart_remove_handler, health_handler, mse_handler,
    user_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    AverageRequest, CartCountRequest, CartCountResponse, CartRemoveRequest, CartRemoveResponse,
    HealthResponse, MseRequest, UserRequest, UserResponse, ValueResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tally_core::TallyError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (2 MiB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. The aggregator is stateless, so only the
/// configuration is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new app state from a server configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from configured origins.
///
/// - `None`: localhost only
/// - `["*"]`: any origin
/// - otherwise: the listed origins; unparsable entries are skipped
fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some([only]) if only == "*" => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                restrictive_cors(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

fn restrictive_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    restrictive_cors(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if an API key is configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(state.config.cors_origins.as_deref());

    let rate_limiter = if state.config.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            state.config.rate_limit
        );
        Some(create_rate_limiter(state.config.rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = state.config.api_key().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set server.api_key or TALLY_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/average", post(handlers::average_handler))
        .route("/mse", post(handlers::mse_handler))
        .route("/cart/count", post(handlers::cart_count_handler))
        .route("/cart/remove", post(handlers::cart_remove_handler))
        .route("/user", post(handlers::user_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::api_key_auth_middleware,
        ));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Resolve when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Bind `config.bind_addr()` and serve until Ctrl+C.
pub async fn run_server(config: ServerConfig) -> Result<(), TallyError> {
    let addr = config.bind_addr();
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TallyError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Tally HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Io(format!("Server error: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================
