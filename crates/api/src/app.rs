use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, rate_limit_middleware, RateLimiterState};
use crate::routes::{attendance, guests, health, scan};
use crate::services::{CheckInService, FsPhotoStore, PhotoStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub photo_store: Arc<dyn PhotoStore>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    /// Builds a check-in service over this state's pool and photo sink.
    pub fn check_in_service(&self) -> CheckInService {
        CheckInService::new(
            self.pool.clone(),
            self.photo_store.clone(),
            self.config.limits.max_photo_bytes,
        )
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is enabled when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let photo_store: Arc<dyn PhotoStore> = Arc::new(FsPhotoStore::new(&config.media));

    let state = AppState {
        pool,
        config: config.clone(),
        photo_store,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Invitation-scoped check-in routes, rate limited per invitation
    let invitation_routes = Router::new()
        .route("/api/v1/invitations/:slug/scan", post(scan::resolve_scan))
        .route(
            "/api/v1/invitations/:slug/resolve",
            get(scan::resolve_guest),
        )
        .route(
            "/api/v1/invitations/:slug/attendance",
            post(attendance::submit_check_in).get(attendance::list_attendance),
        )
        .route("/api/v1/invitations/:slug/guests", get(guests::list_guests))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Public routes (no invitation scope)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes; bottom layers run first
    Router::new()
        .merge(public_routes)
        .merge(invitation_routes)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
