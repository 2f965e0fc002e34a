mod handlers;
mod middleware;
mod state;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::EngineConfig;

pub use handlers::{
    ActivityInput, AssessImpulseRequest, DriftRequest, LoadResponse, MessageBody,
    ResolveImpulseRequest, SessionDriftResponse, SnapshotInput,
};
pub use middleware::{RateLimiter, SecurityConfig};
pub use state::{AppState, Session, SessionRegistry};

/// Router with default engine settings and no authentication.
pub fn create_router(config: EngineConfig) -> Router {
    create_router_with_config(config, SecurityConfig::disabled())
}

pub fn create_router_with_config(config: EngineConfig, security: SecurityConfig) -> Router {
    create_router_with_state(AppState::new(config), security)
}

/// Build the API around existing state, so callers can keep a handle on the
/// session registry.
pub fn create_router_with_state(state: AppState, security: SecurityConfig) -> Router {
    let protected = Router::new()
        // Stateless evaluation
        .route("/load", post(handlers::compute_load))
        .route("/drift", post(handlers::compute_drift))
        .route("/orbits", post(handlers::partition_orbits))
        .route("/messages", post(handlers::get_message))
        // Intervention gate
        .route("/impulses/assess", post(handlers::assess_impulse))
        .route("/impulses/resolve", post(handlers::resolve_impulse))
        // Sessions
        .route("/sessions/{id}", delete(handlers::end_session))
        .route("/sessions/{id}/activity", post(handlers::record_activity))
        .route("/sessions/{id}/drift", get(handlers::get_session_drift))
        .route("/sessions/{id}/snapshot", post(handlers::evaluate_session))
        .route_layer(from_fn_with_state(
            security.clone(),
            middleware::auth_middleware,
        ));

    let mut api = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected);

    if let Some(limiter) = security.rate_limiter.clone() {
        api = api.layer(from_fn_with_state(limiter, middleware::rate_limit_middleware));
    }

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&security))
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    match &security.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    }
}
