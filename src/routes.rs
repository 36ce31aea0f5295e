//! Route registration
//! Builds the router and applies middleware layers

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    auth::auth_middleware,
    handlers,
    middleware::{request_tracking_middleware, AppState},
};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public endpoints (health + registration/login)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Routes behind the bearer-token gate
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(handlers::auth::get_current_user))
        .route(
            "/notes",
            get(handlers::note::list_notes).post(handlers::note::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::note::get_note)
                .put(handlers::note::update_note)
                .delete(handlers::note::delete_note),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(request_tracking_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
