//! The Grasshopper storefront API.
//!
//! JSON endpoints behind the static shop front: catalog reads and checkout
//! against Square, AI hair analysis through Claude, product reviews, and an
//! admin export of newsletter signups. The binary in `main.rs` only loads
//! configuration, sets up logging and serves [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod claude;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod promo;
pub mod recommend;
pub mod routes;
pub mod services;
pub mod square;
pub mod state;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::routes::admin::ADMIN_KEY_HEADER;
use crate::state::AppState;

/// CORS for the shop's own origin only.
#[must_use]
pub fn cors_layer(site_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(ADMIN_KEY_HEADER)]);
    match HeaderValue::from_str(site_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, site_origin, "SITE_ORIGIN is not a valid header value");
            layer
        }
    }
}

/// The complete router with state and middleware applied.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().site_origin);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(cors)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness: the review store must answer.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.reviews().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Review store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
