//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness
//! GET  /health/ready              - Readiness (review store)
//!
//! # Catalog
//! GET  /api/config                - Square application + location id
//! GET  /api/products              - Product list
//! GET  /api/product?id=           - Product detail
//! GET  /api/search?q=             - Keyword search
//!
//! # Cart & checkout
//! POST /api/calculate-shipping    - Shipping quote
//! POST /api/validate-promo        - Promo code check
//! POST /api/process-payment       - Order + card payment (rate limited)
//! POST /api/checkout              - Hosted checkout link (rate limited)
//! POST /api/checkout-quick        - Single-item checkout link (rate limited)
//! POST /api/checkout-pickup       - Local pickup checkout link (rate limited)
//! POST /api/check-pickup          - Pickup eligibility by ZIP
//!
//! # AI
//! POST /api/hair-analysis         - Photo analysis + recommendations (rate limited)
//!
//! # Reviews
//! GET  /api/reviews?productId=    - Reviews for a product
//! POST /api/reviews               - Add a review
//!
//! # Admin (ADMIN_KEY)
//! GET  /api/admin/export-emails   - Newsletter signups as JSON or CSV
//! ```

pub mod admin;
pub mod analysis;
pub mod catalog;
pub mod checkout;
pub mod reviews;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    middleware::map_response,
    routing::{get, post},
};

use crate::middleware::{analysis_rate_limiter, json_rate_limit_response, payment_rate_limiter};
use crate::state::AppState;

/// Largest accepted body on routes that take photos.
pub const PHOTO_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Catalog routes.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(catalog::payment_config))
        .route("/products", get(catalog::products))
        .route("/product", get(catalog::product))
        .route("/search", get(catalog::search))
}

/// Routes that create orders, payments or payment links.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/process-payment", post(checkout::process_payment))
        .route("/checkout", post(checkout::create_checkout))
        .route("/checkout-quick", post(checkout::quick_checkout))
        .route("/checkout-pickup", post(checkout::pickup_checkout))
        .route_layer(payment_rate_limiter())
        .route_layer(map_response(json_rate_limit_response))
}

/// Cart helpers that never touch money.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate-shipping", post(checkout::calculate_shipping))
        .route("/validate-promo", post(checkout::validate_promo))
        .route("/check-pickup", post(checkout::check_pickup_eligibility))
}

/// AI hair analysis.
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/hair-analysis", post(analysis::hair_analysis))
        .route_layer(analysis_rate_limiter())
        .route_layer(map_response(json_rate_limit_response))
        .layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT))
}

/// Product reviews.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::submit_review),
        )
        .layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT))
}

/// Admin routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/export-emails", get(admin::export_emails))
}

/// All `/api` routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(catalog_routes())
        .merge(cart_routes())
        .merge(payment_routes())
        .merge(analysis_routes())
        .merge(review_routes())
        .nest("/admin", admin_routes());

    Router::new().nest("/api", api)
}
