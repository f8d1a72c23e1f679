//! Catalog and payment-config handlers.

use axum::Json;
use axum::extract::{Query, State};
use grasshopper_core::CatalogObjectId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{self, ProductDetail, ProductSummary};
use crate::error::{AppError, Result};
use crate::square::SquareError;
use crate::state::AppState;

/// Public values the Web Payments SDK needs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    pub application_id: String,
    pub location_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// `GET /api/config`
#[instrument(skip(state))]
pub async fn payment_config(State(state): State<AppState>) -> Result<Json<PaymentConfig>> {
    let location_id = state.square().location_id().await.map_err(|e| match e {
        SquareError::NoLocation => AppError::BadRequest("No Square location found".to_string()),
        e => AppError::failed("Failed to load config", e),
    })?;

    Ok(Json(PaymentConfig {
        application_id: state.config().square.application_id.clone(),
        location_id: location_id.to_string(),
    }))
}

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<ProductSummary>>> {
    let products = catalog::list_products(state.square())
        .await
        .map_err(|e| AppError::failed("Failed to fetch products from Square API", e))?;
    tracing::info!(count = products.len(), "Fetched products");
    Ok(Json(products))
}

/// `GET /api/product?id=`
#[instrument(skip(state))]
pub async fn product(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductDetail>> {
    let raw = query.id.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("Product ID required".to_string()));
    }
    let not_found = || AppError::NotFound("Product not found".to_string());
    let id = CatalogObjectId::parse(&raw).map_err(|_| not_found())?;

    catalog::product_detail(state.square(), &id)
        .await
        .map_err(|e| AppError::failed("Failed to fetch product", e))?
        .map(Json)
        .ok_or_else(not_found)
}

/// `GET /api/search?q=`
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductSummary>>> {
    let q = query.q.unwrap_or_default();
    catalog::search(state.square(), q.trim())
        .await
        .map(Json)
        .map_err(|e| AppError::failed("Failed to search", e))
}
