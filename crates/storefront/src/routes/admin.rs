//! Admin endpoints guarded by the shared `ADMIN_KEY`.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::services::ExportedEmail;
use crate::services::netlify::to_csv;
use crate::state::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

const CSV_FILENAME: &str = "attachment; filename=\"newsletter-emails.csv\"";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportQuery {
    pub key: Option<String>,
    /// `json` (default) or `csv`.
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailExport {
    pub total: usize,
    pub emails: Vec<ExportedEmail>,
}

/// Key comparison that looks at every byte before answering.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Query `key` wins over the header. Without a configured key nothing is
/// authorized.
fn authorize(state: &AppState, query_key: Option<&str>, headers: &HeaderMap) -> Result<()> {
    let supplied = query_key
        .or_else(|| headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok()))
        .unwrap_or_default();
    match state.config().admin_key.as_ref() {
        Some(expected) if constant_time_compare(expected.expose_secret(), supplied) => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// `GET /api/admin/export-emails?key=&format=json|csv`
#[instrument(skip(state, headers, query), fields(format))]
pub async fn export_emails(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    authorize(&state, query.key.as_deref(), &headers)?;

    let Some(netlify) = state.netlify() else {
        return Err(AppError::NotConfigured(
            "Missing NETLIFY_SITE_ID or NETLIFY_API_TOKEN environment variables",
        ));
    };

    let emails = netlify
        .newsletter_emails()
        .await
        .map_err(|e| AppError::failed("Failed to export emails", e))?
        .ok_or_else(|| {
            AppError::NotFound(
                "Newsletter form not found. Make sure the form name is \"newsletter\".".to_string(),
            )
        })?;

    let format = query.format.as_deref().unwrap_or("json");
    tracing::Span::current().record("format", format);
    info!(total = emails.len(), "Exported newsletter emails");

    if format.eq_ignore_ascii_case("csv") {
        return Ok((
            [
                (CONTENT_TYPE, HeaderValue::from_static("text/csv")),
                (CONTENT_DISPOSITION, HeaderValue::from_static(CSV_FILENAME)),
            ],
            to_csv(&emails),
        )
            .into_response());
    }

    Ok(Json(EmailExport {
        total: emails.len(),
        emails,
    })
    .into_response())
}
