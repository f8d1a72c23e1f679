//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Responses always carry a
//! JSON `{"error": "..."}` body; server-side failures are captured to Sentry
//! and their internal details are never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client; the message is shown as-is.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or wrong admin key.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found; the message is shown as-is.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// An optional integration has no credentials.
    #[error("{0}")]
    NotConfigured(&'static str),

    /// An upstream service failed; `message` is the public text.
    #[error("{message}: {detail}")]
    Upstream {
        message: &'static str,
        detail: String,
    },

    /// A handler's catch-all; `message` is the public text.
    #[error("{message}: {detail}")]
    Failed {
        message: &'static str,
        detail: String,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Catch-all failure with a public message and a logged cause.
    pub fn failed(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            message,
            detail: cause.to_string(),
        }
    }

    /// Upstream failure with a public message and a logged cause.
    pub fn upstream(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Upstream {
            message,
            detail: cause.to_string(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::NotConfigured(_) | Self::Failed { .. } | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message sent to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::RateLimited => "Too many requests. Please try again shortly.".to_string(),
            Self::NotConfigured(msg) => (*msg).to_string(),
            Self::Upstream { message, .. } | Self::Failed { message, .. } => {
                (*message).to_string()
            }
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a checkout step.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
