//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Lenient JSON body extractor.
///
/// Unlike `axum::Json` it does not require a `Content-Type` header, treats
/// an empty body (or a JSON value that is not an object) as `{}`, and
/// rejects malformed JSON with `400 {"error": "Invalid JSON body"}`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid JSON body".to_string()))?;
        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let invalid = || AppError::BadRequest("Invalid JSON body".to_string());

    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_slice::<serde_json::Value>(bytes).map_err(|_| invalid())? {
            obj @ serde_json::Value::Object(_) => obj,
            _ => serde_json::Value::Object(serde_json::Map::new()),
        }
    };

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "Request body has unexpected shape");
        invalid()
    })
}
