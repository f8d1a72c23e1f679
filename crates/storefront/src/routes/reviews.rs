//! Product review handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::db::{NewReview, Review};
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::state::AppState;

const IMAGE_DATA_URL_PREFIX: &str = "data:image/";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewsQuery {
    pub product_id: Option<String>,
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub product_id: Option<String>,
    pub name: Option<String>,
    /// Number or numeric string.
    pub rating: Option<Value>,
    pub text: Option<String>,
    pub image: Option<Value>,
}

fn required_product_id(raw: Option<&str>) -> Result<&str> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("productId required".to_string()))
}

/// A whole star rating in `1..=5`.
///
/// Strings are read up to the first non-digit, so `"4 stars"` is 4.
/// The integer a string starts with: leading whitespace, an optional sign,
/// then digits. Whatever follows the digits is ignored.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n: i64 = rest.get(..end)?.parse().ok()?;
    Some(if negative { -n } else { n })
}

fn parse_rating(raw: Option<&Value>) -> Option<u8> {
    let rating = match raw? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?,
        Value::String(s) => leading_integer(s)?,
        _ => return None,
    };
    u8::try_from(rating).ok().filter(|r| (1..=5).contains(r))
}

impl ReviewSubmission {
    fn validate(self) -> Result<(String, NewReview)> {
        let product_id = required_product_id(self.product_id.as_deref())?.to_string();
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        let rating = parse_rating(self.rating.as_ref())
            .ok_or_else(|| AppError::BadRequest("Rating must be 1-5".to_string()))?;
        let image = match self.image {
            Some(Value::String(s)) if s.starts_with(IMAGE_DATA_URL_PREFIX) => Some(s),
            _ => None,
        };
        Ok((
            product_id,
            NewReview {
                name: name.to_string(),
                rating,
                text: self.text.as_deref().map(str::trim).unwrap_or_default().to_string(),
                image,
            },
        ))
    }
}

/// `GET /api/reviews?productId=`
///
/// A failing store reads as no reviews.
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<Review>>> {
    let product_id = required_product_id(query.product_id.as_deref())?;
    match state.reviews().list(product_id).await {
        Ok(reviews) => Ok(Json(reviews)),
        Err(e) => {
            warn!(error = %e, "Failed to read reviews");
            Ok(Json(Vec::new()))
        }
    }
}

/// `POST /api/reviews`
#[instrument(skip_all)]
pub async fn submit_review(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<ReviewSubmission>,
) -> Result<Json<Vec<Review>>> {
    let (product_id, review) = submission.validate()?;
    let reviews = state
        .reviews()
        .add(&product_id, review)
        .await
        .map_err(|e| AppError::failed("Failed to save review", e))?;
    tracing::info!(product_id = %product_id, count = reviews.len(), "Review saved");
    Ok(Json(reviews))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn submission(body: Value) -> ReviewSubmission {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("\t+12px"), Some(12));
        assert_eq!(leading_integer("-7"), Some(-7));
        assert_eq!(leading_integer("- 7"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(Some(&json!(5))), Some(5));
        assert_eq!(parse_rating(Some(&json!(3.9))), Some(3));
        assert_eq!(parse_rating(Some(&json!("4"))), Some(4));
        assert_eq!(parse_rating(Some(&json!("4 stars"))), Some(4));
        assert_eq!(parse_rating(Some(&json!("+4"))), Some(4));
        assert_eq!(parse_rating(Some(&json!("4abc"))), Some(4));
        assert_eq!(parse_rating(Some(&json!(" 3"))), Some(3));
        assert_eq!(parse_rating(Some(&json!("2.8"))), Some(2));
        assert_eq!(parse_rating(Some(&json!("-4"))), None);
        assert_eq!(parse_rating(Some(&json!("+"))), None);
        assert_eq!(parse_rating(Some(&json!("abc4"))), None);
        assert_eq!(parse_rating(Some(&json!(0))), None);
        assert_eq!(parse_rating(Some(&json!(6))), None);
        assert_eq!(parse_rating(Some(&json!(-1))), None);
        assert_eq!(parse_rating(Some(&json!("five"))), None);
        assert_eq!(parse_rating(Some(&json!(true))), None);
        assert_eq!(parse_rating(None), None);
    }

    #[test]
    fn test_validate_trims_and_keeps_data_url_images() {
        let (product_id, review) = submission(json!({
            "productId": "ITEM1",
            "name": "  Ana  ",
            "rating": "5",
            "text": "  Love it ",
            "image": "data:image/jpeg;base64,/9j/4AAQ"
        }))
        .validate()
        .unwrap();
        assert_eq!(product_id, "ITEM1");
        assert_eq!(review.name, "Ana");
        assert_eq!(review.text, "Love it");
        assert_eq!(review.rating, 5);
        assert_eq!(review.image.as_deref(), Some("data:image/jpeg;base64,/9j/4AAQ"));
    }

    #[test]
    fn test_validate_drops_non_image_urls() {
        let (_, review) = submission(json!({
            "productId": "ITEM1",
            "name": "Ana",
            "rating": 4,
            "image": "https://example.com/pic.jpg"
        }))
        .validate()
        .unwrap();
        assert!(review.image.is_none());
        assert_eq!(review.text, "");
    }

    #[test]
    fn test_validate_errors() {
        let message = |body: Value| match submission(body).validate().unwrap_err() {
            AppError::BadRequest(msg) => msg,
            other => panic!("unexpected error: {other}"),
        };
        assert_eq!(message(json!({ "name": "Ana", "rating": 5 })), "productId required");
        assert_eq!(
            message(json!({ "productId": "ITEM1", "name": "  ", "rating": 5 })),
            "Name is required"
        );
        assert_eq!(
            message(json!({ "productId": "ITEM1", "name": "Ana", "rating": 9 })),
            "Rating must be 1-5"
        );
    }
}
