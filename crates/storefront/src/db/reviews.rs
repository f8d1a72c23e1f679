//! Product reviews.
//!
//! Reviews live in `PostgreSQL` in production. Without a database URL the
//! storefront falls back to a process-local map, which is what development
//! and the test suites use.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use sqlx::PgPool;
use tokio::sync::RwLock;

use super::RepositoryError;

/// A stored review, as returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub name: String,
    pub rating: u8,
    pub text: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A validated review about to be stored.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub name: String,
    pub rating: u8,
    pub text: String,
    pub image: Option<String>,
}

/// `2026-01-31T17:04:05.123Z`, the format browsers produce with `toISOString`.
fn serialize_iso_millis<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    name: String,
    rating: i16,
    body: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("invalid rating {}", row.rating))
            })?;
        Ok(Self {
            name: row.name,
            rating,
            text: row.body,
            date: row.created_at,
            image: row.image,
        })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(&self, product_id: &str) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT name, rating, body, image, created_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        product_id: &str,
        review: &NewReview,
        created_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO reviews (product_id, name, rating, body, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(product_id)
        .bind(&review.name)
        .bind(i16::from(review.rating))
        .bind(&review.text)
        .bind(review.image.as_deref())
        .bind(created_at)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}

/// Where reviews are kept.
#[derive(Clone)]
pub enum ReviewStore {
    Postgres(PgPool),
    Memory(Arc<RwLock<HashMap<String, Vec<Review>>>>),
}

impl ReviewStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Reviews for a product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, product_id: &str) -> Result<Vec<Review>, RepositoryError> {
        match self {
            Self::Postgres(pool) => ReviewRepository::new(pool).list_for_product(product_id).await,
            Self::Memory(map) => Ok(map.read().await.get(product_id).cloned().unwrap_or_default()),
        }
    }

    /// Store a review (timestamped now) and return the product's reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert or read-back fails.
    pub async fn add(
        &self,
        product_id: &str,
        review: NewReview,
    ) -> Result<Vec<Review>, RepositoryError> {
        let now = Utc::now();
        match self {
            Self::Postgres(pool) => {
                let repo = ReviewRepository::new(pool);
                repo.insert(product_id, &review, now).await?;
                repo.list_for_product(product_id).await
            }
            Self::Memory(map) => {
                let mut map = map.write().await;
                let reviews = map.entry(product_id.to_owned()).or_default();
                reviews.push(Review {
                    name: review.name,
                    rating: review.rating,
                    text: review.text,
                    date: now,
                    image: review.image,
                });
                Ok(reviews.clone())
            }
        }
    }

    /// Readiness check.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn review(name: &str, rating: u8) -> NewReview {
        NewReview {
            name: name.to_string(),
            rating,
            text: "Love it".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store_appends_per_product() {
        let store = ReviewStore::in_memory();
        assert!(store.list("ITEM1").await.unwrap().is_empty());

        store.add("ITEM1", review("Ana", 5)).await.unwrap();
        let all = store.add("ITEM1", review("Bea", 4)).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.first().unwrap().name, "Ana");

        assert!(store.list("ITEM2").await.unwrap().is_empty());
        assert!(store.ping().await.is_ok());
    }

    #[test]
    fn test_review_json_shape() {
        let review = Review {
            name: "Ana".to_string(),
            rating: 5,
            text: "Great".to_string(),
            date: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            image: None,
        };
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            json!({
                "name": "Ana",
                "rating": 5,
                "text": "Great",
                "date": "2026-03-01T12:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_row_with_bad_rating_is_corrupt() {
        let row = ReviewRow {
            name: "x".to_string(),
            rating: 9,
            body: String::new(),
            image: None,
            created_at: Utc::now(),
        };
        assert!(matches!(
            Review::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
