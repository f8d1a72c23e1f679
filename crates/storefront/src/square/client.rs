//! Square REST client with TTL caches.

use std::sync::Arc;
use std::time::Duration;

use grasshopper_core::{CatalogObjectId, LocationId};
use moka::future::Cache;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::SquareError;
use super::types::{
    CatalogObject, CatalogObjectType, CreateOrderRequest, CreateOrderResponse,
    CreatePaymentLinkRequest, CreatePaymentLinkResponse, CreatePaymentRequest,
    CreatePaymentResponse, ErrorEnvelope, ListCatalogResponse, ListLocationsResponse, Order,
    Payment, PaymentLink, RetrieveCatalogObjectResponse, SearchCatalogResponse,
};
use crate::config::{SquareConfig, bearer};

const LOCATION_TTL: Duration = Duration::from_secs(10 * 60);
const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// Client for the Square REST API.
///
/// Cheap to clone; all clones share the HTTP connection pool and caches.
#[derive(Clone)]
pub struct SquareClient {
    inner: Arc<SquareClientInner>,
}

struct SquareClientInner {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    discount_api_version: String,
    location: Cache<(), LocationId>,
    objects: Cache<String, Arc<CatalogObject>>,
    lists: Cache<CatalogObjectType, Arc<Vec<CatalogObject>>>,
}

impl SquareClient {
    /// Create a new Square client.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &SquareConfig, timeout: Duration) -> Result<Self, SquareError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&bearer(&config.access_token))
            .map_err(|e| SquareError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(SquareClientInner {
                client,
                base_url: config.base_url.clone(),
                api_version: config.api_version.clone(),
                discount_api_version: config.discount_api_version.clone(),
                location: Cache::builder()
                    .max_capacity(1)
                    .time_to_live(LOCATION_TTL)
                    .build(),
                objects: Cache::builder()
                    .max_capacity(2000)
                    .time_to_live(CATALOG_TTL)
                    .build(),
                lists: Cache::builder()
                    .max_capacity(16)
                    .time_to_live(CATALOG_TTL)
                    .build(),
            }),
        })
    }

    /// Send a request and decode the JSON body.
    ///
    /// An empty or non-JSON body is treated as `{}`. Non-2xx statuses become
    /// [`SquareError::Api`] carrying the first error's detail.
    async fn fetch_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        version: &str,
    ) -> Result<T, SquareError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.inner.base_url);
        let mut request = self
            .inner
            .client
            .request(method, &url)
            .header("Square-Version", version);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value: serde_json::Value = if text.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({}))
        };

        if !status.is_success() {
            let envelope: ErrorEnvelope = serde_json::from_value(value).unwrap_or_default();
            let detail = envelope.first_message();
            warn!(
                status = status.as_u16(),
                path = %path,
                detail = detail.as_deref().unwrap_or(""),
                "Square API returned non-success status"
            );
            return Err(SquareError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SquareError> {
        self.fetch_json::<T, ()>(Method::GET, path, None, &self.inner.api_version)
            .await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, SquareError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch_json(Method::POST, path, Some(body), &self.inner.api_version)
            .await
    }

    // =========================================================================
    // Locations
    // =========================================================================

    /// The id of the account's first location.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::NoLocation`] when the account has none, or the
    /// underlying API error.
    #[instrument(skip(self))]
    pub async fn location_id(&self) -> Result<LocationId, SquareError> {
        if let Some(id) = self.inner.location.get(&()).await {
            debug!("Cache hit for location id");
            return Ok(id);
        }

        let data: ListLocationsResponse = self.get("/locations").await?;
        let id = data
            .locations
            .into_iter()
            .next()
            .map(|l| LocationId::new_unchecked(l.id))
            .ok_or(SquareError::NoLocation)?;

        self.inner.location.insert((), id.clone()).await;
        Ok(id)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Retrieve one catalog object. Square's 404 is reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails for any other reason.
    #[instrument(skip(self), fields(object_id = %id))]
    pub async fn catalog_object(
        &self,
        id: &CatalogObjectId,
    ) -> Result<Option<Arc<CatalogObject>>, SquareError> {
        if let Some(object) = self.inner.objects.get(id.as_str()).await {
            debug!("Cache hit for catalog object");
            return Ok(Some(object));
        }

        let path = format!("/catalog/object/{}", urlencoding::encode(id.as_str()));
        let data: RetrieveCatalogObjectResponse = match self.get(&path).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let Some(object) = data.object else {
            return Ok(None);
        };
        let object = Arc::new(object);
        self.inner
            .objects
            .insert(id.as_str().to_owned(), Arc::clone(&object))
            .await;
        Ok(Some(object))
    }

    /// All catalog objects of one type, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self), fields(object_type = object_type.as_str()))]
    pub async fn list_catalog(
        &self,
        object_type: CatalogObjectType,
    ) -> Result<Arc<Vec<CatalogObject>>, SquareError> {
        if let Some(objects) = self.inner.lists.get(&object_type).await {
            debug!("Cache hit for catalog list");
            return Ok(objects);
        }

        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let path = {
                let mut query = url::form_urlencoded::Serializer::new(String::new());
                query.append_pair("types", object_type.as_str());
                if let Some(c) = cursor.as_deref() {
                    query.append_pair("cursor", c);
                }
                format!("/catalog/list?{}", query.finish())
            };

            let page: ListCatalogResponse = self.get(&path).await?;
            objects.extend(page.objects);
            cursor = page.cursor.filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        debug!(count = objects.len(), "Fetched catalog list");
        let objects = Arc::new(objects);
        self.inner
            .lists
            .insert(object_type, Arc::clone(&objects))
            .await;
        Ok(objects)
    }

    /// Keyword search over catalog items.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_catalog_items(
        &self,
        keywords: &str,
    ) -> Result<Vec<CatalogObject>, SquareError> {
        let body = json!({
            "object_types": ["ITEM"],
            "query": { "text_query": { "keywords": [keywords] } }
        });
        let data: SearchCatalogResponse = self.post("/catalog/search", &body).await?;
        Ok(data.objects)
    }

    /// Every discount, pricing rule and product set, with related objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_promotions(&self) -> Result<SearchCatalogResponse, SquareError> {
        let body = json!({
            "object_types": ["DISCOUNT", "PRICING_RULE", "PRODUCT_SET"],
            "include_related_objects": true
        });
        self.fetch_json(
            Method::POST,
            "/catalog/search",
            Some(&body),
            &self.inner.discount_api_version,
        )
        .await
    }

    /// Fetch a discount object directly. Any failure yields `None`.
    #[instrument(skip(self))]
    pub async fn fetch_discount_object(&self, discount_id: &str) -> Option<CatalogObject> {
        let path = format!("/catalog/object/{}", urlencoding::encode(discount_id));
        match self
            .fetch_json::<RetrieveCatalogObjectResponse, ()>(
                Method::GET,
                &path,
                None,
                &self.inner.discount_api_version,
            )
            .await
        {
            Ok(data) => data.object,
            Err(e) => {
                debug!(error = %e, "Discount lookup failed");
                None
            }
        }
    }

    // =========================================================================
    // Orders & payments
    // =========================================================================

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns an error if Square rejects the order or returns none.
    #[instrument(skip(self, request), fields(idempotency_key = %request.idempotency_key))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, SquareError> {
        let data: CreateOrderResponse = self.post("/orders", request).await?;
        data.order.ok_or(SquareError::MissingField("order"))
    }

    /// Charge a payment source for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if Square rejects the payment or returns none.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<Payment, SquareError> {
        let data: CreatePaymentResponse = self.post("/payments", request).await?;
        data.payment.ok_or(SquareError::MissingField("payment"))
    }

    /// Create a hosted checkout link.
    ///
    /// # Errors
    ///
    /// Returns an error if Square rejects the request or returns no link.
    #[instrument(skip(self, request), fields(idempotency_key = %request.idempotency_key))]
    pub async fn create_payment_link(
        &self,
        request: &CreatePaymentLinkRequest,
    ) -> Result<PaymentLink, SquareError> {
        let data: CreatePaymentLinkResponse = self
            .post("/online-checkout/payment-links", request)
            .await?;
        data.payment_link
            .ok_or(SquareError::MissingField("payment_link"))
    }
}
