//! Product catalog views built from Square catalog objects.
//!
//! Square returns items, images and categories as separate objects; these
//! functions join them into the flat product shapes the storefront pages
//! render. Prices are in dollars.

pub mod brand;

use std::collections::HashMap;

use grasshopper_core::{CatalogObjectId, Cents};
use serde::Serialize;
use tracing::{debug, instrument, warn};

pub use brand::{MENS_CATEGORY, THE_DOUX, extract_brand};

use crate::square::{CatalogObject, CatalogObjectType, ItemData, SquareClient, SquareError};

/// Square product type for bookable services, which are not sold online.
const APPOINTMENTS_SERVICE: &str = "APPOINTMENTS_SERVICE";

/// Variation name used when Square has none.
const STANDARD: &str = "Standard";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// A product as listed on the shop and search pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub variation_id: Option<String>,
    pub name: String,
    pub description: String,
    /// Lowest variation price.
    pub price: f64,
    pub price_range: Option<PriceRange>,
    pub image_url: Option<String>,
    pub brand: String,
    pub category: Option<String>,
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationSummary {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub sku: String,
}

/// A product page, with every variation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub variation_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_range: Option<PriceRange>,
    pub variations: Vec<VariationSummary>,
    pub image_url: Option<String>,
    pub brand: String,
    pub category: Option<String>,
}

fn image_urls(objects: &[CatalogObject]) -> HashMap<&str, &str> {
    objects
        .iter()
        .filter_map(|o| {
            let url = o.image_data.as_ref()?.url.as_deref()?;
            Some((o.id.as_str(), url))
        })
        .collect()
}

fn category_names(objects: &[CatalogObject]) -> HashMap<&str, &str> {
    objects
        .iter()
        .filter_map(|o| {
            let name = o.category_data.as_ref()?.name.as_deref()?;
            Some((o.id.as_str(), name))
        })
        .collect()
}

fn first_image(data: &ItemData, images: &HashMap<&str, &str>) -> Option<String> {
    data.image_ids
        .first()
        .and_then(|id| images.get(id.as_str()))
        .map(|url| (*url).to_string())
}

fn variation_price(variation: &CatalogObject) -> Option<Cents> {
    variation
        .item_variation_data
        .as_ref()?
        .price_money
        .map(|m| m.cents())
}

fn price_span(prices: impl Iterator<Item = Cents>) -> (Cents, Cents) {
    prices
        .fold(None, |acc: Option<(Cents, Cents)>, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
        .unwrap_or((Cents::ZERO, Cents::ZERO))
}

fn range(min: Cents, max: Cents) -> Option<PriceRange> {
    (min != max).then(|| PriceRange {
        min: min.to_dollars_f64(),
        max: max.to_dollars_f64(),
    })
}

fn is_sellable(data: &ItemData) -> bool {
    data.product_type.as_deref() != Some(APPOINTMENTS_SERVICE)
}

/// Build a listing entry. `price_from_first` uses only the first
/// variation's price, as the search results do.
fn summarize(
    item: &CatalogObject,
    images: &HashMap<&str, &str>,
    categories: &HashMap<&str, &str>,
    price_from_first: bool,
) -> Option<ProductSummary> {
    let data = item.item_data.as_ref()?;
    if !is_sellable(data) {
        return None;
    }

    let (min, max) = if price_from_first {
        let p = data
            .variations
            .first()
            .and_then(variation_price)
            .unwrap_or(Cents::ZERO);
        (p, p)
    } else {
        price_span(data.variations.iter().filter_map(variation_price))
    };

    let name = data.name.clone().unwrap_or_default();
    let brand = extract_brand(&name);
    let category = data
        .primary_category_id()
        .and_then(|id| categories.get(id))
        .map(|c| (*c).to_string());

    Some(ProductSummary {
        id: item.id.clone(),
        variation_id: data.variations.first().map(|v| v.id.clone()),
        description: data.description.clone().unwrap_or_default(),
        price: min.to_dollars_f64(),
        price_range: range(min, max),
        image_url: first_image(data, images),
        brand: brand.to_string(),
        category: brand::resolve_category(category, brand),
        product_type: data.product_type.clone(),
        name,
    })
}

/// Every sellable item in the catalog.
///
/// # Errors
///
/// Returns an error if the item, image or category listing fails.
#[instrument(skip(square))]
pub async fn list_products(square: &SquareClient) -> Result<Vec<ProductSummary>, SquareError> {
    let (items, images, categories) = tokio::try_join!(
        square.list_catalog(CatalogObjectType::Item),
        square.list_catalog(CatalogObjectType::Image),
        square.list_catalog(CatalogObjectType::Category),
    )?;

    let images = image_urls(&images);
    let categories = category_names(&categories);
    let products: Vec<ProductSummary> = items
        .iter()
        .filter_map(|item| summarize(item, &images, &categories, false))
        .collect();

    debug!(items = items.len(), products = products.len(), "Summarized catalog items");
    Ok(products)
}

/// One product with all of its variations, or `None` if there is no such
/// item.
///
/// # Errors
///
/// Returns an error if the item or image lookups fail. A failed category
/// lookup is logged and leaves the category unset.
#[instrument(skip(square), fields(product_id = %id))]
pub async fn product_detail(
    square: &SquareClient,
    id: &CatalogObjectId,
) -> Result<Option<ProductDetail>, SquareError> {
    let Some(item) = square.catalog_object(id).await? else {
        return Ok(None);
    };
    let Some(data) = item.item_data.as_ref() else {
        return Ok(None);
    };

    let images = square.list_catalog(CatalogObjectType::Image).await?;
    let images = image_urls(&images);

    let mut category = None;
    if let Some(category_id) = data.primary_category_id() {
        match CatalogObjectId::parse(category_id) {
            Ok(category_id) => match square.catalog_object(&category_id).await {
                Ok(obj) => {
                    category = obj
                        .and_then(|o| o.category_data.as_ref().and_then(|c| c.name.clone()));
                }
                Err(e) => warn!(error = %e, "Error fetching category"),
            },
            Err(e) => warn!(error = %e, "Malformed category id"),
        }
    }

    let variations: Vec<VariationSummary> = data
        .variations
        .iter()
        .filter_map(|v| {
            let vd = v.item_variation_data.as_ref()?;
            Some(VariationSummary {
                id: v.id.clone(),
                name: vd
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| STANDARD.to_string()),
                price: vd.price_money.map_or(0.0, |m| m.cents().to_dollars_f64()),
                sku: vd.sku.clone().unwrap_or_default(),
            })
        })
        .collect();

    let (min, max) = price_span(
        data.variations
            .iter()
            .filter(|v| v.item_variation_data.is_some())
            .map(|v| variation_price(v).unwrap_or(Cents::ZERO)),
    );

    let name = data.name.clone().unwrap_or_default();
    let brand = extract_brand(&name);

    Ok(Some(ProductDetail {
        id: item.id.clone(),
        variation_id: variations.first().map(|v| v.id.clone()),
        description: data.description.clone().unwrap_or_default(),
        price: min.to_dollars_f64(),
        price_range: range(min, max),
        image_url: first_image(data, &images),
        brand: brand.to_string(),
        category: brand::resolve_category(category, brand),
        variations,
        name,
    }))
}

/// Keyword search over sellable items.
///
/// # Errors
///
/// Returns an error if the search or the image/category listings fail.
#[instrument(skip(square))]
pub async fn search(square: &SquareClient, query: &str) -> Result<Vec<ProductSummary>, SquareError> {
    let (items, images, categories) = tokio::try_join!(
        square.search_catalog_items(query),
        square.list_catalog(CatalogObjectType::Image),
        square.list_catalog(CatalogObjectType::Category),
    )?;

    let images = image_urls(&images);
    let categories = category_names(&categories);
    Ok(items
        .iter()
        .filter_map(|item| summarize(item, &images, &categories, true))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::json;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::tests::test_config;

    /// Records the level of every event this module emits.
    #[derive(Clone, Default)]
    struct CatalogEvents(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for CatalogEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let target = module_path!().trim_end_matches("::tests");
            if event.metadata().target() == target {
                self.0.lock().unwrap().push(*event.metadata().level());
            }
        }
    }

    fn item(value: serde_json::Value) -> CatalogObject {
        serde_json::from_value(value).unwrap()
    }

    fn sample_item() -> CatalogObject {
        item(sample_item_json())
    }

    fn sample_item_json() -> serde_json::Value {
        json!({
            "type": "ITEM",
            "id": "ITEM1",
            "item_data": {
                "name": "American Crew Fiber",
                "description": "Pliable fiber",
                "image_ids": ["IMG1"],
                "variations": [
                    { "type": "ITEM_VARIATION", "id": "V1", "item_variation_data": {
                        "name": "3 oz", "price_money": { "amount": 2400, "currency": "USD" } } },
                    { "type": "ITEM_VARIATION", "id": "V2", "item_variation_data": {
                        "name": "1.75 oz", "price_money": { "amount": 1800, "currency": "USD" } } }
                ]
            }
        })
    }

    #[test]
    fn test_summarize_price_range_and_mens_category() {
        let images = HashMap::from([("IMG1", "https://img/1.jpg")]);
        let summary = summarize(&sample_item(), &images, &HashMap::new(), false).unwrap();

        assert_eq!(summary.variation_id.as_deref(), Some("V1"));
        assert!((summary.price - 18.0).abs() < f64::EPSILON);
        assert_eq!(
            summary.price_range,
            Some(PriceRange {
                min: 18.0,
                max: 24.0
            })
        );
        assert_eq!(summary.image_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(summary.brand, "American Crew");
        assert_eq!(summary.category.as_deref(), Some(MENS_CATEGORY));
    }

    #[test]
    fn test_summarize_first_variation_price_for_search() {
        let summary = summarize(&sample_item(), &HashMap::new(), &HashMap::new(), true).unwrap();
        assert!((summary.price - 24.0).abs() < f64::EPSILON);
        assert_eq!(summary.price_range, None);
        assert_eq!(summary.image_url, None);
    }

    #[test]
    fn test_appointments_are_filtered() {
        let service = item(json!({
            "type": "ITEM",
            "id": "SVC",
            "item_data": { "name": "Silk Press", "product_type": "APPOINTMENTS_SERVICE" }
        }));
        assert!(summarize(&service, &HashMap::new(), &HashMap::new(), false).is_none());
    }

    #[test]
    fn test_category_lookup() {
        let obj = item(json!({
            "type": "ITEM",
            "id": "ITEM2",
            "item_data": { "name": "Olaplex No. 3", "category_id": "CAT1", "variations": [] }
        }));
        let categories = HashMap::from([("CAT1", "Treatments")]);
        let summary = summarize(&obj, &HashMap::new(), &categories, false).unwrap();
        assert_eq!(summary.category.as_deref(), Some("Treatments"));
        assert_eq!(summary.variation_id, None);
        assert!(summary.price.abs() < f64::EPSILON);
        assert_eq!(
            serde_json::to_value(&summary).unwrap()["priceRange"],
            serde_json::Value::Null
        );
    }

    #[tokio::test]
    async fn test_list_products_leaves_info_event_to_handler() {
        let server = MockServer::start().await;
        for (kind, objects) in [
            ("ITEM", json!([sample_item_json()])),
            ("IMAGE", json!([])),
            ("CATEGORY", json!([])),
        ] {
            Mock::given(method("GET"))
                .and(path("/v2/catalog/list"))
                .and(query_param("types", kind))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": objects })))
                .mount(&server)
                .await;
        }
        let config = test_config(&server.uri());
        let square = SquareClient::new(&config.square, Duration::from_secs(5)).unwrap();

        let events = CatalogEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(events.clone()));
        let products = list_products(&square).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(*events.0.lock().unwrap(), vec![Level::DEBUG]);
    }
}
