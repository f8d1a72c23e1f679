//! AI hair analysis.
//!
//! The customer uploads a photo; Claude plays the shop's stylist, describes
//! the hair and picks products from the live catalog. Picks are only kept
//! when they name a product that was actually offered.

use std::sync::LazyLock;

use askama::Template;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::catalog::{MENS_CATEGORY, ProductSummary, THE_DOUX, list_products};
use crate::claude::{ClaudeClient, ContentBlock, Message};
use crate::error::AppError;
use crate::square::SquareClient;

const MAX_TOKENS: u32 = 1500;

/// Longest product description shown to the model.
const DESCRIPTION_LIMIT: usize = 240;

/// Doux products offered when the model picks nothing usable.
const DOUX_FALLBACK_COUNT: usize = 4;

const USER_PROMPT: &str = "Please analyze this hair photo with specific color naming and recommend 3-5 products with strong personalized buy-action reasons.";

const BUY_HOOK: &str = "Great add-to-cart pick to start seeing results this week.";
const DEFAULT_REASON: &str =
    "Great fit for your routine and a strong add-to-cart pick to start seeing results this week.";
const DOUX_FALLBACK_REASON: &str =
    "Strong match for your hair goals and a great add-to-cart pick to start seeing results this week.";

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("valid data URL regex"));

static DOUX_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdoux\b").expect("valid doux regex"));

static HAS_BUY_HOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(add-to-cart|add to cart|start seeing results|this week|pick|shop|grab|routine)")
        .expect("valid buy hook regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Body of `POST /api/hair-analysis`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HairAnalysisRequest {
    /// Photo as a data URL or bare base64.
    pub image: Option<String>,
    /// Recommend from the men's range only.
    pub mens_mode: bool,
    /// Customer asked for The Doux products.
    pub doux_focus: bool,
}

impl HairAnalysisRequest {
    const fn wants_doux(&self) -> bool {
        self.doux_focus && !self.mens_mode
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product: ProductSummary,
    pub reason: String,
}

/// Response of `POST /api/hair-analysis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HairAnalysis {
    /// The model's `analysis` object, passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    pub recommendations: Vec<Recommendation>,
}

/// One catalog entry as shown to the model.
#[derive(Debug, Serialize)]
struct PromptProduct<'a> {
    id: &'a str,
    name: &'a str,
    brand: &'a str,
    description: String,
    price: f64,
    category: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "prompts/stylist.txt")]
struct StylistPrompt {
    doux_focus: bool,
    catalog: String,
}

fn is_doux_product(product: &ProductSummary) -> bool {
    product.brand == THE_DOUX
        || DOUX_WORD.is_match(&product.name)
        || DOUX_WORD.is_match(&product.description)
}

/// Products eligible for this request.
///
/// Men's mode keeps only the men's category, otherwise everything else.
/// With the Doux focus, only Doux products remain when there are any.
fn relevant_products(products: Vec<ProductSummary>, req: &HairAnalysisRequest) -> Vec<ProductSummary> {
    let relevant: Vec<ProductSummary> = products
        .into_iter()
        .filter(|p| (p.category.as_deref() == Some(MENS_CATEGORY)) == req.mens_mode)
        .collect();
    if req.wants_doux() && relevant.iter().any(is_doux_product) {
        return relevant.into_iter().filter(is_doux_product).collect();
    }
    relevant
}

fn short_description(description: &str) -> String {
    WHITESPACE
        .replace_all(description, " ")
        .trim()
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}

/// The system prompt with the catalog embedded as pretty JSON.
///
/// # Errors
///
/// Returns an error if the catalog cannot be serialized or the template
/// fails to render.
pub fn system_prompt(products: &[ProductSummary], doux_focus: bool) -> Result<String, AppError> {
    let catalog: Vec<PromptProduct<'_>> = products
        .iter()
        .map(|p| PromptProduct {
            id: &p.id,
            name: &p.name,
            brand: &p.brand,
            description: short_description(&p.description),
            price: p.price,
            category: p.category.as_deref(),
        })
        .collect();
    let catalog = serde_json::to_string_pretty(&catalog)
        .map_err(|e| AppError::Internal(format!("catalog serialization: {e}")))?;
    StylistPrompt {
        doux_focus,
        catalog,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("prompt render: {e}")))
}

/// Media type from a data URL prefix; JPEG when unknown.
#[must_use]
pub fn media_type(image: &str) -> &'static str {
    ["png", "webp", "gif"]
        .into_iter()
        .find(|kind| image.starts_with(&format!("data:image/{kind}")))
        .map_or("image/jpeg", |kind| match kind {
            "png" => "image/png",
            "webp" => "image/webp",
            _ => "image/gif",
        })
}

/// The base64 payload of a data URL (or the input unchanged).
#[must_use]
pub fn base64_payload(image: &str) -> &str {
    DATA_URL_PREFIX
        .find(image)
        .map_or(image, |m| image.get(m.end()..).unwrap_or_default())
}

/// The JSON object spanning the first `{` to the last `}` of the reply,
/// which tolerates markdown fences and stray prose around it.
#[must_use]
pub fn extract_json(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    let candidate = text.get(start..=end)?;
    serde_json::from_str(candidate).ok()
}

fn with_buy_hook(reason: Option<&str>) -> String {
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    match reason {
        None => DEFAULT_REASON.to_string(),
        Some(r) if HAS_BUY_HOOK.is_match(r) => r.to_string(),
        Some(r) => format!("{r} {BUY_HOOK}"),
    }
}

/// Match the model's picks against the offered products.
fn recommendations(
    parsed: &Value,
    products: &[ProductSummary],
    req: &HairAnalysisRequest,
) -> Vec<Recommendation> {
    let picks = parsed
        .get("recommendedProductIds")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut recommendations: Vec<Recommendation> = picks
        .iter()
        .filter_map(|pick| {
            let id = pick.get("id")?.as_str()?;
            let product = products.iter().find(|p| p.id == id)?;
            Some(Recommendation {
                product: product.clone(),
                reason: with_buy_hook(pick.get("reason").and_then(Value::as_str)),
            })
        })
        .collect();

    if req.wants_doux() && recommendations.is_empty() {
        recommendations.extend(
            products
                .iter()
                .filter(|p| is_doux_product(p))
                .take(DOUX_FALLBACK_COUNT)
                .map(|product| Recommendation {
                    product: product.clone(),
                    reason: DOUX_FALLBACK_REASON.to_string(),
                }),
        );
    }
    recommendations
}

/// Analyze a hair photo and recommend catalog products.
///
/// # Errors
///
/// Returns `BadRequest` without an image, `Failed` when the catalog cannot
/// be loaded, and `Upstream` when Claude fails or answers with something
/// that is not JSON.
#[instrument(skip_all, fields(mens_mode = req.mens_mode, doux_focus = req.doux_focus))]
pub async fn analyze_hair(
    square: &SquareClient,
    claude: &ClaudeClient,
    req: &HairAnalysisRequest,
) -> Result<HairAnalysis, AppError> {
    let Some(image) = req.image.as_deref().filter(|i| !i.is_empty()) else {
        return Err(AppError::BadRequest("No image provided".to_string()));
    };

    let products = list_products(square)
        .await
        .map_err(|e| AppError::failed("Something went wrong. Please try again.", e))?;
    let products = relevant_products(products, req);
    let system = system_prompt(&products, req.wants_doux())?;

    let message = Message::user(vec![
        ContentBlock::base64_image(media_type(image), base64_payload(image)),
        ContentBlock::text(USER_PROMPT),
    ]);
    let response = claude
        .chat(vec![message], Some(system), MAX_TOKENS)
        .await
        .map_err(|e| AppError::upstream("AI analysis failed. Please try again.", e))?;

    let text = response.first_text();
    let Some(parsed) = extract_json(text) else {
        warn!(response = %text, "Failed to parse Claude response");
        return Err(AppError::upstream(
            "Failed to parse AI analysis. Please try again.",
            "no JSON object in response",
        ));
    };

    let recommendations = recommendations(&parsed, &products, req);
    info!(
        offered = products.len(),
        recommended = recommendations.len(),
        "Hair analysis complete"
    );
    Ok(HairAnalysis {
        analysis: parsed.get("analysis").cloned(),
        recommendations,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: &str, name: &str, brand: &str, category: Option<&str>) -> ProductSummary {
        ProductSummary {
            id: id.to_string(),
            variation_id: Some(format!("{id}-V")),
            name: name.to_string(),
            description: "A  great\n\tproduct".to_string(),
            price: 24.0,
            price_range: None,
            image_url: None,
            brand: brand.to_string(),
            category: category.map(str::to_string),
            product_type: Some("REGULAR".to_string()),
        }
    }

    fn catalog() -> Vec<ProductSummary> {
        vec![
            product("P1", "Olaplex No. 3", "Olaplex", Some("Treatments")),
            product("P2", "The Doux Mousse Def", THE_DOUX, Some("Styling")),
            product("P3", "American Crew Fiber", "American Crew", Some(MENS_CATEGORY)),
            product("P4", "Doux Bee Girl", THE_DOUX, None),
        ]
    }

    fn request(mens_mode: bool, doux_focus: bool) -> HairAnalysisRequest {
        HairAnalysisRequest {
            image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            mens_mode,
            doux_focus,
        }
    }

    fn ids(products: &[ProductSummary]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_relevant_products() {
        assert_eq!(ids(&relevant_products(catalog(), &request(false, false))), ["P1", "P2", "P4"]);
        assert_eq!(ids(&relevant_products(catalog(), &request(true, false))), ["P3"]);
        assert_eq!(ids(&relevant_products(catalog(), &request(false, true))), ["P2", "P4"]);
        // doux focus is ignored in men's mode
        assert_eq!(ids(&relevant_products(catalog(), &request(true, true))), ["P3"]);
    }

    #[test]
    fn test_doux_focus_without_doux_products_keeps_all() {
        let products = vec![product("P1", "Olaplex No. 3", "Olaplex", None)];
        assert_eq!(ids(&relevant_products(products, &request(false, true))), ["P1"]);
    }

    #[test]
    fn test_media_type_and_payload() {
        assert_eq!(media_type("data:image/png;base64,AAA"), "image/png");
        assert_eq!(media_type("data:image/webp;base64,AAA"), "image/webp");
        assert_eq!(media_type("data:image/gif;base64,AAA"), "image/gif");
        assert_eq!(media_type("data:image/jpeg;base64,AAA"), "image/jpeg");
        assert_eq!(media_type("/9j/4AAQ"), "image/jpeg");

        assert_eq!(base64_payload("data:image/png;base64,iVBOR"), "iVBOR");
        assert_eq!(base64_payload("/9j/4AAQ"), "/9j/4AAQ");
    }

    #[test]
    fn test_extract_json() {
        let text = "Here you go:\n```json\n{\"analysis\": {\"hairType\": \"wavy\"}}\n```";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({ "analysis": { "hairType": "wavy" } })
        );
        assert!(extract_json("no json here").is_none());
        assert!(extract_json("{ not json }").is_none());
        assert!(extract_json("} backwards {").is_none());
    }

    #[test]
    fn test_with_buy_hook() {
        assert_eq!(with_buy_hook(None), DEFAULT_REASON);
        assert_eq!(with_buy_hook(Some("   ")), DEFAULT_REASON);
        assert_eq!(
            with_buy_hook(Some("Adds shine. Grab it today!")),
            "Adds shine. Grab it today!"
        );
        assert_eq!(
            with_buy_hook(Some("Adds shine to mids and ends.")),
            format!("Adds shine to mids and ends. {BUY_HOOK}")
        );
    }

    #[test]
    fn test_recommendations_keep_only_offered_ids() {
        let products = relevant_products(catalog(), &request(false, false));
        let parsed = json!({
            "recommendedProductIds": [
                { "id": "P1", "reason": "Repairs bonds; use weekly before shampoo." },
                { "id": "P3", "reason": "Not offered in this mode." },
                { "id": "NOPE" },
                { "reason": "missing id" }
            ]
        });
        let recs = recommendations(&parsed, &products, &request(false, false));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product.id, "P1");
        assert!(recs[0].reason.ends_with(BUY_HOOK));
    }

    #[test]
    fn test_doux_fallback_when_nothing_matches() {
        let req = request(false, true);
        let products = relevant_products(catalog(), &req);
        let recs = recommendations(&json!({ "recommendedProductIds": [] }), &products, &req);
        assert_eq!(
            recs.iter().map(|r| r.product.id.as_str()).collect::<Vec<_>>(),
            ["P2", "P4"]
        );
        assert!(recs.iter().all(|r| r.reason == DOUX_FALLBACK_REASON));

        let recs = recommendations(&json!({}), &products, &request(false, false));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_system_prompt() {
        let prompt = system_prompt(&catalog()[..1], false).unwrap();
        assert!(prompt.starts_with("You are D'yette Spain"));
        assert!(prompt.contains("\"id\": \"P1\""));
        assert!(prompt.contains("\"description\": \"A great product\""));
        assert!(!prompt.contains("The customer selected The Doux focus"));
        assert!(prompt.contains("\"recommendedProductIds\": ["));

        let prompt = system_prompt(&catalog()[1..2], true).unwrap();
        assert!(prompt.contains("The customer selected The Doux focus"));
    }

    #[test]
    fn test_short_description_caps_length() {
        let long = "word ".repeat(100);
        assert_eq!(short_description(&long).chars().count(), DESCRIPTION_LIMIT);
    }
}
