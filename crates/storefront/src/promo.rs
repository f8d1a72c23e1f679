//! Promo code resolution against Square discounts and pricing rules.
//!
//! Codes are not stored anywhere else: a code is valid when it names a
//! Square `DISCOUNT` (or a `PRICING_RULE` pointing at one). Exact name
//! matches win over substring matches, and a pricing rule's validity dates
//! are enforced.

use chrono::{NaiveDate, Utc};
use grasshopper_core::promo::{Discount, PromoSummary};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::square::{CatalogObject, CatalogObjectType, PricingRuleData, SquareClient};

pub const MSG_EMPTY: &str = "Please enter a promo code";
pub const MSG_UNAVAILABLE: &str = "Unable to validate promo code. Please try again.";
pub const MSG_INVALID: &str = "Invalid promo code";
pub const MSG_NOT_YET_ACTIVE: &str = "This promo code is not yet active";
pub const MSG_EXPIRED: &str = "This promo code has expired";

/// Outcome of resolving a customer-entered code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoOutcome {
    Valid { code: String, discount: Discount },
    Invalid(&'static str),
}

impl PromoOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Body of `POST /api/validate-promo`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PromoResponse {
    Valid(PromoSummary),
    Invalid { valid: bool, message: &'static str },
}

impl From<&PromoOutcome> for PromoResponse {
    fn from(outcome: &PromoOutcome) -> Self {
        match outcome {
            PromoOutcome::Valid { code, discount } => Self::Valid(discount.summary(code)),
            PromoOutcome::Invalid(message) => Self::Invalid {
                valid: false,
                message,
            },
        }
    }
}

/// Upper-cased, trimmed code.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn upper_name(name: Option<&String>) -> String {
    name.map(|n| n.trim().to_uppercase()).unwrap_or_default()
}

fn discount_name(obj: &CatalogObject) -> String {
    upper_name(obj.discount_data.as_ref().and_then(|d| d.name.as_ref()))
}

fn rule_name(obj: &CatalogObject) -> String {
    upper_name(obj.pricing_rule_data.as_ref().and_then(|r| r.name.as_ref()))
}

fn rule_discount_id(obj: &CatalogObject) -> Option<&str> {
    obj.pricing_rule_data.as_ref()?.discount_id.as_deref()
}

/// Either name contains the other. Blank names never match.
fn loosely_matches(name: &str, code: &str) -> bool {
    !name.is_empty() && (name.contains(code) || code.contains(name))
}

/// Whether `today` falls within the rule's validity window.
fn check_dates(rule: &PricingRuleData, today: NaiveDate) -> Result<(), &'static str> {
    let parse = |d: Option<&String>| {
        d.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
    };
    if let Some(from) = parse(rule.valid_from_date.as_ref())
        && today < from
    {
        return Err(MSG_NOT_YET_ACTIVE);
    }
    if let Some(until) = parse(rule.valid_until_date.as_ref())
        && today > until
    {
        return Err(MSG_EXPIRED);
    }
    Ok(())
}

/// Resolve a code entered at checkout.
#[instrument(skip(square))]
pub async fn resolve_promo_code(square: &SquareClient, raw_code: &str) -> PromoOutcome {
    let code = normalize_code(raw_code);
    if code.is_empty() {
        return PromoOutcome::Invalid(MSG_EMPTY);
    }

    let data = match square.search_promotions().await {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "Promotion search failed");
            return PromoOutcome::Invalid(MSG_UNAVAILABLE);
        }
    };
    let combined: Vec<&CatalogObject> = data.objects.iter().chain(&data.related_objects).collect();

    resolve_among(square, &combined, &code, Utc::now().date_naive()).await
}

async fn resolve_among(
    square: &SquareClient,
    combined: &[&CatalogObject],
    code: &str,
    today: NaiveDate,
) -> PromoOutcome {
    let discounts: Vec<&CatalogObject> = combined
        .iter()
        .copied()
        .filter(|o| o.object_type == CatalogObjectType::Discount)
        .collect();
    let rules: Vec<&CatalogObject> = combined
        .iter()
        .copied()
        .filter(|o| o.object_type == CatalogObjectType::PricingRule)
        .collect();

    // The rule's discount, from the search results or fetched directly.
    let discount_for_rule = |rule: &CatalogObject| {
        let discount_id = rule_discount_id(rule).map(str::to_owned);
        let local = discount_id.as_deref().and_then(|id| {
            discounts
                .iter()
                .find(|d| d.id == id)
                .map(|d| (*d).clone())
        });
        async move {
            match (local, discount_id) {
                (Some(found), _) => Some(found),
                (None, Some(id)) => square.fetch_discount_object(&id).await,
                (None, None) => None,
            }
        }
    };

    let mut matched_rule: Option<&CatalogObject> = None;
    let mut matched_discount: Option<CatalogObject> = discounts
        .iter()
        .find(|d| discount_name(d) == code)
        .map(|d| (*d).clone());

    if matched_discount.is_none() {
        matched_rule = rules.iter().copied().find(|r| rule_name(r) == code);
        if let Some(rule) = matched_rule {
            matched_discount = discount_for_rule(rule).await;
        }
    }

    if matched_discount.is_none() && matched_rule.is_none() {
        matched_discount = discounts
            .iter()
            .find(|d| loosely_matches(&discount_name(d), code))
            .map(|d| (*d).clone());

        if matched_discount.is_none() {
            matched_rule = rules
                .iter()
                .copied()
                .find(|r| loosely_matches(&rule_name(r), code));
            if let Some(rule) = matched_rule {
                matched_discount = discount_for_rule(rule).await;
            }
        }
    }

    let Some(discount_obj) = matched_discount else {
        debug!("No discount matched");
        return PromoOutcome::Invalid(MSG_INVALID);
    };

    let rule = matched_rule.or_else(|| {
        rules
            .iter()
            .copied()
            .find(|r| rule_discount_id(r) == Some(discount_obj.id.as_str()))
    });
    if let Some(rule_data) = rule.and_then(|r| r.pricing_rule_data.as_ref())
        && let Err(message) = check_dates(rule_data, today)
    {
        return PromoOutcome::Invalid(message);
    }

    let data = discount_obj.discount_data.unwrap_or_default();
    let discount = Discount::from_catalog(
        data.name.as_deref(),
        code,
        data.discount_type.as_deref(),
        data.percentage.as_deref(),
        data.amount_money.map(|m| m.amount),
    );

    PromoOutcome::Valid {
        code: code.to_owned(),
        discount,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::SquareConfig;

    fn square_for(server: &MockServer) -> SquareClient {
        SquareClient::new(
            &SquareConfig {
                access_token: SecretString::from("sq-test-token"),
                application_id: "app".to_string(),
                base_url: format!("{}/v2", server.uri()),
                api_version: "2024-01-18".to_string(),
                discount_api_version: "2024-11-20".to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn objects(value: serde_json::Value) -> Vec<CatalogObject> {
        serde_json::from_value(value).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn catalog() -> Vec<CatalogObject> {
        objects(json!([
            { "type": "DISCOUNT", "id": "D10", "discount_data": {
                "name": "WELCOME10", "discount_type": "FIXED_PERCENTAGE", "percentage": "10.0" } },
            { "type": "DISCOUNT", "id": "D5", "discount_data": {
                "name": "Five Off", "discount_type": "FIXED_AMOUNT",
                "amount_money": { "amount": 500, "currency": "USD" } } },
            { "type": "DISCOUNT", "id": "DSHIP", "discount_data": {
                "name": "Free Shipping Promo", "discount_type": "FIXED_PERCENTAGE", "percentage": "0" } },
            { "type": "DISCOUNT", "id": "DBLANK", "discount_data": { "discount_type": "FIXED_PERCENTAGE" } },
            { "type": "PRICING_RULE", "id": "R5", "pricing_rule_data": {
                "name": "TAKE5", "discount_id": "D5" } },
            { "type": "PRICING_RULE", "id": "R10", "pricing_rule_data": {
                "name": "Welcome rule", "discount_id": "D10",
                "valid_from_date": "2026-01-01", "valid_until_date": "2026-12-31" } },
            { "type": "PRICING_RULE", "id": "RREMOTE", "pricing_rule_data": {
                "name": "VIP20", "discount_id": "DREMOTE" } }
        ]))
    }

    async fn resolve(server: &MockServer, code: &str, today: &str) -> PromoOutcome {
        let catalog = catalog();
        let refs: Vec<&CatalogObject> = catalog.iter().collect();
        resolve_among(&square_for(server), &refs, code, date(today)).await
    }

    #[tokio::test]
    async fn test_exact_discount_name() {
        let server = MockServer::start().await;
        let outcome = resolve(&server, "WELCOME10", "2026-06-01").await;
        assert_eq!(
            outcome,
            PromoOutcome::Valid {
                code: "WELCOME10".to_string(),
                discount: Discount::Percent(Decimal::new(100, 1)),
            }
        );
    }

    #[tokio::test]
    async fn test_exact_rule_name_uses_rule_discount() {
        let server = MockServer::start().await;
        let outcome = resolve(&server, "TAKE5", "2026-06-01").await;
        assert_eq!(
            outcome,
            PromoOutcome::Valid {
                code: "TAKE5".to_string(),
                discount: Discount::Fixed(grasshopper_core::Cents::new(500)),
            }
        );
    }

    #[tokio::test]
    async fn test_rule_discount_fetched_directly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/catalog/object/DREMOTE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": { "type": "DISCOUNT", "id": "DREMOTE", "discount_data": {
                    "name": "VIP", "discount_type": "FIXED_PERCENTAGE", "percentage": "20" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = resolve(&server, "VIP20", "2026-06-01").await;
        assert_eq!(
            outcome,
            PromoOutcome::Valid {
                code: "VIP20".to_string(),
                discount: Discount::Percent(Decimal::new(20, 0)),
            }
        );
    }

    #[tokio::test]
    async fn test_substring_match_and_free_shipping_name() {
        let server = MockServer::start().await;
        let outcome = resolve(&server, "FREE SHIPPING", "2026-06-01").await;
        assert_eq!(
            outcome,
            PromoOutcome::Valid {
                code: "FREE SHIPPING".to_string(),
                discount: Discount::FreeShipping,
            }
        );
    }

    #[tokio::test]
    async fn test_dates_enforced_through_linked_rule() {
        let server = MockServer::start().await;
        assert_eq!(
            resolve(&server, "WELCOME10", "2025-12-31").await,
            PromoOutcome::Invalid(MSG_NOT_YET_ACTIVE)
        );
        assert_eq!(
            resolve(&server, "WELCOME10", "2027-01-01").await,
            PromoOutcome::Invalid(MSG_EXPIRED)
        );
        assert!(resolve(&server, "WELCOME10", "2026-12-31").await.is_valid());
    }

    #[tokio::test]
    async fn test_unknown_code() {
        let server = MockServer::start().await;
        assert_eq!(
            resolve(&server, "NOPE", "2026-06-01").await,
            PromoOutcome::Invalid(MSG_INVALID)
        );
    }

    #[tokio::test]
    async fn test_empty_and_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/catalog/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let square = square_for(&server);

        assert_eq!(
            resolve_promo_code(&square, "   ").await,
            PromoOutcome::Invalid(MSG_EMPTY)
        );
        assert_eq!(
            resolve_promo_code(&square, "welcome10").await,
            PromoOutcome::Invalid(MSG_UNAVAILABLE)
        );
    }

    #[test]
    fn test_invalid_response_shape() {
        let body = serde_json::to_value(PromoResponse::from(&PromoOutcome::Invalid(MSG_INVALID)))
            .unwrap();
        assert_eq!(body, json!({ "valid": false, "message": "Invalid promo code" }));
    }
}
