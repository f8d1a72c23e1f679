//! Cart to payment over HTTP: shipping quote, promo check, and a pickup
//! order paid by card.

use grasshopper_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_catalog(server: &MockServer) {
    for object in [
        json!({ "type": "ITEM_VARIATION", "id": "VAR1", "item_variation_data": {
            "item_id": "ITEM1", "name": "Regular",
            "price_money": { "amount": 3000, "currency": "USD" } } }),
        json!({ "type": "ITEM", "id": "ITEM1", "item_data": { "name": "Mystery Serum" } }),
    ] {
        let id = object["id"].as_str().unwrap_or_default().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/v2/catalog/object/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": object })))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/v2/locations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "locations": [{ "id": "LOC1" }] })),
        )
        .mount(server)
        .await;
}

async fn post(ctx: &TestContext, path: &str, body: &Value) -> (StatusCode, Value) {
    let response = ctx
        .client
        .post(ctx.url(path))
        .json(body)
        .send()
        .await
        .expect("request failed");
    let status = response.status();
    (status, response.json().await.expect("JSON body"))
}

#[tokio::test]
async fn test_shipping_quote_flat_and_ups() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;

    // Unknown products ship at the 7.50 default per unit.
    let (status, body) = post(
        &ctx,
        "/api/calculate-shipping",
        &json!({ "items": [{ "variationId": "VAR1", "quantity": 2 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shippingAmount": 1500 }));

    // Two pounds to NC (zone 2): 8.50 + 0.40 * 2.
    let (status, body) = post(
        &ctx,
        "/api/calculate-shipping",
        &json!({ "items": [{ "variationId": "VAR1", "quantity": 2 }], "state": "NC" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shippingAmount": 930, "totalWeightLbs": 2.0 }));

    let (status, body) = post(&ctx, "/api/calculate-shipping", &json!({ "items": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No items provided" }));
}

#[tokio::test]
async fn test_validate_promo() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/catalog/search"))
        .and(header("Square-Version", "2024-11-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "type": "DISCOUNT", "id": "D10", "discount_data": {
                    "name": "WELCOME10", "discount_type": "FIXED_PERCENTAGE", "percentage": "10.0" } }
            ]
        })))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = post(&ctx, "/api/validate-promo", &json!({ "code": " welcome10 " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["code"], "WELCOME10");
    assert_eq!(body["type"], "percent");
    assert_eq!(body["value"], 10);
    assert_eq!(body["freeShipping"], false);

    let (status, body) = post(&ctx, "/api/validate-promo", &json!({ "code": "NOPE" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false, "message": "Invalid promo code" }));

    let (status, body) = post(&ctx, "/api/validate-promo", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "valid": false, "message": "Please enter a promo code" })
    );
}

#[tokio::test]
async fn test_pickup_payment_end_to_end() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;

    // Sale price 24.00, NC tax 1.74, no shipping for pickup.
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(json!({
            "idempotency_key": "order-pickup-e2e-1",
            "order": {
                "location_id": "LOC1",
                "line_items": [{
                    "name": "Mystery Serum - Regular",
                    "quantity": "1",
                    "base_price_money": { "amount": 2400, "currency": "USD" }
                }],
                "service_charges": [
                    { "name": "NC Sales Tax (7.25%)", "amount_money": { "amount": 174 } }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": "ORDER-E2E", "total_money": { "amount": 2574, "currency": "USD" } }
        })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/payments"))
        .and(body_partial_json(json!({
            "idempotency_key": "pay-pickup-e2e-1",
            "source_id": "cnon:card-nonce-ok",
            "amount_money": { "amount": 2574, "currency": "USD" },
            "order_id": "ORDER-E2E"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": { "id": "PAY-E2E", "status": "COMPLETED", "receipt_url": "https://squareup.com/receipt/preview/PAY-E2E" }
        })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let (status, body) = post(
        &ctx,
        "/api/process-payment",
        &json!({
            "sourceId": "cnon:card-nonce-ok",
            "orderType": "pickup",
            "items": [{ "variationId": "VAR1", "quantity": 1, "name": "Tampered", "price": 0.01 }],
            "phone": "(704) 555-0100",
            "idempotencyKey": "e2e-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "paymentId": "PAY-E2E",
            "orderId": "ORDER-E2E",
            "receiptUrl": "https://squareup.com/receipt/preview/PAY-E2E"
        })
    );
}

#[tokio::test]
async fn test_declined_card_surfaces_square_detail() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": "ORDER-D", "total_money": { "amount": 2574, "currency": "USD" } }
        })))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/payments"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "errors": [{ "category": "PAYMENT_METHOD_ERROR", "code": "CARD_DECLINED", "detail": "Card declined." }]
        })))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = post(
        &ctx,
        "/api/process-payment",
        &json!({
            "sourceId": "cnon:card-nonce-declined",
            "orderType": "pickup",
            "items": [{ "variationId": "VAR1", "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Card declined." }));
}

#[tokio::test]
async fn test_checkout_link() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;
    Mock::given(method("POST"))
        .and(path("/v2/online-checkout/payment-links"))
        .and(body_partial_json(json!({
            "order": {
                "location_id": "LOC1",
                "line_items": [{ "catalog_object_id": "VAR1", "quantity": "3" }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_link": { "id": "PL1", "url": "https://square.link/u/abc123" }
        })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let (status, body) = post(
        &ctx,
        "/api/checkout",
        &json!({ "items": [{ "variationId": "VAR1", "quantity": 3 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "checkoutUrl": "https://square.link/u/abc123" }));
}
