//! Photo analysis over HTTP with Square's catalog and Claude both mocked.

use grasshopper_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PHOTO: &str = "data:image/png;base64,iVBORw0KGgo=";

fn item(id: &str, name: &str, cents: i64) -> Value {
    json!({
        "type": "ITEM",
        "id": id,
        "item_data": {
            "name": name,
            "description": format!("{name} for everyday care."),
            "variations": [{
                "type": "ITEM_VARIATION",
                "id": format!("{id}-V"),
                "item_variation_data": {
                    "item_id": id,
                    "name": "Regular",
                    "price_money": { "amount": cents, "currency": "USD" }
                }
            }]
        }
    })
}

async fn mount_catalog(server: &MockServer) {
    let listings = [
        (
            "ITEM",
            json!([
                item("OLA3", "Olaplex No. 3 Hair Perfector", 3000),
                item("DOUX1", "The Doux Mousse Def Texture Foam", 1600),
                item("CREW1", "American Crew Fiber", 2400),
            ]),
        ),
        ("IMAGE", json!([])),
        ("CATEGORY", json!([])),
    ];
    for (kind, objects) in listings {
        Mock::given(method("GET"))
            .and(path("/v2/catalog/list"))
            .and(query_param("types", kind))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": objects })))
            .mount(server)
            .await;
    }
}

fn claude_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "msg_e2e",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "content": [{ "type": "text", "text": text }],
        "usage": { "input_tokens": 2100, "output_tokens": 420 }
    }))
}

async fn analyze(ctx: &TestContext, body: &Value) -> (StatusCode, Value) {
    let response = ctx
        .client
        .post(ctx.url("/api/hair-analysis"))
        .json(body)
        .send()
        .await
        .expect("request failed");
    let status = response.status();
    (status, response.json().await.expect("JSON body"))
}

#[tokio::test]
async fn test_recommendations_only_name_offered_products() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;

    let reply = r#"```json
{
  "analysis": { "hairType": "2C wavy", "hairColor": "Dimensional caramel balayage", "condition": "Dry ends" },
  "recommendedProductIds": [
    { "id": "OLA3", "reason": "Rebuilds broken bonds in your lightened ends." },
    { "id": "CREW1", "reason": "Men's styling fiber." },
    { "id": "MADE-UP", "reason": "Not in the catalog." }
  ]
}
```"#;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-integration"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-5-20250929",
            "max_tokens": 1500,
            "messages": [{
                "role": "user",
                "content": [{
                    "type": "image",
                    "source": { "type": "base64", "media_type": "image/png", "data": "iVBORw0KGgo=" }
                }]
            }]
        })))
        .respond_with(claude_reply(reply))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let (status, body) = analyze(&ctx, &json!({ "image": PHOTO })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["hairType"], "2C wavy");

    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["product"]["id"], "OLA3");
    assert_eq!(recommendations[0]["product"]["brand"], "Olaplex");
    assert_eq!(
        recommendations[0]["reason"],
        "Rebuilds broken bonds in your lightened ends. Great add-to-cart pick to start seeing results this week."
    );
}

#[tokio::test]
async fn test_doux_focus_falls_back_to_doux_products() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(claude_reply(
            r#"{ "analysis": { "hairType": "4C coily" }, "recommendedProductIds": [] }"#,
        ))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = analyze(&ctx, &json!({ "image": PHOTO, "douxFocus": true })).await;
    assert_eq!(status, StatusCode::OK);
    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["product"]["id"], "DOUX1");
    assert_eq!(recommendations[0]["product"]["brand"], "The Doux");
}

#[tokio::test]
async fn test_upstream_failures_are_502() {
    let ctx = TestContext::start().await;
    mount_catalog(&ctx.upstream).await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": { "type": "overloaded_error", "message": "Overloaded" }
        })))
        .up_to_n_times(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(claude_reply("Sorry, I can't tell from this photo."))
        .mount(&ctx.upstream)
        .await;

    let (status, body) = analyze(&ctx, &json!({ "image": PHOTO })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "AI analysis failed. Please try again." }));

    let (status, body) = analyze(&ctx, &json!({ "image": PHOTO })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "error": "Failed to parse AI analysis. Please try again." })
    );
}
