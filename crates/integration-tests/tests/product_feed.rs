//! Integration tests for the product feed handler.
//!
//! Each test starts a mock Contentful server and invokes the handler against
//! it, asserting on the `{ statusCode, body }` result.

use product_feed_core::{ErrorBody, ProductFeed, SiteSettings};
use product_feed_integration_tests::{
    ACCESS_TOKEN, closed_port_url, credentials_lookup, handler_for, handler_for_url,
    partial_credentials_lookup, product_item, sample_products, space_path, upstream_reply,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREDENTIALS_MISSING: &str = "Contentful credentials are not set in the environment.";
const UPSTREAM_FAILURE: &str = "Failed to fetch data from Contentful.";

async fn mount_reply(server: &MockServer, reply: Value) {
    Mock::given(method("POST"))
        .and(path(space_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(server)
        .await;
}

fn decode_feed(body: &str) -> ProductFeed {
    serde_json::from_str(body).expect("body is a product feed")
}

fn decode_error(body: &str) -> ErrorBody {
    serde_json::from_str(body).expect("body is an error")
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_missing_credentials_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for lookup in [
        partial_credentials_lookup(&[]),
        partial_credentials_lookup(&["CONTENTFUL_SPACE_ID"]),
        partial_credentials_lookup(&["CONTENTFUL_ACCESS_TOKEN"]),
    ] {
        let response = handler_for(&server, lookup).invoke().await;

        assert_eq!(response.status_code, 500);
        assert_eq!(decode_error(&response.body), ErrorBody::new(CREDENTIALS_MISSING));
    }

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "no request should reach Contentful");
}

// =============================================================================
// Outbound request
// =============================================================================

#[tokio::test]
async fn test_request_is_authenticated_post_to_space() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(space_path()))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "operationName": "ProductFeed",
            "variables": {
                "productImage": { "width": 800, "quality": 80, "format": "WEBP" },
                "heroImage": { "width": 1920, "quality": 80, "format": "WEBP" },
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_reply(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_request_carries_fixed_query() {
    let server = MockServer::start().await;
    mount_reply(&server, upstream_reply(vec![], None)).await;

    handler_for(&server, credentials_lookup()).invoke().await;

    let requests = server.received_requests().await.expect("recording enabled");
    let request = requests.first().expect("one request");
    let body: Value = serde_json::from_slice(&request.body).expect("JSON body");
    let query = body["query"].as_str().expect("query string");

    assert!(query.contains("productCollection(order: sys_publishedAt_DESC)"));
    assert!(query.contains("siteSettingsCollection(limit: 1)"));
    assert!(query.contains("shortDescription"));
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_products_returned_in_upstream_order() {
    let server = MockServer::start().await;
    mount_reply(&server, upstream_reply(sample_products(), None)).await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 200);
    let feed = decode_feed(&response.body);
    assert_eq!(feed.products.len(), 3);

    let ids: Vec<&str> = feed.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["7Gx1", "5Kp9", "2Qa4"]);

    let soap = feed.products.get(1).expect("second product");
    assert_eq!(soap.name, "Pineapple Soap");
    assert!((soap.price - 12.5).abs() < f64::EPSILON);
    assert_eq!(soap.short_description, "Cold-processed, lightly scented.");
    assert_eq!(
        soap.image_url,
        "https://images.ctfassets.net/np/soap.jpg?w=800&q=80&fm=webp"
    );
}

#[tokio::test]
async fn test_body_uses_website_field_names() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        upstream_reply(
            vec![product_item("a1", "Candle", 10.0, "Warm.", "https://img/a1")],
            Some(["https://img/hero"].as_slice()),
        ),
    )
    .await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;
    let body: Value = serde_json::from_str(&response.body).expect("JSON body");

    assert_eq!(
        body,
        json!({
            "products": [{
                "id": "a1",
                "name": "Candle",
                "price": 10.0,
                "shortDescription": "Warm.",
                "imageUrl": "https://img/a1",
            }],
            "siteSettings": { "heroImages": ["https://img/hero"] },
        })
    );
}

#[tokio::test]
async fn test_hero_images_keep_order() {
    let server = MockServer::start().await;
    let heroes = ["https://img/hero-3", "https://img/hero-1", "https://img/hero-2"];
    mount_reply(&server, upstream_reply(vec![], Some(heroes.as_slice()))).await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;
    let feed = decode_feed(&response.body);

    assert_eq!(
        feed.site_settings.hero_images,
        Some(heroes.iter().map(ToString::to_string).collect())
    );
}

#[tokio::test]
async fn test_missing_site_settings_becomes_empty_object() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        json!({ "data": { "productCollection": { "items": [] }, "siteSettingsCollection": { "items": [] } } }),
    )
    .await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"products":[],"siteSettings":{}}"#);
    assert_eq!(decode_feed(&response.body).site_settings, SiteSettings::default());
}

#[tokio::test]
async fn test_partial_data_with_graphql_errors_is_served() {
    let server = MockServer::start().await;
    let mut reply = upstream_reply(sample_products(), None);
    reply["errors"] = json!([{
        "message": "Link to entry 'abc' on field 'image' within type 'Product' cannot be resolved",
        "path": ["productCollection", "items", 1, "image"],
        "extensions": { "contentful": { "code": "UNRESOLVABLE_LINK" } },
    }]);
    mount_reply(&server, reply).await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 200);
    let feed = decode_feed(&response.body);
    let ids: Vec<&str> = feed.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["7Gx1", "5Kp9", "2Qa4"]);
}

#[tokio::test]
async fn test_unresolved_image_link_becomes_empty_url() {
    let server = MockServer::start().await;
    let mut unlinked = product_item("9Zz0", "Guava Scrub", 18.0, "Sugar and guava.", "");
    unlinked["image"] = Value::Null;
    let mut reply = upstream_reply(vec![unlinked], None);
    reply["errors"] = json!([{
        "message": "Link to asset 'img9' on field 'image' within type 'Product' cannot be resolved",
        "path": ["productCollection", "items", 0, "image"],
        "extensions": { "contentful": { "code": "UNRESOLVABLE_LINK" } },
    }]);
    mount_reply(&server, reply).await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 200);
    let feed = decode_feed(&response.body);
    let scrub = feed.products.first().expect("one product");
    assert_eq!(scrub.name, "Guava Scrub");
    assert_eq!(scrub.image_url, "");
}

#[tokio::test]
async fn test_repeated_invocations_are_byte_identical() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        upstream_reply(sample_products(), Some(["https://img/hero"].as_slice())),
    )
    .await;

    let handler = handler_for(&server, credentials_lookup());
    let first = handler.invoke().await;
    let second = handler.invoke().await;

    assert_eq!(first.status_code, 200);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_body_round_trips_losslessly() {
    let server = MockServer::start().await;
    mount_reply(&server, upstream_reply(sample_products(), None)).await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;
    let feed = decode_feed(&response.body);
    let reencoded = serde_json::to_string(&feed).expect("encodes");

    assert_eq!(reencoded, response.body);
}

// =============================================================================
// Upstream failures
// =============================================================================

async fn assert_generic_failure(template: ResponseTemplate) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(space_path()))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 500);
    assert_eq!(decode_error(&response.body), ErrorBody::new(UPSTREAM_FAILURE));
}

#[tokio::test]
async fn test_non_success_status_is_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(space_path()))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"message":"The access token you sent could not be found"}"#),
        )
        .mount(&server)
        .await;

    let response = handler_for(&server, credentials_lookup()).invoke().await;

    assert_eq!(response.status_code, 500);
    assert_eq!(decode_error(&response.body), ErrorBody::new(UPSTREAM_FAILURE));
    assert!(!response.body.contains("Unauthorized"));
    assert!(!response.body.contains("access token"));
}

#[tokio::test]
async fn test_server_error_is_generic_error() {
    assert_generic_failure(ResponseTemplate::new(503).set_body_string("upstream down")).await;
}

#[tokio::test]
async fn test_malformed_json_is_generic_error() {
    assert_generic_failure(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;
}

#[tokio::test]
async fn test_graphql_errors_without_data_are_generic_error() {
    assert_generic_failure(ResponseTemplate::new(200).set_body_json(json!({
        "data": null,
        "errors": [{
            "message": "Query cannot be executed. The maximum allowed complexity for a query is 11000",
            "extensions": { "contentful": { "code": "TOO_COMPLEX_QUERY" } },
        }],
    })))
    .await;
}

#[tokio::test]
async fn test_missing_product_collection_is_generic_error() {
    assert_generic_failure(
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "productCollection": null } })),
    )
    .await;
}

#[tokio::test]
async fn test_unreachable_upstream_is_generic_error() {
    let handler = handler_for_url(closed_port_url(), credentials_lookup());

    let response = handler.invoke().await;

    assert_eq!(response.status_code, 500);
    assert_eq!(decode_error(&response.body), ErrorBody::new(UPSTREAM_FAILURE));
}
