//! Integration tests for the product feed function.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-feed-integration-tests
//! ```
//!
//! Contentful is replaced by a `wiremock` server, so no credentials or network
//! access are needed.
//!
//! # Test Categories
//!
//! - `product_feed` - Handler behaviour against mocked Contentful replies
//! - `router` - The HTTP host: paths, headers and request IDs

use std::sync::Arc;

use product_feed_function::config::ContentfulConfig;
use product_feed_function::contentful::ContentfulClient;
use product_feed_function::handler::{ProductFeedHandler, VarLookup};
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// Space ID the tests configure.
pub const SPACE_ID: &str = "np-test-space";

/// Access token the tests configure.
pub const ACCESS_TOKEN: &str = "cfpat-test-8f2a91";

/// Path Contentful serves the test space's GraphQL API on.
#[must_use]
pub fn space_path() -> String {
    format!("/content/v1/spaces/{SPACE_ID}")
}

/// Lookup that provides both credentials.
#[must_use]
pub fn credentials_lookup() -> VarLookup {
    Arc::new(|key: &str| match key {
        "CONTENTFUL_SPACE_ID" => Some(SPACE_ID.to_string()),
        "CONTENTFUL_ACCESS_TOKEN" => Some(ACCESS_TOKEN.to_string()),
        _ => None,
    })
}

/// Lookup that provides only the listed variables from [`credentials_lookup`].
#[must_use]
pub fn partial_credentials_lookup(keep: &'static [&'static str]) -> VarLookup {
    let full = credentials_lookup();
    Arc::new(move |key: &str| {
        if keep.contains(&key) {
            full(key)
        } else {
            None
        }
    })
}

/// Handler whose Contentful client points at `server`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn handler_for(server: &MockServer, lookup: VarLookup) -> ProductFeedHandler {
    let url = Url::parse(&server.uri()).expect("mock server URI is a URL");
    handler_for_url(url, lookup)
}

/// Handler whose Contentful client points at `url`.
#[must_use]
pub fn handler_for_url(url: Url, lookup: VarLookup) -> ProductFeedHandler {
    let client = ContentfulClient::new(ContentfulConfig::with_graphql_url(url));
    ProductFeedHandler::with_lookup(client, lookup)
}

/// A local URL nothing is listening on.
///
/// # Panics
///
/// Panics if no ephemeral port can be bound.
#[must_use]
pub fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("valid URL")
}

/// One upstream product item as Contentful returns it.
#[must_use]
pub fn product_item(id: &str, name: &str, price: f64, description: &str, url: &str) -> Value {
    json!({
        "sys": { "id": id },
        "name": name,
        "price": price,
        "shortDescription": description,
        "image": { "url": url },
    })
}

/// A full upstream reply.
///
/// `hero_urls` of `None` means no site-settings entry is published.
#[must_use]
pub fn upstream_reply(products: Vec<Value>, hero_urls: Option<&[&str]>) -> Value {
    let settings_items = hero_urls.map_or_else(Vec::new, |urls| {
        vec![json!({
            "heroImagesCollection": {
                "items": urls.iter().map(|u| json!({ "url": u })).collect::<Vec<_>>(),
            }
        })]
    });

    json!({
        "data": {
            "productCollection": { "items": products },
            "siteSettingsCollection": { "items": settings_items },
        }
    })
}

/// Three products, newest first, as the tests expect them.
#[must_use]
pub fn sample_products() -> Vec<Value> {
    vec![
        product_item(
            "7Gx1",
            "Coconut Candle",
            24.0,
            "Hand-poured soy wax.",
            "https://images.ctfassets.net/np/candle.jpg?w=800&q=80&fm=webp",
        ),
        product_item(
            "5Kp9",
            "Pineapple Soap",
            12.5,
            "Cold-processed, lightly scented.",
            "https://images.ctfassets.net/np/soap.jpg?w=800&q=80&fm=webp",
        ),
        product_item(
            "2Qa4",
            "Mango Lip Balm",
            6.75,
            "Beeswax and mango butter.",
            "https://images.ctfassets.net/np/balm.jpg?w=800&q=80&fm=webp",
        ),
    ]
}
