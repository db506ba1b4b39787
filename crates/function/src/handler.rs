//! The product feed function.
//!
//! One invocation reads the Contentful credentials, runs the feed query and
//! returns `{ statusCode, body }` with a JSON-encoded body:
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Success | 200 | `{"products":[...],"siteSettings":{...}}` |
//! | Credentials missing | 500 | `{"error":"Contentful credentials are not set in the environment."}` |
//! | Any upstream failure | 500 | `{"error":"Failed to fetch data from Contentful."}` |

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use product_feed_core::{ErrorBody, ProductFeed};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{ContentfulCredentials, env_lookup};
use crate::contentful::ContentfulClient;
use crate::error::{FeedError, Result, UPSTREAM_FAILURE_MESSAGE};

/// Looks up a configuration variable by name.
pub type VarLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// HTTP-shaped result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON-encoded body.
    pub body: String,
}

impl FunctionResponse {
    /// Serialize `value` as the body of a response with `status_code`.
    #[must_use]
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status_code, body },
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode response body");
                Self::error(UPSTREAM_FAILURE_MESSAGE)
            }
        }
    }

    /// A 500 response with `{ "error": message }`.
    #[must_use]
    pub fn error(message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self {
            status_code: 500,
            body,
        }
    }

    /// Decode the body as an error, if it is one.
    #[must_use]
    pub fn error_body(&self) -> Option<ErrorBody> {
        serde_json::from_str(&self.body).ok()
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.body,
        )
            .into_response()
    }
}

/// Serves the product feed.
///
/// Cheap to clone. Credentials are looked up on every invocation; everything
/// else is fixed at construction.
#[derive(Clone)]
pub struct ProductFeedHandler {
    client: ContentfulClient,
    lookup: VarLookup,
}

impl ProductFeedHandler {
    /// Handler reading credentials from the process environment.
    #[must_use]
    pub fn new(client: ContentfulClient) -> Self {
        Self::with_lookup(client, Arc::new(env_lookup))
    }

    /// Handler reading credentials through `lookup`.
    #[must_use]
    pub fn with_lookup(client: ContentfulClient, lookup: VarLookup) -> Self {
        Self { client, lookup }
    }

    /// Run one invocation. Never fails; errors become 500 responses.
    #[instrument(skip(self))]
    pub async fn invoke(&self) -> FunctionResponse {
        match self.fetch().await {
            Ok(feed) => {
                tracing::info!(products = feed.products.len(), "Served product feed");
                FunctionResponse::json(200, &feed)
            }
            Err(err) => err.into(),
        }
    }

    async fn fetch(&self) -> Result<ProductFeed> {
        let lookup = &self.lookup;
        let credentials = ContentfulCredentials::from_lookup(|key| lookup(key))?;

        self.client
            .fetch_product_feed(&credentials)
            .await
            .map_err(FeedError::from)
    }
}
