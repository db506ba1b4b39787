//! Contentful GraphQL client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP.

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use product_feed_core::ProductFeed;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{ContentfulConfig, ContentfulCredentials};

use super::conversions::convert_product_feed;
use super::queries::{self, product_feed};
use super::{ContentfulError, GraphQLError, format_graphql_errors};

/// Longest slice of an upstream body kept in logs and errors.
const MAX_LOGGED_BODY: usize = 500;

/// Client for the Contentful GraphQL Content Delivery API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ContentfulClient {
    inner: Arc<ContentfulClientInner>,
}

struct ContentfulClientInner {
    client: reqwest::Client,
    config: ContentfulConfig,
}

impl ContentfulClient {
    /// Create a new Contentful client.
    #[must_use]
    pub fn new(config: ContentfulConfig) -> Self {
        Self {
            inner: Arc::new(ContentfulClientInner {
                client: reqwest::Client::new(),
                config,
            }),
        }
    }

    /// GraphQL endpoint for a space: `{graphql_url}/content/v1/spaces/{space_id}`.
    ///
    /// # Errors
    ///
    /// Returns `ContentfulError::InvalidEndpoint` if the configured URL cannot
    /// take a path.
    pub fn endpoint(&self, space_id: &str) -> Result<Url, ContentfulError> {
        let mut url = self.inner.config.graphql_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ContentfulError::InvalidEndpoint(self.inner.config.graphql_url.to_string())
            })?
            .pop_if_empty()
            .extend(["content", "v1", "spaces", space_id]);
        Ok(url)
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        credentials: &ContentfulCredentials,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ContentfulError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);
        let endpoint = self.endpoint(&credentials.space_id)?;

        let response = self
            .inner
            .client
            .post(endpoint)
            .header(reqwest::header::AUTHORIZATION, credentials.bearer())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = truncate(&response_text);
            tracing::error!(
                status = %status,
                body = %body,
                "Contentful API returned non-success status"
            );
            return Err(ContentfulError::Status { status, body });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&response_text),
                    "Failed to parse Contentful GraphQL response"
                );
                return Err(ContentfulError::Parse(e));
            }
        };

        let errors: Vec<GraphQLError> = response
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(GraphQLError::from)
            .collect();

        match response.data {
            Some(data) => {
                // Contentful reports unresolvable links alongside the rest of the data
                if !errors.is_empty() {
                    tracing::warn!(
                        errors = %format_graphql_errors(&errors),
                        "Contentful returned partial data with GraphQL errors"
                    );
                }
                Ok(data)
            }
            None if !errors.is_empty() => {
                debug!(errors = ?errors, "GraphQL errors in response");
                Err(ContentfulError::GraphQL(errors))
            }
            None => {
                tracing::error!(
                    body = %truncate(&response_text),
                    "Contentful GraphQL response has no data and no errors"
                );
                Err(ContentfulError::MissingData("data"))
            }
        }
    }

    /// Fetch products (newest published first) and site settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Contentful answers with a
    /// non-success status, or the body lacks `data.productCollection`.
    /// GraphQL errors next to usable data are only logged.
    #[instrument(skip(self, credentials), fields(space_id = %credentials.space_id))]
    pub async fn fetch_product_feed(
        &self,
        credentials: &ContentfulCredentials,
    ) -> Result<ProductFeed, ContentfulError> {
        let config = &self.inner.config;
        let variables = product_feed::Variables::new(config.product_image, config.hero_image);

        let data = self
            .execute::<queries::ProductFeed>(credentials, variables)
            .await?;

        let feed = convert_product_feed(data)?;
        debug!(
            products = feed.products.len(),
            hero_images = feed.site_settings.hero_images.as_ref().map_or(0, Vec::len),
            "Fetched product feed"
        );

        Ok(feed)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_LOGGED_BODY).collect()
}
