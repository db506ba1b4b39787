//! Contentful GraphQL Content Delivery API client.
//!
//! # Architecture
//!
//! - One fixed query (`graphql/product_feed.graphql`) fetches products and
//!   site settings in a single round trip
//! - `graphql_client` provides the request and response envelopes; the
//!   response types are written by hand because the schema is per-space
//! - Contentful is the source of truth - no caching, no retries
//!
//! # Example
//!
//! ```rust,ignore
//! use product_feed_function::contentful::ContentfulClient;
//!
//! let client = ContentfulClient::new(config.contentful.clone());
//! let credentials = ContentfulCredentials::from_lookup(|key| std::env::var(key).ok())?;
//!
//! let feed = client.fetch_product_feed(&credentials).await?;
//! ```

mod client;
mod conversions;
pub mod queries;

pub use client::ContentfulClient;

use core::fmt;

use thiserror::Error;

/// Errors that can occur when talking to Contentful.
#[derive(Debug, Error)]
pub enum ContentfulError {
    /// HTTP request failed before a status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Contentful answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status returned by Contentful.
        status: reqwest::StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// GraphQL query returned errors and no data.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field the feed depends on was absent.
    #[error("Response is missing {0}")]
    MissingData(&'static str),

    /// The space ID could not be turned into an endpoint URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// A GraphQL error returned by the Contentful API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Dotted path to the failing field, e.g. `productCollection.items.2.image`.
    pub path: Option<String>,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            path: e.path.map(|fragments| {
                fragments
                    .into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(key) => key,
                        graphql_client::PathFragment::Index(i) => i.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".")
            }),
        }
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

pub(crate) fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
