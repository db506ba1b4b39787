//! Unified error handling with Sentry integration.
//!
//! Every failure of an invocation ends up as a `FeedError`, which logs the
//! detail for operators and renders a `FunctionResponse` that carries only a
//! fixed message.

use thiserror::Error;

use crate::config::ConfigError;
use crate::contentful::ContentfulError;
use crate::handler::FunctionResponse;

/// Returned to the caller when the credentials are not configured.
pub const CREDENTIALS_MISSING_MESSAGE: &str =
    "Contentful credentials are not set in the environment.";

/// Returned to the caller for every upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data from Contentful.";

/// Invocation-level error type for the function.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Credentials are missing; detected before any network call.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Contentful could not be reached or answered with something unusable.
    #[error("Contentful error: {0}")]
    Contentful(#[from] ContentfulError),
}

impl FeedError {
    /// Message safe to show the caller.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Config(_) => CREDENTIALS_MISSING_MESSAGE,
            Self::Contentful(_) => UPSTREAM_FAILURE_MESSAGE,
        }
    }
}

impl From<FeedError> for FunctionResponse {
    fn from(err: FeedError) -> Self {
        match &err {
            FeedError::Config(_) => {
                tracing::error!(error = %err, "Contentful credentials are not configured");
            }
            FeedError::Contentful(_) => {
                let event_id = sentry::capture_error(&err);
                tracing::error!(
                    error = %err,
                    sentry_event_id = %event_id,
                    "Error fetching from Contentful"
                );
            }
        }

        Self::error(err.public_message())
    }
}

/// Result type alias for `FeedError`.
pub type Result<T> = std::result::Result<T, FeedError>;
