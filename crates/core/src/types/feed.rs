//! Response bodies returned by the function.

use serde::{Deserialize, Serialize};

use super::{Product, SiteSettings};

/// Successful response body: products plus site settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFeed {
    /// Products, newest published first.
    pub products: Vec<Product>,
    /// Site-wide settings, `{}` when none are published.
    pub site_settings: SiteSettings,
}

/// Error response body: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message. Never contains upstream detail.
    pub error: String,
}

impl ErrorBody {
    /// Create an error body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
