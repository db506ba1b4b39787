//! Product listing entry.

use serde::{Deserialize, Serialize};

/// A product as served to the website.
///
/// Field names serialize in camelCase (`shortDescription`, `imageUrl`) to
/// match what the front-end reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Contentful entry ID (`sys.id`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in the store's currency.
    pub price: f64,
    /// One or two sentence summary shown on listing cards.
    pub short_description: String,
    /// Asset URL, already carrying any transform parameters.
    pub image_url: String,
}
