//! Site-wide settings.

use serde::{Deserialize, Serialize};

/// Settings that apply to the whole site rather than a single product.
///
/// When Contentful has no settings entry this is the empty object `{}`, which
/// is what [`SiteSettings::default`] serializes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Hero image URLs in the order the editor arranged them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_images: Option<Vec<String>>,
}
