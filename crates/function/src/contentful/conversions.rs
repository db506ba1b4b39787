//! Conversions from Contentful response types to the feed served to the website.

use product_feed_core::{Product, ProductFeed, SiteSettings};

use super::ContentfulError;
use super::queries::product_feed;

/// Reshape the query response into the feed.
///
/// `productCollection` is required; a missing site-settings entry becomes
/// `SiteSettings::default()` (serialized as `{}`).
pub fn convert_product_feed(
    data: product_feed::ResponseData,
) -> Result<ProductFeed, ContentfulError> {
    let products = data
        .product_collection
        .ok_or(ContentfulError::MissingData("data.productCollection"))?
        .items
        .into_iter()
        .flatten()
        .map(convert_product)
        .collect();

    let site_settings = data
        .site_settings_collection
        .and_then(|collection| collection.items.into_iter().next().flatten())
        .map(convert_site_settings)
        .unwrap_or_default();

    Ok(ProductFeed {
        products,
        site_settings,
    })
}

pub fn convert_product(item: product_feed::ProductFeedProductCollectionItems) -> Product {
    Product {
        id: item.sys.id,
        name: item.name.unwrap_or_default(),
        price: item.price.unwrap_or_default(),
        short_description: item.short_description.unwrap_or_default(),
        image_url: item.image.and_then(|i| i.url).unwrap_or_default(),
    }
}

fn convert_site_settings(
    item: product_feed::ProductFeedSiteSettingsCollectionItems,
) -> SiteSettings {
    SiteSettings {
        hero_images: Some(
            item.hero_images_collection
                .map(|c| c.items.into_iter().flatten().filter_map(|a| a.url).collect())
                .unwrap_or_default(),
        ),
    }
}
