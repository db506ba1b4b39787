//! GraphQL query definitions for the Contentful Content Delivery API.
//!
//! Contentful generates a schema per space, so there is no schema file to
//! feed the `GraphQLQuery` derive. The query text lives in
//! `graphql/product_feed.graphql` and the trait is implemented by hand with
//! response types mirroring what the derive would produce.

use graphql_client::{GraphQLQuery, QueryBody};
use product_feed_core::ImageTransform;

/// Products (newest published first) plus the single site-settings entry.
pub struct ProductFeed;

/// Query text sent to Contentful.
pub const PRODUCT_FEED_QUERY: &str = include_str!("../../graphql/product_feed.graphql");

/// Operation name declared in [`PRODUCT_FEED_QUERY`].
pub const PRODUCT_FEED_OPERATION: &str = "ProductFeed";

impl GraphQLQuery for ProductFeed {
    type Variables = product_feed::Variables;
    type ResponseData = product_feed::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PRODUCT_FEED_QUERY,
            operation_name: PRODUCT_FEED_OPERATION,
        }
    }
}

pub mod product_feed {
    use serde::{Deserialize, Serialize};

    use super::ImageTransform;

    #[derive(Debug, Clone, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        /// `null` leaves product image URLs untransformed.
        pub product_image: Option<ImageTransform>,
        /// `null` leaves hero image URLs untransformed.
        pub hero_image: Option<ImageTransform>,
    }

    impl Variables {
        /// Build variables, sending `null` for transforms with no parameters set.
        #[must_use]
        pub fn new(product_image: ImageTransform, hero_image: ImageTransform) -> Self {
            Self {
                product_image: (!product_image.is_empty()).then_some(product_image),
                hero_image: (!hero_image.is_empty()).then_some(hero_image),
            }
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_collection: Option<ProductFeedProductCollection>,
        #[serde(default)]
        pub site_settings_collection: Option<ProductFeedSiteSettingsCollection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductFeedProductCollection {
        pub items: Vec<Option<ProductFeedProductCollectionItems>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductFeedProductCollectionItems {
        pub sys: Sys,
        pub name: Option<String>,
        pub price: Option<f64>,
        pub short_description: Option<String>,
        pub image: Option<AssetFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Sys {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AssetFields {
        pub url: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductFeedSiteSettingsCollection {
        pub items: Vec<Option<ProductFeedSiteSettingsCollectionItems>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductFeedSiteSettingsCollectionItems {
        pub hero_images_collection: Option<ProductFeedHeroImagesCollection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductFeedHeroImagesCollection {
        pub items: Vec<Option<AssetFields>>,
    }
}
