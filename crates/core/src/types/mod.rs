//! Core types for the product feed.
//!
//! Every type here serializes to the exact JSON the website consumes.

pub mod feed;
pub mod image;
pub mod product;
pub mod site_settings;

pub use feed::{ErrorBody, ProductFeed};
pub use image::{ImageFormat, ImageTransform, ImageTransformError, ParseImageFormatError};
pub use product::Product;
pub use site_settings::SiteSettings;
