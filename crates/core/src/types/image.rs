//! Image transform parameters for Contentful asset URLs.
//!
//! Contentful applies transforms server-side; these types only describe the
//! request. They serialize to the `ImageTransformOptions` GraphQL input type.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum width or height Contentful accepts, in pixels.
pub const MAX_DIMENSION: u32 = 4000;

/// Maximum JPEG/WebP quality.
pub const MAX_QUALITY: u8 = 100;

/// Errors that can occur when parsing an [`ImageFormat`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown image format '{0}' (expected one of jpg, jpg_progressive, png, png8, webp, avif)")]
pub struct ParseImageFormatError(pub String);

/// Errors from validating an [`ImageTransform`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageTransformError {
    /// Width is zero or above [`MAX_DIMENSION`].
    #[error("width must be between 1 and {max} (got {0})", max = MAX_DIMENSION)]
    Width(u32),
    /// Height is zero or above [`MAX_DIMENSION`].
    #[error("height must be between 1 and {max} (got {0})", max = MAX_DIMENSION)]
    Height(u32),
    /// Quality is zero or above [`MAX_QUALITY`].
    #[error("quality must be between 1 and {max} (got {0})", max = MAX_QUALITY)]
    Quality(u8),
}

/// Output format Contentful should convert the asset to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageFormat {
    Jpg,
    JpgProgressive,
    Png,
    Png8,
    Webp,
    Avif,
}

impl ImageFormat {
    /// The GraphQL enum value for this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "JPG",
            Self::JpgProgressive => "JPG_PROGRESSIVE",
            Self::Png => "PNG",
            Self::Png8 => "PNG8",
            Self::Webp => "WEBP",
            Self::Avif => "AVIF",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses case-insensitively; `-` is accepted in place of `_`.
///
/// ```
/// use product_feed_core::ImageFormat;
///
/// assert_eq!("webp".parse::<ImageFormat>(), Ok(ImageFormat::Webp));
/// assert_eq!(
///     "jpg-progressive".parse::<ImageFormat>(),
///     Ok(ImageFormat::JpgProgressive)
/// );
/// assert!("gif".parse::<ImageFormat>().is_err());
/// ```
impl FromStr for ImageFormat {
    type Err = ParseImageFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "JPG" | "JPEG" => Ok(Self::Jpg),
            "JPG_PROGRESSIVE" => Ok(Self::JpgProgressive),
            "PNG" => Ok(Self::Png),
            "PNG8" => Ok(Self::Png8),
            "WEBP" => Ok(Self::Webp),
            "AVIF" => Ok(Self::Avif),
            _ => Err(ParseImageFormatError(s.to_string())),
        }
    }
}

/// Resize and re-encode parameters applied to an asset URL.
///
/// All fields are optional; an all-`None` transform leaves the URL untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTransform {
    /// Target width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Target height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Compression quality, 1-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
}

impl ImageTransform {
    /// Returns `true` when no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.quality.is_none()
            && self.format.is_none()
    }

    /// Check every set parameter is within the range Contentful accepts.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), ImageTransformError> {
        if let Some(width) = self.width
            && !(1..=MAX_DIMENSION).contains(&width)
        {
            return Err(ImageTransformError::Width(width));
        }
        if let Some(height) = self.height
            && !(1..=MAX_DIMENSION).contains(&height)
        {
            return Err(ImageTransformError::Height(height));
        }
        if let Some(quality) = self.quality
            && !(1..=MAX_QUALITY).contains(&quality)
        {
            return Err(ImageTransformError::Quality(quality));
        }
        Ok(())
    }
}
