//! Function configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Read on every invocation
//! - `CONTENTFUL_SPACE_ID` - Contentful space identifier
//! - `CONTENTFUL_ACCESS_TOKEN` - Content Delivery API access token
//!
//! ## Read at startup (all optional)
//! - `FUNCTION_HOST` - Bind address (default: 127.0.0.1)
//! - `FUNCTION_PORT` - Listen port (default: 9999)
//! - `CONTENTFUL_GRAPHQL_URL` - GraphQL API origin (default: <https://graphql.contentful.com>)
//! - `PRODUCT_IMAGE_WIDTH` / `_HEIGHT` / `_QUALITY` / `_FORMAT` - Product image
//!   transform (default: width 800, quality 80, WEBP)
//! - `HERO_IMAGE_WIDTH` / `_HEIGHT` / `_QUALITY` / `_FORMAT` - Hero image
//!   transform (default: width 1920, quality 80, WEBP)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! Any transform variable set to `none` disables that parameter.

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use product_feed_core::{ImageFormat, ImageTransform};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Environment variable holding the Contentful space ID.
pub const SPACE_ID_VAR: &str = "CONTENTFUL_SPACE_ID";

/// Environment variable holding the Contentful access token.
pub const ACCESS_TOKEN_VAR: &str = "CONTENTFUL_ACCESS_TOKEN";

/// Default Contentful GraphQL origin.
pub const DEFAULT_GRAPHQL_URL: &str = "https://graphql.contentful.com";

const DEFAULT_PRODUCT_IMAGE: ImageTransform = ImageTransform {
    width: Some(800),
    height: None,
    quality: Some(80),
    format: Some(ImageFormat::Webp),
};

const DEFAULT_HERO_IMAGE: ImageTransform = ImageTransform {
    width: Some(1920),
    height: None,
    quality: Some(80),
    format: Some(ImageFormat::Webp),
};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Host configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct FunctionConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Contentful API configuration
    pub contentful: ContentfulConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, preview)
    pub sentry_environment: Option<String>,
}

/// Contentful settings that do not change between invocations.
#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    /// GraphQL API origin; the space path is appended per request.
    pub graphql_url: Url,
    /// Transform applied to product images.
    pub product_image: ImageTransform,
    /// Transform applied to hero images.
    pub hero_image: ImageTransform,
}

/// Contentful space ID and access token.
///
/// Read on every invocation so a rotated token takes effect without a
/// restart. Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ContentfulCredentials {
    /// Contentful space identifier
    pub space_id: String,
    /// Content Delivery API access token
    pub access_token: SecretString,
}

impl std::fmt::Debug for ContentfulCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentfulCredentials")
            .field("space_id", &self.space_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl FunctionConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(env_lookup)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_parsed_or_default(&lookup, "FUNCTION_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = get_parsed_or_default(&lookup, "FUNCTION_PORT", 9999_u16)?;

        Ok(Self {
            host,
            port,
            contentful: ContentfulConfig::from_lookup(&lookup)?,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ContentfulConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get_optional(lookup, "CONTENTFUL_GRAPHQL_URL")
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());
        let graphql_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CONTENTFUL_GRAPHQL_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            graphql_url,
            product_image: get_image_transform(lookup, "PRODUCT_IMAGE", DEFAULT_PRODUCT_IMAGE)?,
            hero_image: get_image_transform(lookup, "HERO_IMAGE", DEFAULT_HERO_IMAGE)?,
        })
    }

    /// Point at a different GraphQL origin, keeping the default transforms.
    #[must_use]
    pub fn with_graphql_url(graphql_url: Url) -> Self {
        Self {
            graphql_url,
            product_image: DEFAULT_PRODUCT_IMAGE,
            hero_image: DEFAULT_HERO_IMAGE,
        }
    }
}

impl ContentfulCredentials {
    /// Read the credentials through an arbitrary variable lookup.
    ///
    /// Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the first absent variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let space_id = get_required(&lookup, SPACE_ID_VAR)?;
        let access_token = SecretString::from(get_required(&lookup, ACCESS_TOKEN_VAR)?);

        Ok(Self {
            space_id,
            access_token,
        })
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Look a variable up in the process environment.
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an optional variable, treating empty values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

/// Get a required variable.
fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    get_optional(lookup, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable parsed as `T`, falling back to `default` when unset.
fn get_parsed_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional(lookup, key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Get a variable parsed as `T`.
///
/// Unset keeps `default`; the literal `none` clears it.
fn get_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Option<T>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = get_optional(lookup, key) else {
        return Ok(default);
    };

    let value = raw.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    value
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Build an image transform from `{prefix}_WIDTH`, `_HEIGHT`, `_QUALITY` and `_FORMAT`.
fn get_image_transform(
    lookup: &impl Fn(&str) -> Option<String>,
    prefix: &str,
    default: ImageTransform,
) -> Result<ImageTransform, ConfigError> {
    let transform = ImageTransform {
        width: get_parsed(lookup, &format!("{prefix}_WIDTH"), default.width)?,
        height: get_parsed(lookup, &format!("{prefix}_HEIGHT"), default.height)?,
        quality: get_parsed(lookup, &format!("{prefix}_QUALITY"), default.quality)?,
        format: get_parsed::<ImageFormat>(lookup, &format!("{prefix}_FORMAT"), default.format)?,
    };

    transform
        .validate()
        .map_err(|e| ConfigError::InvalidEnvVar(format!("{prefix}_*"), e.to_string()))?;

    Ok(transform)
}
