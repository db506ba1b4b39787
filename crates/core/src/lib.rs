//! Product Feed Core - Shared types library.
//!
//! This crate provides the types shared by the product feed components:
//! - `function` - The function that proxies Contentful to the website
//! - `integration-tests` - End-to-end tests of the function
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. What the
//! website receives is defined here, so both the function and its tests agree
//! on the wire shape.
//!
//! # Modules
//!
//! - [`types`] - Products, site settings, the response envelope and image
//!   transform parameters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
