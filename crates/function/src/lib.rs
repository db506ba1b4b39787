//! Product Feed Function library.
//!
//! Serves Contentful products and hero images to the website as JSON. The
//! function itself is [`handler::ProductFeedHandler`]; the rest of the crate
//! hosts it over HTTP.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod contentful;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod routes;
pub mod state;
