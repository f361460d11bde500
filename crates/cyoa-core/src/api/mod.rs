//! HTTP client module for the cyoa content API.
//!
//! This module provides the `ApiClient` for fetching the game data
//! document, and the `GameDataSource` trait the resolver depends on so
//! the network can be swapped for a fake in tests.
//!
//! The content API takes no authentication and serves a single JSON
//! document.

pub mod client;
pub mod error;

pub use client::{ApiClient, GameDataSource, DEFAULT_API_URI};
pub use error::ApiError;
