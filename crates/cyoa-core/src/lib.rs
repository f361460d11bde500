//! Core library for cyoa.
//!
//! Decides whether the game data comes from the content API or from the
//! local store, keeps the local store up to date, and hands the result to
//! the frontend initializer as a [`Flags`] value.
//!
//! - `api`: `ApiClient` and the `GameDataSource` trait
//! - `store`: `KeyValueStore` trait with memory and file backends
//! - `connectivity`: online/offline probes
//! - `resolver`: `DataResolver`, the online/offline resolution flow
//! - `config`: on-disk configuration

pub mod api;
pub mod config;
pub mod connectivity;
pub mod flags;
pub mod models;
pub mod resolver;
pub mod store;

pub use api::{ApiClient, ApiError, GameDataSource};
pub use config::Config;
pub use connectivity::{ConnectivityProbe, FixedConnectivity, ReachabilityProbe};
pub use flags::{Flags, STORE_UNAVAILABLE_MESSAGE};
pub use models::GameData;
pub use resolver::{DataResolver, Initializer, MountPoint, Resolution, ResolveError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
