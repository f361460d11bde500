//! Online/offline resolution of the game data.
//!
//! `DataResolver::resolve` reads the connectivity signal once and takes one
//! of two paths:
//!
//! - network: fetch, persist, initialize. Any failure falls back to the
//!   local path, once.
//! - local: read the cached data and initialize on a hit. On a miss, or
//!   when no store exists, only a diagnostic is logged and the frontend is
//!   never started.
//!
//! A missing store on the network path still initializes the frontend,
//! with failure flags. The local path does not. Both behaviors are pinned
//! by tests below.

pub mod error;
pub mod local;

pub use error::ResolveError;
pub use local::{ensure_outcome_type, get_or_default, load_local, persist, DEFAULT_OUTCOME_TYPE};

use anyhow::Result;
use tracing::{error, info};

use crate::api::GameDataSource;
use crate::connectivity::ConnectivityProbe;
use crate::flags::Flags;
use crate::store::KeyValueStore;

/// Where the frontend should attach. Opaque to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(String);

impl MountPoint {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MountPoint {
    fn default() -> Self {
        Self::new("root")
    }
}

/// Starts the frontend with the resolved flags. Called at most once per
/// resolution.
pub trait Initializer {
    fn init(&mut self, mount: &MountPoint, flags: Flags) -> Result<()>;
}

impl<F> Initializer for F
where
    F: FnMut(&MountPoint, Flags) -> Result<()>,
{
    fn init(&mut self, mount: &MountPoint, flags: Flags) -> Result<()> {
        self(mount, flags)
    }
}

/// Which path started the frontend, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Network,
    Cache,
    NotStarted,
}

pub struct DataResolver<'a> {
    connectivity: &'a dyn ConnectivityProbe,
    source: &'a dyn GameDataSource,
    store: Option<&'a dyn KeyValueStore>,
    mount: MountPoint,
    default_outcome_type: String,
}

impl<'a> DataResolver<'a> {
    /// `store` is `None` when the host has no local store at all.
    pub fn new(
        connectivity: &'a dyn ConnectivityProbe,
        source: &'a dyn GameDataSource,
        store: Option<&'a dyn KeyValueStore>,
    ) -> Self {
        Self {
            connectivity,
            source,
            store,
            mount: MountPoint::default(),
            default_outcome_type: DEFAULT_OUTCOME_TYPE.to_string(),
        }
    }

    pub fn with_mount(mut self, mount: MountPoint) -> Self {
        self.mount = mount;
        self
    }

    pub fn with_default_outcome_type(mut self, outcome_type: impl Into<String>) -> Self {
        self.default_outcome_type = outcome_type.into();
        self
    }

    pub async fn resolve(&self, initializer: &mut dyn Initializer) -> Resolution {
        if self.connectivity.is_online() {
            info!("Online, loading game data from network");
            self.load_from_network(initializer).await
        } else {
            info!("Offline, loading game data from local store");
            self.load_from_local(initializer)
        }
    }

    async fn load_from_network(&self, initializer: &mut dyn Initializer) -> Resolution {
        match self.fetch_and_persist().await {
            Ok(flags) => {
                self.start(initializer, flags);
                Resolution::Network
            }
            Err(e) => {
                error!(error = %e, "Error loading data from network");
                self.load_from_local(initializer)
            }
        }
    }

    async fn fetch_and_persist(&self) -> Result<Flags, ResolveError> {
        let data = self.source.fetch_game_data().await?;
        persist(self.store, &data, &self.default_outcome_type)
    }

    fn load_from_local(&self, initializer: &mut dyn Initializer) -> Resolution {
        match load_local(self.store, &self.default_outcome_type) {
            Ok(flags) => {
                self.start(initializer, flags);
                Resolution::Cache
            }
            Err(e) => {
                error!(error = %e, "Unable to load data locally");
                Resolution::NotStarted
            }
        }
    }

    fn start(&self, initializer: &mut dyn Initializer, flags: Flags) {
        info!(
            success = flags.success,
            mount = self.mount.as_str(),
            "Initializing frontend"
        );
        if let Err(e) = initializer.init(&self.mount, flags) {
            error!(error = %e, "Frontend initializer failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::connectivity::FixedConnectivity;
    use crate::flags::STORE_UNAVAILABLE_MESSAGE;
    use crate::models::GameData;
    use crate::store::{MemoryStore, DATA_KEY, OUTCOME_TYPE_KEY};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source returning a canned response and counting calls
    struct FakeSource {
        response: fn() -> Result<GameData, ApiError>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn ok() -> Self {
            Self {
                response: || Ok(GameData::new(json!({"scenes": [{"id": "intro"}]}))),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: || Err(ApiError::ServerError("boom".to_string())),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GameDataSource for FakeSource {
        async fn fetch_game_data(&self) -> Result<GameData, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)()
        }
    }

    /// Records every flags value handed to the frontend
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(MountPoint, Flags)>,
    }

    impl Initializer for Recorder {
        fn init(&mut self, mount: &MountPoint, flags: Flags) -> Result<()> {
            self.calls.push((mount.clone(), flags));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_online_success_persists_and_initializes() {
        let source = FakeSource::ok();
        let store = MemoryStore::new();
        let mut recorder = Recorder::default();

        let connectivity = FixedConnectivity::online();
        let resolver = DataResolver::new(&connectivity, &source, Some(&store));
        let resolution = resolver.resolve(&mut recorder).await;

        assert_eq!(resolution, Resolution::Network);
        assert_eq!(
            store.get(DATA_KEY).unwrap().as_deref(),
            Some(r#"{"scenes":[{"id":"intro"}]}"#)
        );
        assert_eq!(
            store.get(OUTCOME_TYPE_KEY).unwrap().as_deref(),
            Some("recommendation")
        );
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(
            recorder.calls[0].1,
            Flags::loaded(
                GameData::new(json!({"scenes": [{"id": "intro"}]})),
                "recommendation"
            )
        );
    }

    #[tokio::test]
    async fn test_online_network_error_falls_back_to_cache() {
        let source = FakeSource::failing();
        let store = MemoryStore::with_entries([(DATA_KEY, r#"{"scenes":[]}"#)]);
        let mut recorder = Recorder::default();

        let connectivity = FixedConnectivity::online();
        let resolver = DataResolver::new(&connectivity, &source, Some(&store));
        let resolution = resolver.resolve(&mut recorder).await;

        assert_eq!(resolution, Resolution::Cache);
        assert_eq!(source.calls(), 1);
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(
            recorder.calls[0].1,
            Flags::loaded(GameData::new(json!({"scenes": []})), "recommendation")
        );
    }

    #[tokio::test]
    async fn test_network_fallback_uses_cached_outcome_type() {
        let source = FakeSource::failing();
        let store = MemoryStore::with_entries([
            (DATA_KEY, r#"{"scenes":[]}"#),
            (OUTCOME_TYPE_KEY, "quiz"),
        ]);
        let mut recorder = Recorder::default();

        DataResolver::new(&FixedConnectivity::online(), &source, Some(&store))
            .resolve(&mut recorder)
            .await;

        assert_eq!(recorder.calls[0].1.outcome_type.as_deref(), Some("quiz"));
    }

    #[tokio::test]
    async fn test_offline_without_cache_never_initializes() {
        let source = FakeSource::ok();
        let store = MemoryStore::new();
        let mut recorder = Recorder::default();

        let connectivity = FixedConnectivity::offline();
        let resolver = DataResolver::new(&connectivity, &source, Some(&store));
        let resolution = resolver.resolve(&mut recorder).await;

        assert_eq!(resolution, Resolution::NotStarted);
        assert_eq!(source.calls(), 0);
        assert!(recorder.calls.is_empty());
    }

    #[tokio::test]
    async fn test_offline_with_cache_initializes() {
        let source = FakeSource::ok();
        let store = MemoryStore::with_entries([(DATA_KEY, r#"{"scenes":[1]}"#)]);
        let mut recorder = Recorder::default();

        let resolution = DataResolver::new(&FixedConnectivity::offline(), &source, Some(&store))
            .resolve(&mut recorder)
            .await;

        assert_eq!(resolution, Resolution::Cache);
        assert_eq!(source.calls(), 0);
        assert_eq!(
            recorder.calls[0].1.data,
            Some(GameData::new(json!({"scenes": [1]})))
        );
    }

    #[tokio::test]
    async fn test_online_without_store_initializes_with_failure() {
        let source = FakeSource::ok();
        let mut recorder = Recorder::default();

        let resolution = DataResolver::new(&FixedConnectivity::online(), &source, None)
            .resolve(&mut recorder)
            .await;

        assert_eq!(resolution, Resolution::Network);
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(
            recorder.calls[0].1,
            Flags {
                success: false,
                data: None,
                message: Some("This browser does not support localStorage".to_string()),
                outcome_type: None,
            }
        );
    }

    #[tokio::test]
    async fn test_local_path_without_store_never_initializes() {
        let source = FakeSource::failing();
        let mut recorder = Recorder::default();

        let resolution = DataResolver::new(&FixedConnectivity::online(), &source, None)
            .resolve(&mut recorder)
            .await;
        assert_eq!(resolution, Resolution::NotStarted);

        let resolution = DataResolver::new(&FixedConnectivity::offline(), &source, None)
            .resolve(&mut recorder)
            .await;
        assert_eq!(resolution, Resolution::NotStarted);

        assert!(recorder.calls.is_empty());
    }

    #[tokio::test]
    async fn test_preset_outcome_type_kept_across_fetches() {
        let source = FakeSource::ok();
        let store = MemoryStore::with_entries([(OUTCOME_TYPE_KEY, "X")]);

        for _ in 0..3 {
            let mut recorder = Recorder::default();
            DataResolver::new(&FixedConnectivity::online(), &source, Some(&store))
                .resolve(&mut recorder)
                .await;
            assert_eq!(recorder.calls[0].1.outcome_type.as_deref(), Some("X"));
        }
        assert_eq!(store.get(OUTCOME_TYPE_KEY).unwrap().as_deref(), Some("X"));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_mount_and_default_outcome_type_are_passed_through() {
        let source = FakeSource::ok();
        let store = MemoryStore::new();
        let mut seen = Vec::new();
        let mut initializer = |mount: &MountPoint, flags: Flags| -> Result<()> {
            seen.push((mount.as_str().to_string(), flags.outcome_type));
            Ok(())
        };

        DataResolver::new(&FixedConnectivity::online(), &source, Some(&store))
            .with_mount(MountPoint::new("app"))
            .with_default_outcome_type("quiz")
            .resolve(&mut initializer)
            .await;

        assert_eq!(seen, vec![("app".to_string(), Some("quiz".to_string()))]);
    }

    #[tokio::test]
    async fn test_initializer_error_is_not_a_fallback() {
        let source = FakeSource::ok();
        let store = MemoryStore::new();
        let mut calls = 0;
        let mut initializer = |_: &MountPoint, _: Flags| -> Result<()> {
            calls += 1;
            Err(anyhow::anyhow!("mount missing"))
        };

        let resolution = DataResolver::new(&FixedConnectivity::online(), &source, Some(&store))
            .resolve(&mut initializer)
            .await;

        assert_eq!(resolution, Resolution::Network);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_store_unavailable_message_is_stable() {
        assert_eq!(ResolveError::StoreUnavailable.to_string(), STORE_UNAVAILABLE_MESSAGE);
    }
}
