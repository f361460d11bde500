//! Reads and writes of the game data and outcome type in the local store.

use tracing::{debug, error};

use crate::flags::{Flags, STORE_UNAVAILABLE_MESSAGE};
use crate::models::GameData;
use crate::store::{KeyValueStore, DATA_KEY, OUTCOME_TYPE_KEY};

use super::ResolveError;

/// Outcome type used until one has been stored
pub const DEFAULT_OUTCOME_TYPE: &str = "recommendation";

/// Stored value for `key`; an empty string counts as unset.
fn read_set(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>, ResolveError> {
    let value = store.get(key).map_err(ResolveError::Storage)?;
    Ok(value.filter(|v| !v.is_empty()))
}

/// Read `key`, falling back to `default`. Never writes.
pub fn get_or_default(
    store: &dyn KeyValueStore,
    key: &str,
    default: &str,
) -> Result<String, ResolveError> {
    Ok(read_set(store, key)?.unwrap_or_else(|| default.to_string()))
}

/// Resolve the outcome type, storing `default` only if none is stored yet.
/// An existing non-empty value is never replaced.
pub fn ensure_outcome_type(store: &dyn KeyValueStore, default: &str) -> Result<String, ResolveError> {
    if let Some(outcome_type) = read_set(store, OUTCOME_TYPE_KEY)? {
        return Ok(outcome_type);
    }

    debug!(outcome_type = default, "No stored outcome type, storing default");
    store
        .set(OUTCOME_TYPE_KEY, default)
        .map_err(ResolveError::Storage)?;
    Ok(default.to_string())
}

/// Save freshly fetched game data.
///
/// A missing store is not an error here: the failure flags are returned so
/// the frontend can report it. Write failures are errors.
pub fn persist(
    store: Option<&dyn KeyValueStore>,
    data: &GameData,
    default_outcome_type: &str,
) -> Result<Flags, ResolveError> {
    let Some(store) = store else {
        error!("{}", STORE_UNAVAILABLE_MESSAGE);
        return Ok(Flags::store_unavailable());
    };

    let serialized = serde_json::to_string(data)?;
    store
        .set(DATA_KEY, &serialized)
        .map_err(ResolveError::Storage)?;

    let outcome_type = ensure_outcome_type(store, default_outcome_type)?;
    Ok(Flags::loaded(data.clone(), outcome_type))
}

/// Load the cached game data.
pub fn load_local(
    store: Option<&dyn KeyValueStore>,
    default_outcome_type: &str,
) -> Result<Flags, ResolveError> {
    let store = store.ok_or(ResolveError::StoreUnavailable)?;

    let outcome_type = ensure_outcome_type(store, default_outcome_type)?;
    let raw = store
        .get(DATA_KEY)
        .map_err(ResolveError::Storage)?
        .ok_or(ResolveError::NoLocalData)?;

    let data: GameData = serde_json::from_str(&raw)?;
    if !data.is_present() {
        return Err(ResolveError::NoLocalData);
    }

    Ok(Flags::loaded(data, outcome_type))
}
