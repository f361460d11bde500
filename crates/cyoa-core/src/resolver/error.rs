use thiserror::Error;

use crate::api::ApiError;
use crate::flags::STORE_UNAVAILABLE_MESSAGE;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{}", STORE_UNAVAILABLE_MESSAGE)]
    StoreUnavailable,

    #[error(transparent)]
    Network(#[from] ApiError),

    #[error("Unable to parse stored game data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Local store error: {0:#}")]
    Storage(anyhow::Error),

    #[error("Unable to load data locally")]
    NoLocalData,
}
