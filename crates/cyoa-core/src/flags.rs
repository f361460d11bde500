//! Flags handed to the frontend initializer.

use serde::{Deserialize, Serialize};

use crate::models::GameData;

/// Message carried by the failure flags when no local store exists.
/// The frontend matches on this text, so it must not change.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "This browser does not support localStorage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Flags {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub data: Option<GameData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub outcome_type: Option<String>,
}

impl Flags {
    /// Successful resolution with data and the stored outcome type
    pub fn loaded(data: GameData, outcome_type: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            outcome_type: Some(outcome_type.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            outcome_type: None,
        }
    }

    pub fn store_unavailable() -> Self {
        Self::failure(STORE_UNAVAILABLE_MESSAGE)
    }
}
