/// Persisted user preferences for chrome.storage.local

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabPorterError};
use crate::host::{load_storage, save_storage};
use crate::tab_data::PlacementMode;

pub const PREFERENCES_KEY: &str = "tab_porter_prefs";

/// Root preferences structure
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub placement_mode: PlacementMode,
}

impl Preferences {
    pub fn new(placement_mode: PlacementMode) -> Self {
        Preferences { placement_mode }
    }

    /// Load from storage; an unset key yields the defaults.
    pub async fn load() -> Result<Self> {
        match load_storage(PREFERENCES_KEY).await? {
            Some(value) => serde_wasm_bindgen::from_value(value)
                .map_err(|e| TabPorterError::Storage(format!("Failed to parse preferences: {:?}", e))),
            None => Ok(Preferences::default()),
        }
    }

    pub async fn save(&self) -> Result<()> {
        let value = serde_wasm_bindgen::to_value(self)
            .map_err(|e| TabPorterError::Storage(format!("Failed to serialize preferences: {:?}", e)))?;

        save_storage(PREFERENCES_KEY, value).await
    }
}
