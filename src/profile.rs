//! Player profile and lifetime stats
//!
//! Persisted to LocalStorage alongside settings; fed by session reports.

use serde::{Deserialize, Serialize};

/// Lifetime player stats shown in the profile panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    /// Successful taps across all sessions.
    pub total_whacks: u64,
    pub levels_created: u32,
    /// Display rank; cosmetic only.
    pub rank: String,
    pub xp: u32,
    pub next_rank_xp: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "MasterWhacker".to_string(),
            total_whacks: 0,
            levels_created: 0,
            rank: "ELITE".to_string(),
            xp: 7500,
            next_rank_xp: 10_000,
        }
    }
}

impl Profile {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "mindwhack_profile";

    pub fn record_whacks(&mut self, hits: u32) {
        self.total_whacks = self.total_whacks.saturating_add(u64::from(hits));
    }

    pub fn record_level_created(&mut self) {
        self.levels_created = self.levels_created.saturating_add(1);
    }

    /// Load the profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(profile) = serde_json::from_str(&json) {
                    log::info!("Loaded profile from LocalStorage");
                    return profile;
                }
                log::warn!("Stored profile unreadable, starting fresh");
            }
        }

        Self::default()
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Profile saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
