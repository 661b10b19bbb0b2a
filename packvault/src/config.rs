//! Runtime settings resolved from command-line flags and environment

use crate::catalog::DEFAULT_API_BASE;
use crate::datasets::DEFAULT_MIRROR_BASE;
use std::path::PathBuf;
use std::time::Duration;

/// Seconds before a catalog or mirror request is abandoned
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

const STATE_FILE: &str = "state.json";
const PRICE_CACHE_FILE: &str = "price_cache.json";

/// Returns the default data directory: ~/.local/share/packvault
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("packvault")
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub api_base: String,
    pub api_key: Option<String>,
    pub mirror_base: String,
    /// Replacement for the bundled offline dataset
    pub local_dataset: Option<PathBuf>,
    pub timeout: Duration,
    /// Skip the live catalog and search the offline datasets only
    pub offline: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            mirror_base: DEFAULT_MIRROR_BASE.to_string(),
            local_dataset: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            offline: false,
        }
    }
}

impl Settings {
    /// Collection snapshot file
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    /// Last-known price cache file
    pub fn price_cache_path(&self) -> PathBuf {
        self.data_dir.join(PRICE_CACHE_FILE)
    }
}
