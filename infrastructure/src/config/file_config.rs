//! Configuration schema for the livepoll CLI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings loadable from `livepoll.toml`, the global config file, or
/// serialized defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Directory the file store keeps its per-key JSON files in.
    pub storage_dir: PathBuf,
    /// Storage key holding the shared poll state.
    pub state_key: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        let storage_dir = dirs::data_dir()
            .map(|d| d.join("livepoll"))
            .unwrap_or_else(|| PathBuf::from(".livepoll"));
        Self {
            storage_dir,
            state_key: "live-poll-app".to_string(),
        }
    }
}
