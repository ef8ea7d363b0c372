//! Configuration file loader with multi-source merging

use super::file_config::PollConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./livepoll.toml` or `./.livepoll.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/livepoll/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<PollConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(PollConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["livepoll.toml", ".livepoll.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> PollConfig {
        PollConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("livepoll").join("config.toml"))
    }
}
