//! CLI configuration loading.

pub mod file_config;
pub mod loader;

pub use file_config::PollConfig;
pub use loader::ConfigLoader;
