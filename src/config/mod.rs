//! Application configuration: REST endpoint, upload limits, feature flags,
//! chat responder, local server and logging.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    ApiConfig, AppConfig, ChatConfig, Feature, FeatureFlags, LoggingConfig, ServerConfig,
    StorageConfig,
};
