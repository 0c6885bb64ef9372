// Core infrastructure module
// Configuration shared by the library and the command line tool

pub mod app_config;
pub mod tools_config;

pub use app_config::AppConfig;
pub use tools_config::{EffectiveSettings, ToolsConfig, TOOLS_CONFIG_NAME};
