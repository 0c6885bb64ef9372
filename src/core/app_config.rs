// Application Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Built-in configuration for mooshak-tools
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory search defaults
    pub search: SearchDefaults,

    /// Default tracing filter for the command line tool
    pub log_level: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchDefaults {
    /// Deepest level visited below the root, `None` for unlimited
    pub max_depth: Option<usize>,

    /// Sort results by full path
    pub sorted: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            max_depth: depth_limit(compiled::SEARCH_MAX_DEPTH),
            sorted: compiled::SEARCH_SORTED,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchDefaults::default(),
            log_level: compiled::LOG_LEVEL.to_string(),
        }
    }
}

/// Convert a signed depth where negative means "no limit"
pub fn depth_limit(depth: i64) -> Option<usize> {
    usize::try_from(depth).ok()
}
