// Mooshak Tools Library
// File comparison, search and shell helpers for building and testing graders

// Core infrastructure - configuration
pub mod core;

// Errors shared by every operation
pub mod errors;

// Operations - file I/O, comparison, search and shell execution
pub mod operations;

// Utilities - standalone helpers
pub mod utilities;

// Re-export commonly used items for convenience
pub use crate::core::{AppConfig, ToolsConfig};
pub use errors::{ToolsError, ToolsResult};
pub use operations::{SearchOptions, ShellOutput};
pub use utilities::{BiTable, FilenameMatcher, RegexMatcher, StopWatch};
