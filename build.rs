// Build script - reads config.yaml at compile time and generates defaults
// Buffer sizes and search defaults can be tuned without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const CHUNK_SIZE: usize = {chunk_size};
pub const MAX_LINE_SIZE: usize = {max_line_size};
pub const SHELL_BUFFER_SIZE: usize = {shell_buffer_size};

pub const SEARCH_MAX_DEPTH: i64 = {search_max_depth};
pub const SEARCH_SORTED: bool = {search_sorted};

pub const LOG_LEVEL: &str = "{log_level}";
"#,
        chunk_size = config.chunk_size,
        max_line_size = config.max_line_size,
        shell_buffer_size = config.shell_buffer_size,
        search_max_depth = config.search_max_depth,
        search_sorted = config.search_sorted,
        log_level = config.log_level,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    chunk_size: usize,
    max_line_size: usize,
    shell_buffer_size: usize,
    search_max_depth: i64,
    search_sorted: bool,
    log_level: String,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4096, // 4k page
            max_line_size: 256,
            shell_buffer_size: 128,
            search_max_depth: -1,
            search_sorted: true,
            log_level: "warn".to_string(),
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_io = false;
    let mut in_search = false;
    let mut in_logging = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // Track which section we're in
        if trimmed.starts_with("io:") {
            in_io = true;
            in_search = false;
            in_logging = false;
            continue;
        } else if trimmed.starts_with("search:") {
            in_io = false;
            in_search = true;
            in_logging = false;
            continue;
        } else if trimmed.starts_with("logging:") {
            in_io = false;
            in_search = false;
            in_logging = true;
            continue;
        }

        if let Some((key, value)) = parse_kv(trimmed) {
            if in_io {
                match key {
                    "chunk_size" => config.chunk_size = parse_size(value, 4096),
                    "max_line_size" => config.max_line_size = parse_size(value, 256),
                    "shell_buffer_size" => config.shell_buffer_size = parse_size(value, 128),
                    _ => {}
                }
            } else if in_search {
                match key {
                    "max_depth" => config.search_max_depth = value.parse().unwrap_or(-1),
                    "sorted" => config.search_sorted = parse_bool(value),
                    _ => {}
                }
            } else if in_logging {
                if key == "level" {
                    config.log_level = value.trim_matches('"').trim_matches('\'').to_string();
                }
            }
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    // Skip comments and empty lines
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Remove inline comments
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    // Skip if value is empty (section header)
    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}

// Zero-sized buffers would stall every read loop
fn parse_size(s: &str, fallback: usize) -> usize {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => fallback,
        Ok(n) => n,
    }
}
