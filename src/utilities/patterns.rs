// Pattern Matching Utilities
// Filename predicates used to filter directory searches

use glob::Pattern;
use regex::Regex;

use crate::errors::{ToolsError, ToolsResult};

/// Predicate over a bare filename (no directory part)
pub trait FilenameMatcher {
    fn matches(&self, name: &str) -> bool;
}

impl<F> FilenameMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

/// Regular expression that must match the entire filename
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern` anchored at both ends
    pub fn new(pattern: &str) -> ToolsResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ToolsError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { regex })
    }
}

impl FilenameMatcher for RegexMatcher {
    fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Shell-style wildcard: `*`, `?` and `[...]` classes over the whole filename
#[derive(Debug, Clone)]
pub struct WildcardMatcher {
    pattern: Pattern,
}

impl WildcardMatcher {
    pub fn new(pattern: &str) -> ToolsResult<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| ToolsError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { pattern })
    }
}

impl FilenameMatcher for WildcardMatcher {
    fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }
}
