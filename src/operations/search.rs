// Search Operations
// Recursive, depth-limited filename search below a root directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::core::app_config::SearchDefaults;
use crate::errors::{IoResultExt, ToolsError, ToolsResult};
use crate::utilities::patterns::{FilenameMatcher, RegexMatcher};

/// Options for a directory search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Deepest level to report; the root's direct children are depth 0
    pub max_depth: Option<usize>,
    /// Sort the results by path before returning them
    pub sorted: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(SearchDefaults::default())
    }
}

impl From<SearchDefaults> for SearchOptions {
    fn from(defaults: SearchDefaults) -> Self {
        Self {
            max_depth: defaults.max_depth,
            sorted: defaults.sorted,
        }
    }
}

impl SearchOptions {
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

/// Collect every entry below `root` whose filename satisfies `matcher`
///
/// Directories are reported as well as files. Subtrees that cannot be read
/// for lack of permission are skipped without error; the root itself must
/// be a readable directory.
pub fn search<M>(root: impl AsRef<Path>, matcher: &M, options: SearchOptions) -> ToolsResult<Vec<PathBuf>>
where
    M: FilenameMatcher + ?Sized,
{
    let root = root.as_ref();
    // walkdir yields a non-directory root as a lone entry instead of failing
    fs::read_dir(root).at_path(root)?;

    let mut walker = WalkDir::new(root).min_depth(1);
    if let Some(depth) = options.max_depth {
        // walkdir counts the root as depth 0
        walker = walker.max_depth(depth + 1);
    }

    let mut found = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if is_permission_denied(&err) && err.depth() > 0 {
                    warn!(path = ?err.path(), "skipping unreadable directory");
                    continue;
                }
                return Err(walk_error(root, err));
            }
        };

        let matched = matcher.matches(&entry.file_name().to_string_lossy());
        if matched {
            trace!(path = %entry.path().display(), depth = entry.depth() - 1, "matched");
            found.push(entry.into_path());
        }
    }

    if options.sorted {
        found.sort();
    }

    debug!(root = %root.display(), matches = found.len(), "search finished");
    Ok(found)
}

/// Search with a regular expression that must match whole filenames
pub fn search_regex(root: impl AsRef<Path>, pattern: &str, options: SearchOptions) -> ToolsResult<Vec<PathBuf>> {
    let matcher = RegexMatcher::new(pattern)?;
    search(root, &matcher, options)
}

/// Sorted search results as text, one path per line
///
/// Every path, the last included, is followed by `\n`.
pub fn search_text(root: impl AsRef<Path>, pattern: &str, max_depth: Option<usize>) -> ToolsResult<String> {
    let options = SearchOptions::default().with_max_depth(max_depth).sorted(true);
    let paths = search_regex(root, pattern, options)?;
    Ok(join_paths(&paths))
}

/// Render paths one per line, each terminated by `\n`
pub fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

fn is_permission_denied(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::PermissionDenied)
        .unwrap_or(false)
}

fn walk_error(root: &Path, err: walkdir::Error) -> ToolsError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.io_error() {
        Some(io_err) => ToolsError::from_io(&path, io_err),
        // Only symlink loops land here, and links are not followed
        None => ToolsError::from_io(&path, &io::Error::new(io::ErrorKind::Other, err.to_string())),
    }
}
