// Utilities module
// Standalone helpers with no file system access

pub mod patterns;
pub mod series;
pub mod stopwatch;
pub mod table;
pub mod text;

pub use patterns::{FilenameMatcher, RegexMatcher, WildcardMatcher};
pub use series::{average, format_series, symm_ext, SeriesFormat};
pub use stopwatch::StopWatch;
pub use table::BiTable;
pub use text::{first_substring, last_substring, rand_alphanumeric, rand_bytes};
