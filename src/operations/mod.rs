// Operations module
// File reading, comparison, search and shell execution

pub mod compare;
pub mod file;
pub mod search;
pub mod shell;

pub use compare::{cmpbin, cmpsize, cmptext, test, test_streams, teststr};
pub use file::{copy, is_zip, read, read_stream, read_to_string, write};
pub use search::{join_paths, search, search_regex, search_text, SearchOptions};
pub use shell::{execute, ShellOutput};
