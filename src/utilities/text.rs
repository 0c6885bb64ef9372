// Text Utilities
// Delimiter-bounded substring search and random string generation

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Byte offset of the first `needle` starting at or after `from`
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes().get(from..)?;
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(from);
    }
    hay.windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

/// Byte offset of the last `needle` lying entirely inside `haystack[..end]`
fn rfind_before(haystack: &str, needle: &str, end: usize) -> Option<usize> {
    let hay = haystack.as_bytes().get(..end)?;
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(end);
    }
    hay.windows(needle.len()).rposition(|w| w == needle)
}

/// First text enclosed by `begin` and `end` at or after byte `pos`
///
/// The end delimiter is looked for starting one byte into the enclosed text,
/// so the result is never empty. Returns the text and the offset just past
/// the end delimiter, ready to be used as the next `pos`.
pub fn first_substring(s: &str, begin: &str, end: &str, pos: usize) -> Option<(String, usize)> {
    let start = find_from(s, begin, pos)? + begin.len();
    let stop = find_from(s, end, start + 1)?;

    // Both offsets sit on delimiter boundaries, hence on char boundaries
    let text = s.get(start..stop)?.to_string();
    Some((text, stop + end.len()))
}

/// Last text enclosed by `begin` and `end` inside `s[..pos]`
///
/// `pos` of `None` searches the whole string. Returns the text and the
/// offset where `begin` starts, ready to be used as the next `pos`.
pub fn last_substring(s: &str, begin: &str, end: &str, pos: Option<usize>) -> Option<(String, usize)> {
    let limit = pos.unwrap_or(s.len()).min(s.len());
    let stop = rfind_before(s, end, limit)?;
    let begin_at = rfind_before(s, begin, stop)?;
    let start = begin_at + begin.len();

    let text = s.get(start..stop)?.to_string();
    Some((text, begin_at))
}

/// Random string of `[0-9A-Za-z]` characters
pub fn rand_alphanumeric(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random bytes, any value allowed
pub fn rand_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen::<u8>()).collect()
}
