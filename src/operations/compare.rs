// Compare Operations
// Size, byte-for-byte, line-by-line and whole-content comparison of files

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use super::file::{read_stream, CHUNK_SIZE};
use crate::core::app_config::compiled;
use crate::errors::{IoResultExt, ToolsError, ToolsResult};

/// Line buffer used by `cmptext`, terminator included
///
/// Longer lines are split into pieces of `MAX_LINE_SIZE - 1` bytes, each
/// counted as a separate line.
pub const MAX_LINE_SIZE: usize = compiled::MAX_LINE_SIZE;

const EXPECTED_TAG: &str = "Expected:\n";
const ACTUAL_TAG: &str = "Actual:\n";

/// Open two files for reading, first failure wins
fn open_pair(a: &Path, b: &Path) -> ToolsResult<(File, File)> {
    let fa = File::open(a).at_path(a)?;
    let fb = File::open(b).at_path(b)?;
    Ok((fa, fb))
}

/// Byte length found by seeking to the end; the file is rewound afterwards
fn file_len(file: &mut File) -> io::Result<u64> {
    let len = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;
    Ok(len)
}

/// Fill `buf` as far as the stream allows, returning the byte count
///
/// Short counts only happen at end of stream.
fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Splits a stream into lines the way a fixed line buffer would
///
/// A piece ends after a `\n` or once `limit - 1` bytes are collected. A piece
/// cut at the limit never ends inside a UTF-8 sequence: the incomplete tail is
/// carried over to the start of the next piece.
struct LinePieces<R> {
    reader: R,
    limit: usize,
    carry: Vec<u8>,
}

impl<R: BufRead> LinePieces<R> {
    fn new(reader: R, limit: usize) -> Self {
        Self {
            reader,
            limit,
            carry: Vec::new(),
        }
    }

    /// Next piece, `None` at end of stream
    fn next_piece(&mut self) -> io::Result<Option<Vec<u8>>> {
        let max = self.limit.saturating_sub(1).max(1);
        let mut line = std::mem::take(&mut self.carry);
        let mut ended = false;

        while line.len() < max {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                ended = true;
                break;
            }

            let room = (max - line.len()).min(available.len());
            let (take, done) = match available[..room].iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (room, false),
            };

            line.extend_from_slice(&available[..take]);
            self.reader.consume(take);
            if done {
                ended = true;
                break;
            }
        }

        if !ended {
            let keep = complete_prefix_len(&line);
            if keep > 0 {
                self.carry = line.split_off(keep);
            }
        }

        Ok(if line.is_empty() { None } else { Some(line) })
    }
}

/// Length of `bytes` without a trailing, incomplete UTF-8 sequence
fn complete_prefix_len(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        _ => bytes.len(),
    }
}

/// Check whether two files have the same byte length
pub fn cmpsize(a: impl AsRef<Path>, b: impl AsRef<Path>) -> ToolsResult<bool> {
    let (a, b) = (a.as_ref(), b.as_ref());
    let (mut fa, mut fb) = open_pair(a, b)?;

    let len_a = file_len(&mut fa).at_path(a)?;
    let len_b = file_len(&mut fb).at_path(b)?;

    trace!(a = %a.display(), len_a, b = %b.display(), len_b, "compared sizes");
    Ok(len_a == len_b)
}

/// Check whether two files hold exactly the same bytes
pub fn cmpbin(a: impl AsRef<Path>, b: impl AsRef<Path>) -> ToolsResult<bool> {
    let (a, b) = (a.as_ref(), b.as_ref());
    let (mut fa, mut fb) = open_pair(a, b)?;

    if file_len(&mut fa).at_path(a)? != file_len(&mut fb).at_path(b)? {
        debug!(a = %a.display(), b = %b.display(), "sizes differ");
        return Ok(false);
    }

    let mut buf_a = [0u8; CHUNK_SIZE];
    let mut buf_b = [0u8; CHUNK_SIZE];

    loop {
        let count_a = read_chunk(&mut fa, &mut buf_a).at_path(a)?;
        let count_b = read_chunk(&mut fb, &mut buf_b).at_path(b)?;

        // Sizes matched, so diverging counts mean the files changed under us
        if count_a != count_b {
            return Err(ToolsError::ReadAnomaly {
                left: a.display().to_string(),
                right: b.display().to_string(),
            });
        }
        if count_a == 0 {
            return Ok(true);
        }
        if buf_a[..count_a] != buf_b[..count_b] {
            debug!(a = %a.display(), b = %b.display(), "contents differ");
            return Ok(false);
        }
    }
}

/// Line-by-line report of where two text files differ
///
/// For every differing line index the report holds `"<index>:\n"` followed
/// by the left line and then the right line, each only if present. Lines
/// keep their terminators. An empty report means the files are identical.
pub fn cmptext(a: impl AsRef<Path>, b: impl AsRef<Path>) -> ToolsResult<String> {
    let (a, b) = (a.as_ref(), b.as_ref());
    let (fa, fb) = open_pair(a, b)?;
    let mut pieces_a = LinePieces::new(BufReader::new(fa), MAX_LINE_SIZE);
    let mut pieces_b = LinePieces::new(BufReader::new(fb), MAX_LINE_SIZE);

    let mut report: Vec<u8> = Vec::new();
    let mut index = 0usize;

    loop {
        let left = pieces_a.next_piece().at_path(a)?;
        let right = pieces_b.next_piece().at_path(b)?;

        if left.is_none() && right.is_none() {
            break;
        }

        if left != right {
            report.extend_from_slice(format!("{}:\n", index).as_bytes());
            for line in [&left, &right].into_iter().flatten() {
                report.extend_from_slice(line);
            }
        }

        index += 1;
    }

    debug!(a = %a.display(), b = %b.display(), lines = index, identical = report.is_empty(), "compared text");
    Ok(String::from_utf8_lossy(&report).into_owned())
}

/// Whole-content comparison of two streams
///
/// Returns `""` when equal, otherwise both contents behind `Expected:` and
/// `Actual:` tags.
pub fn test_streams<E: Read, A: Read>(mut expected: E, mut actual: A) -> io::Result<String> {
    let expected = read_stream(&mut expected)?;
    let actual = read_stream(&mut actual)?;
    Ok(render_report(&expected, &actual))
}

fn render_report(expected: &[u8], actual: &[u8]) -> String {
    if expected == actual {
        return String::new();
    }

    let mut report = Vec::with_capacity(EXPECTED_TAG.len() + expected.len() + ACTUAL_TAG.len() + actual.len());
    report.extend_from_slice(EXPECTED_TAG.as_bytes());
    report.extend_from_slice(expected);
    report.extend_from_slice(ACTUAL_TAG.as_bytes());
    report.extend_from_slice(actual);
    String::from_utf8_lossy(&report).into_owned()
}

/// Whole-content comparison of an expected file against an actual file
pub fn test(expected: impl AsRef<Path>, actual: impl AsRef<Path>) -> ToolsResult<String> {
    let (expected, actual) = (expected.as_ref(), actual.as_ref());
    let (mut fe, mut fa) = open_pair(expected, actual)?;

    let expected_content = read_stream(&mut fe).at_path(expected)?;
    let actual_content = read_stream(&mut fa).at_path(actual)?;
    Ok(render_report(&expected_content, &actual_content))
}

/// Whole-content comparison of an expected file against in-memory text
pub fn teststr(expected: impl AsRef<Path>, actual: impl AsRef<[u8]>) -> ToolsResult<String> {
    let expected = expected.as_ref();
    let fe = File::open(expected).at_path(expected)?;

    test_streams(fe, actual.as_ref()).at_path(expected)
}
