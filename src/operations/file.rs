// File Operations
// Whole-file read/write, chunked copy and archive sniffing

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::core::app_config::compiled;
use crate::errors::{IoResultExt, ToolsResult};

/// Bytes moved per read/write call when streaming between files
pub const CHUNK_SIZE: usize = compiled::CHUNK_SIZE;

/// Local file header signature that opens every zip archive
const ZIP_SIGNATURE: [u8; 4] = [b'P', b'K', 0x03, 0x04];

/// Read the whole file at `path` into memory
pub fn read(path: impl AsRef<Path>) -> ToolsResult<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).at_path(path)?;
    let content = read_stream(&mut file).at_path(path)?;

    debug!(path = %path.display(), bytes = content.len(), "read file");
    Ok(content)
}

/// Read the whole file at `path`, replacing invalid UTF-8 sequences
pub fn read_to_string(path: impl AsRef<Path>) -> ToolsResult<String> {
    let content = read(path)?;
    Ok(String::from_utf8_lossy(&content).into_owned())
}

/// Read every remaining byte of an already open stream
///
/// The stream is borrowed, never closed.
pub fn read_stream<R: Read + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    Ok(content)
}

/// Overwrite the file at `path` with `content`, creating it if needed
pub fn write(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> ToolsResult<()> {
    let path = path.as_ref();
    let content = content.as_ref();

    let mut file = File::create(path).at_path(path)?;
    file.write_all(content).at_path(path)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Copy `src` over `dst` chunk by chunk
///
/// `dst` is truncated up front, so a failure midway leaves it partially written.
pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> ToolsResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let mut source = File::open(src).at_path(src)?;
    let mut dest = File::create(dst).at_path(dst)?;

    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0usize;

    loop {
        let count = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).at_path(src),
        };

        dest.write_all(&buffer[..count]).at_path(dst)?;
        total += count;
        trace!(bytes = count, "copied chunk");
    }

    debug!(src = %src.display(), dst = %dst.display(), bytes = total, "copied file");
    Ok(())
}

/// Check whether the file starts with a zip local file header
///
/// Files shorter than the signature are simply not zips.
pub fn is_zip(path: impl AsRef<Path>) -> ToolsResult<bool> {
    let path = path.as_ref();
    let file = File::open(path).at_path(path)?;

    let mut header = Vec::with_capacity(ZIP_SIGNATURE.len());
    file.take(ZIP_SIGNATURE.len() as u64)
        .read_to_end(&mut header)
        .at_path(path)?;

    Ok(header == ZIP_SIGNATURE)
}
