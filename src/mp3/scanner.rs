//! Streaming frame counting
//!
//! [`FrameScanner`] consumes an MP3 byte stream chunk by chunk, with no
//! alignment assumptions, and counts the audio frames it completes. Bytes
//! that could still belong to an unfinished frame, or to a leading ID3v2 tag
//! that has not fully arrived, are carried over to the next push. Malformed
//! bytes are never an error: a failed sync just moves the scan one byte
//! forward.
//!
//! One scanner handles one stream. Concurrent streams each get their own
//! scanner; nothing is shared.

use std::io::{self, Read};

use super::frame::{self, FrameHeader};
use super::{id3, vbr};

/// How many bytes [`count_frames`] pulls from its source per read.
const READ_CHUNK: usize = 8 * 1024;

/// Incremental scan state for one MP3 stream.
#[derive(Debug, Default)]
pub struct FrameScanner {
    /// Carry-over of bytes not yet consumed by a completed scan pass.
    buffer: Vec<u8>,
    /// One-shot leading-tag decision; never re-evaluated once made, so audio
    /// data that happens to contain the bytes "ID3" is not re-skipped.
    tag_decided: bool,
    /// Audio frames completed so far, metadata frames excluded.
    frames: usize,
}

impl FrameScanner {
    /// Fresh session: empty buffer, undecided tag, zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and consume every frame it completes.
    ///
    /// Empty chunks are a no-op. The chunk boundary carries no meaning; any
    /// split of the same bytes produces the same final count.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
        self.scan();
    }

    /// Audio frames counted so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// End of stream. Trailing bytes that never became a complete frame are
    /// dropped without affecting the count.
    pub fn finish(self) -> usize {
        self.frames
    }

    /// Drain every fully buffered frame, then truncate the buffer to the
    /// unconsumed tail.
    fn scan(&mut self) {
        if !self.tag_decided && !self.resolve_leading_tag() {
            // The tag (or the 10 bytes needed to rule one out) extends past
            // the buffered data; consume nothing until more arrives.
            return;
        }

        let mut offset = 0;
        while offset + frame::HEADER_LEN <= self.buffer.len() {
            let bytes = [
                self.buffer[offset],
                self.buffer[offset + 1],
                self.buffer[offset + 2],
                self.buffer[offset + 3],
            ];
            let header = match FrameHeader::parse(bytes) {
                Some(header) => header,
                None => {
                    // False sync or reserved index: resynchronize byte-wise
                    offset += 1;
                    continue;
                }
            };

            let end = offset + header.frame_size;
            if end > self.buffer.len() {
                // Partial frame, keep it for the next chunk
                break;
            }

            if !vbr::is_metadata_frame(&self.buffer[offset..end]) {
                self.frames += 1;
            }
            offset = end;
        }

        self.buffer.drain(..offset);
    }

    /// One-shot ID3v2 decision. Returns `false` while still undecided.
    fn resolve_leading_tag(&mut self) -> bool {
        if self.buffer.len() < id3::HEADER_LEN {
            return false;
        }
        match id3::tag_size(&self.buffer) {
            // A declared size past the sanity cap is almost certainly not a
            // real tag; scan its bytes as audio instead of stalling the
            // stream waiting for it.
            Some(size) if size > id3::MAX_TAG_SIZE => {}
            Some(size) => {
                if self.buffer.len() < size {
                    return false;
                }
                self.buffer.drain(..size);
            }
            None => {}
        }
        self.tag_decided = true;
        true
    }
}

/// Count the audio frames of an entire MP3 stream read from `source`.
///
/// Read errors propagate unmodified; a partially scanned stream never turns
/// into a truncated count.
pub fn count_frames<R: Read + ?Sized>(source: &mut R) -> io::Result<usize> {
    let mut scanner = FrameScanner::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = source.read(&mut chunk)?;
        if n == 0 {
            return Ok(scanner.finish());
        }
        scanner.push(&chunk[..n]);
    }
}
