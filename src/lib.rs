//! Streaming MP3 frame counting
//!
//! Counts MPEG-1 Layer III audio frames in a byte stream without decoding
//! any audio: a leading ID3v2 tag is skipped, frames are located by their
//! sync word and sized from their own headers, and the synthetic Xing/Info/
//! VBRI information frame that encoders insert is excluded from the count.
//!
//! The scan is incremental. Bytes arrive in chunks of arbitrary size and
//! frames are counted as soon as they complete, so the same stream split at
//! any byte boundary yields the same count.
//!
//! ```
//! use framecount::mp3::FrameScanner;
//!
//! let mut scanner = FrameScanner::new();
//! scanner.push(b"not a valid mp3 file at all");
//! assert_eq!(scanner.finish(), 0);
//! ```

pub mod config;
pub mod mp3;
pub mod server;
