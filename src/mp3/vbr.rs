//! VBR information frame detection
//!
//! Encoders summarizing a variable-bitrate stream insert one synthetic frame
//! ahead of the audio: a Xing (VBR) or Info (CBR) tag from LAME-family
//! encoders, or a Fraunhofer VBRI tag. The frame sizes and advances like any
//! other frame but carries no samples, so it must not be counted.

/// Byte offset of the tag magic within its frame: the 4-byte frame header
/// plus the 32-byte side-info block of an MPEG-1 stereo frame. The VBRI tag
/// documents the same placement, 32 bytes past the header.
const TAG_OFFSET: usize = 36;

/// Whether the complete frame in `frame` is a VBR information frame.
///
/// Frames shorter than 40 bytes cannot hold a tag and are classified as
/// audio without reading past the end.
pub fn is_metadata_frame(frame: &[u8]) -> bool {
    if frame.len() < TAG_OFFSET + 4 {
        return false;
    }
    let tag = &frame[TAG_OFFSET..TAG_OFFSET + 4];
    tag == b"Xing" || tag == b"Info" || tag == b"VBRI"
}
