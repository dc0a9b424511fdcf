//! MP3 frame header parsing
//!
//! MP3 frames start with a sync word (11 bits of 1s) followed by header info.
//! Frame header structure (4 bytes):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits)
//! C = Layer (2 bits)
//! D = Protection bit (CRC)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H..M = private/channel/copyright/emphasis bits, irrelevant for sizing
//!
//! The scanner targets MPEG-1 Layer III streams: only the sync word and the
//! bitrate/sample-rate indices are validated, the version and layer bits are
//! not inspected.

/// Length in bytes of an MPEG audio frame header.
pub const HEADER_LEN: usize = 4;

// Bitrate lookup table for MPEG-1 Layer III (kbps)
// Index 0 = free format, 15 = bad; both are rejected
const BITRATES_KBPS: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

// Sample rate lookup table for MPEG-1 (Hz); index 3 is reserved
const SAMPLE_RATES_HZ: [u32; 4] = [44100, 48000, 32000, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub bitrate: u32,
    pub sample_rate: u32,
    pub padding: bool,
    /// Byte length of the whole frame, header included.
    pub frame_size: usize,
}

impl FrameHeader {
    /// Parse a 4-byte MPEG-1 Layer III frame header.
    ///
    /// Returns `None` when the sync word is absent or a lookup index is
    /// reserved; the caller treats that as a false sync and resynchronizes
    /// one byte further on.
    pub fn parse(header: [u8; 4]) -> Option<Self> {
        // Check sync word (11 bits of 1s)
        if header[0] != 0xFF || (header[1] & 0xE0) != 0xE0 {
            return None;
        }

        // Bitrate index (bits 7-4 of byte 2)
        let bitrate = BITRATES_KBPS[((header[2] >> 4) & 0x0F) as usize];
        if bitrate == 0 {
            return None; // Free or bad bitrate
        }

        // Sample rate index (bits 3-2 of byte 2)
        let sample_rate = SAMPLE_RATES_HZ[((header[2] >> 2) & 0x03) as usize];
        if sample_rate == 0 {
            return None; // Reserved
        }

        // Padding (bit 1 of byte 2)
        let padding = (header[2] & 0x02) != 0;

        // Layer III frame size: 144 * bitrate / sample_rate, plus one padding
        // byte when the padding bit is set
        let frame_size = (144 * bitrate * 1000 / sample_rate) as usize + usize::from(padding);

        Some(FrameHeader {
            bitrate,
            sample_rate,
            padding,
            frame_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MPEG1 Layer3 128kbps 44.1kHz stereo header:
    /// - 0xFF: first 8 sync bits
    /// - 0xFB: remaining sync (111), MPEG1 (11), Layer3 (01), no CRC (1)
    /// - 0x90: bitrate index 9 (128kbps), sample rate 0 (44100Hz), no padding
    /// - 0x00: stereo, no mode ext, not copyrighted, original, no emphasis
    fn valid_mp3_header() -> [u8; 4] {
        [0xFF, 0xFB, 0x90, 0x00]
    }

    #[test]
    fn test_parse_valid_header_128kbps() {
        let parsed = FrameHeader::parse(valid_mp3_header()).expect("should parse valid header");

        assert_eq!(parsed.bitrate, 128);
        assert_eq!(parsed.sample_rate, 44100);
        assert!(!parsed.padding);
    }

    #[test]
    fn test_parse_invalid_sync() {
        // No sync bits at all
        assert!(FrameHeader::parse([0x00, 0x00, 0x00, 0x00]).is_none());

        // Partial sync: 0xFF 0x00 = 11111111 00000000, but the top three
        // bits of the second byte have to be set too
        assert!(FrameHeader::parse([0xFF, 0x00, 0x00, 0x00]).is_none());
    }

    #[test]
    fn test_version_and_layer_bits_not_inspected() {
        // 0xE0 = 11100000: sync OK, version/layer bits all zero. A full
        // header validator would reject the reserved layer; this scanner
        // assumes MPEG-1 Layer III and only checks the 11 sync bits.
        let parsed = FrameHeader::parse([0xFF, 0xE0, 0x90, 0x00]).expect("sync alone decides");
        assert_eq!(parsed.bitrate, 128);
    }

    #[test]
    fn test_parse_invalid_bitrate() {
        // Index 15 = bad
        assert!(FrameHeader::parse([0xFF, 0xFB, 0xF0, 0x00]).is_none());

        // Index 0 = free format, not supported
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x00, 0x00]).is_none());
    }

    #[test]
    fn test_parse_invalid_sample_rate() {
        // 0x9C = 10011100: bitrate 9 (128kbps), sample rate index 3 (reserved)
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x9C, 0x00]).is_none());
    }

    // ==========================================================================
    // FRAME SIZE CALCULATION
    //
    // Frame size determines how many bytes until the next frame header:
    //
    //   frame_size = 144 * bitrate / sample_rate + padding
    //
    // Example: 128kbps at 44100Hz:
    //   144 * 128000 / 44100 = 417.95... -> 417 bytes (no padding)
    //   417 + 1 = 418 bytes (with padding)
    // ==========================================================================

    #[test]
    fn test_frame_size_calculation() {
        let parsed = FrameHeader::parse(valid_mp3_header()).expect("should parse");
        assert_eq!(parsed.frame_size, 417);
    }

    #[test]
    fn test_frame_size_with_padding() {
        // 0x92 = 0x90 | 0x02 = 128kbps with the padding bit set
        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x92, 0x00]).expect("should parse");
        assert!(parsed.padding);
        assert_eq!(parsed.frame_size, 418);
    }

    #[test]
    fn test_bitrate_index_table() {
        // Documents the mapping from the third header byte to bitrates
        let test_cases = [
            (0x10, 32),
            (0x20, 40),
            (0x30, 48),
            (0x40, 56),
            (0x50, 64),
            (0x60, 80),
            (0x70, 96),
            (0x80, 112),
            (0x90, 128),
            (0xA0, 160),
            (0xB0, 192),
            (0xC0, 224),
            (0xD0, 256),
            (0xE0, 320),
        ];

        for (byte2, expected_bitrate) in test_cases {
            let parsed = FrameHeader::parse([0xFF, 0xFB, byte2, 0x00])
                .unwrap_or_else(|| panic!("should parse header with byte 0x{:02X}", byte2));
            assert_eq!(
                parsed.bitrate, expected_bitrate,
                "byte 0x{:02X} should give {}kbps",
                byte2, expected_bitrate
            );
        }
    }

    #[test]
    fn test_sample_rate_index_table() {
        // Bits 3-2 of the third byte: 00=44100, 01=48000, 10=32000
        for (byte2, expected_rate) in [(0x90, 44100), (0x94, 48000), (0x98, 32000)] {
            let parsed = FrameHeader::parse([0xFF, 0xFB, byte2, 0x00]).expect("should parse");
            assert_eq!(parsed.sample_rate, expected_rate);
        }
    }
}
