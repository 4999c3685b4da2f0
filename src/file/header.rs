use alloc::vec::Vec;

use crate::prelude::*;

/// Identifies the header chunk
pub const HEADER_MAGIC: [u8; 4] = *b"MThd";

/// The header chunk always carries six bytes after its length
pub const HEADER_LENGTH: [u8; 4] = [0x00, 0x00, 0x00, 0x06];

/// The track count is a 16 bit field
pub const MAX_TRACKS: usize = u16::MAX as usize;

/// How the tracks of a file relate to each other.
///
/// Only formats 0 and 1 are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
}

impl FormatType {
    /// Format 1 for more than one track, format 0 otherwise (even for none).
    pub const fn for_track_count(count: usize) -> Self {
        if count > 1 {
            Self::Simultaneous
        } else {
            Self::SingleMultiChannel
        }
    }

    /// The two bytes written in the file header
    pub const fn to_be_bytes(&self) -> [u8; 2] {
        match self {
            Self::SingleMultiChannel => [0x00, 0x00],
            Self::Simultaneous => [0x00, 0x01],
        }
    }
}

#[doc = r#"
   Everything written in the `MThd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileHeader {
    format: FormatType,
    track_count: u16,
    ticks: TicksPerBeat,
}

impl MidiFileHeader {
    /// Create a header for `track_count` tracks.
    ///
    /// The format is derived from the track count. Counts above
    /// [`MAX_TRACKS`] are clamped to it.
    pub fn new(ticks: TicksPerBeat, track_count: usize) -> Self {
        let Ok(count) = u16::try_from(track_count) else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{track_count} tracks overflow the header track count");
            return Self {
                format: FormatType::Simultaneous,
                track_count: u16::MAX,
                ticks,
            };
        };
        Self {
            format: FormatType::for_track_count(track_count),
            track_count: count,
            ticks,
        }
    }

    /// The file format
    pub fn format(&self) -> FormatType {
        self.format
    }

    /// Number of tracks announced by the header
    pub fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Get the timing props
    pub fn ticks(&self) -> TicksPerBeat {
        self.ticks
    }

    /// Appends the fourteen byte header chunk to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&HEADER_MAGIC);
        out.extend_from_slice(&HEADER_LENGTH);
        out.extend_from_slice(&self.format.to_be_bytes());
        out.extend_from_slice(&self.track_count.to_be_bytes());
        out.extend_from_slice(&self.ticks.to_be_bytes());
    }
}

#[test]
fn header_bytes() {
    use pretty_assertions::assert_eq;
    let mut out = Vec::new();
    MidiFileHeader::new(TicksPerBeat::new(480).unwrap(), 3).write_into(&mut out);
    assert_eq!(
        out,
        [
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x03, 0x01, 0xE0,
        ]
    );
}

#[test]
fn format_follows_track_count() {
    use pretty_assertions::assert_eq;
    for count in [0, 1] {
        let format = FormatType::for_track_count(count);
        assert_eq!(format, FormatType::SingleMultiChannel);
    }
    assert_eq!(FormatType::for_track_count(2), FormatType::Simultaneous);
}

#[test]
fn track_count_is_clamped() {
    use pretty_assertions::assert_eq;
    let ticks = TicksPerBeat::default();
    let full = MidiFileHeader::new(ticks, MAX_TRACKS);
    assert_eq!(full.track_count(), u16::MAX);

    let over = MidiFileHeader::new(ticks, MAX_TRACKS + 1);
    assert_eq!(over, full);
    assert_eq!(over.format(), FormatType::Simultaneous);
}
