#![doc = r#"
Rusty representation of a [`MidiFile`] and the chunks it is written as

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

pub mod meta;

use crate::{Codes, MidiError, MidiResult};
use alloc::vec::Vec;

/// File name suffix appended by [`MidiFile::save`]
pub const FILE_EXTENSION: &str = ".mid";

#[doc = r#"
A Standard MIDI File under construction: a tick rate and its tracks.

# Example
```rust
# use midix_smf::prelude::*;
# fn main() -> Result<(), MidiError> {
let mut melody = Track::new();
melody.note(0, "c4", 128, None, 0)?.note(0, "e4", 128, None, 0)?;

let mut file = MidiFile::new(0)?;
file.push_track(melody);

let bytes = file.to_bytes();
assert_eq!(&bytes[..4], b"MThd");
assert_eq!(&bytes[8..14], &[0x00, 0x00, 0x00, 0x01, 0x00, 0x80]);
# Ok(())
# }
```
"#]
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    ticks: TicksPerBeat,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Create a file with no tracks.
    ///
    /// `ticks` of `0` selects [`DEFAULT_TICKS`].
    ///
    /// # Errors
    /// [`MidiError::InvalidTicks`] unless
    /// `ticks` is `0..=32767`
    pub fn new(ticks: i32) -> MidiResult<Self> {
        Self::with_tracks(ticks, Vec::new())
    }

    /// Create a file holding `tracks`.
    ///
    /// # Errors
    /// [`MidiError::InvalidTicks`] as for [`MidiFile::new`], or
    /// [`MidiError::TooManyTracks`] with more than [`MAX_TRACKS`] tracks
    pub fn with_tracks(ticks: i32, tracks: Vec<Track>) -> MidiResult<Self> {
        let ticks = TicksPerBeat::new(ticks)?;
        if tracks.len() > MAX_TRACKS {
            return Err(MidiError::TooManyTracks(tracks.len()));
        }
        Ok(Self { ticks, tracks })
    }

    /// Appends a track.
    ///
    /// The header can announce at most [`MAX_TRACKS`]; past that the count
    /// written is clamped and the file will not read back correctly.
    pub fn push_track(&mut self, track: Track) -> &mut Self {
        self.tracks.push(track);
        self
    }

    /// Appends a track, or an empty one when `track` is `None`
    pub fn add_track(&mut self, track: Option<Track>) -> &mut Self {
        self.push_track(track.unwrap_or_default())
    }

    /// Ticks per beat for every track
    pub fn ticks(&self) -> TicksPerBeat {
        self.ticks
    }

    /// The tracks in the order they were added
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns the tracks for further editing
    pub fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    /// Returns the format the file will be written in
    pub fn format_type(&self) -> FormatType {
        FormatType::for_track_count(self.tracks.len())
    }

    /// Returns the header chunk for the current tracks
    pub fn header(&self) -> MidiFileHeader {
        MidiFileHeader::new(self.ticks, self.tracks.len())
    }

    /// Appends the whole file to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        self.header().write_into(out);
        for track in &self.tracks {
            track.write_into(out);
        }
    }

    /// Returns the serialized file
    pub fn to_bytes(&self) -> Codes {
        let mut out = Vec::new();
        self.write_into(&mut out);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "serialized {} track(s) at {} ticks per beat into {} bytes",
            self.tracks.len(),
            self.ticks.get(),
            out.len()
        );
        Codes::from(out)
    }

    /// Writes the file to `path`, adding [`FILE_EXTENSION`] when it is missing.
    #[cfg(feature = "std")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<std::path::PathBuf> {
        let mut path = path.as_ref().to_path_buf();
        if !path.to_string_lossy().ends_with(FILE_EXTENSION) {
            let mut name = path.into_os_string();
            name.push(FILE_EXTENSION);
            path = name.into();
        }
        std::fs::write(&path, self.to_bytes())?;
        #[cfg(feature = "tracing")]
        tracing::info!("saved midi file to {}", path.display());
        Ok(path)
    }
}

#[test]
fn default_ticks() {
    use pretty_assertions::assert_eq;
    let file = MidiFile::new(0).unwrap();
    assert_eq!(file.ticks().get(), DEFAULT_TICKS);
    assert_eq!(file, MidiFile::default());
}

#[test]
fn invalid_ticks() {
    use pretty_assertions::assert_eq;
    assert_eq!(MidiFile::new(-1), Err(MidiError::InvalidTicks(-1)));
    assert_eq!(MidiFile::new(32768), Err(MidiError::InvalidTicks(32768)));
}

#[test]
fn missing_track_becomes_empty() {
    use pretty_assertions::assert_eq;
    let mut file = MidiFile::new(96).unwrap();
    file.add_track(None);
    assert_eq!(file.tracks(), &[Track::new()]);
}

#[test]
fn track_limit() {
    use pretty_assertions::assert_eq;
    let tracks = alloc::vec![Track::new(); MAX_TRACKS];
    let file = MidiFile::with_tracks(0, tracks).unwrap();
    assert_eq!(file.header().track_count(), u16::MAX);

    let tracks = alloc::vec![Track::new(); MAX_TRACKS + 1];
    let err = MidiFile::with_tracks(0, tracks).unwrap_err();
    assert_eq!(err, MidiError::TooManyTracks(MAX_TRACKS + 1));
}
