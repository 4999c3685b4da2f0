use alloc::vec::Vec;

use crate::{
    Codes, MidiError, MidiResult, Timing,
    file::meta::{MetaEvent, MetaKind},
    message::{
        Event,
        channel::{ChannelEvent, ChannelEventKind},
    },
    note::{Pitch, PitchSource},
};

/// Identifies a track chunk
pub const TRACK_MAGIC: [u8; 4] = *b"MTrk";

/// Closes every track: zero delta, meta status, end-of-track kind, zero length
pub const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

/// Velocity used when a builder method is given a velocity of `0`
pub const DEFAULT_VELOCITY: u8 = 90;

/// A common note length, one beat at the default resolution
pub const DEFAULT_DURATION: u32 = 128;

/// The channel most single-instrument tracks use
pub const DEFAULT_CHANNEL: i32 = 0;

#[doc = r#"
An ordered list of events, written out as one `MTrk` chunk.

Events are appended in order; serializing a track doesn't change it.
The builder methods return `Result<&mut Track, MidiError>` so they can be
chained with `?`. A failing call leaves the track as it was.

# Example
```rust
# use midix_smf::prelude::*;
# fn main() -> Result<(), MidiError> {
let mut track = Track::new();
track
    .tempo(120, None)?
    .instrument(0, 0, None)?
    .note(0, "c4", 128, None, 0)?
    .chord(0, ["e4", "g4"], 64, 100)?;

let bytes = track.to_bytes();
assert_eq!(&bytes[..4], b"MTrk");
assert_eq!(&bytes[bytes.len() - 4..], &END_OF_TRACK);
# Ok(())
# }
```
"#]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    /// Create an empty track
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Create a track from a list of events
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Appends an event.
    pub fn push(&mut self, event: impl Into<Event>) -> &mut Self {
        self.events.push(event.into());
        self
    }

    /// Appends an event that may be missing.
    ///
    /// # Errors
    /// [`MidiError::NilInput`] if `event` is `None`
    pub fn add_event(&mut self, event: Option<Event>) -> MidiResult<&mut Self> {
        let event = event.ok_or(MidiError::NilInput)?;
        Ok(self.push(event))
    }

    /// The events in the order they were added
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events, not counting the end-of-track marker
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events were added
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Adds a note-on event.
    ///
    /// `time` is the number of ticks since the previous event (default 0).
    /// A `velocity` of 0 is replaced by [`DEFAULT_VELOCITY`].
    pub fn note_on<'p>(
        &mut self,
        channel: i32,
        pitch: impl Into<PitchSource<'p>>,
        time: Option<u32>,
        velocity: u8,
    ) -> MidiResult<&mut Self> {
        let pitch = pitch.into().resolve()?;
        let event = key_event(ChannelEventKind::NoteOn, channel, pitch, time, velocity)?;
        Ok(self.push(event))
    }

    /// Adds a note-off event.
    ///
    /// `time` is the number of ticks since the previous event (default 0).
    /// A `velocity` of 0 is replaced by [`DEFAULT_VELOCITY`].
    pub fn note_off<'p>(
        &mut self,
        channel: i32,
        pitch: impl Into<PitchSource<'p>>,
        time: Option<u32>,
        velocity: u8,
    ) -> MidiResult<&mut Self> {
        let pitch = pitch.into().resolve()?;
        let event = key_event(ChannelEventKind::NoteOff, channel, pitch, time, velocity)?;
        Ok(self.push(event))
    }

    /// Adds a note-on, then a note-off `duration` ticks later.
    ///
    /// With a `duration` of 0 only the note-on is added.
    pub fn note<'p>(
        &mut self,
        channel: i32,
        pitch: impl Into<PitchSource<'p>>,
        duration: u32,
        time: Option<u32>,
        velocity: u8,
    ) -> MidiResult<&mut Self> {
        let pitch = pitch.into().resolve()?;
        let on = key_event(ChannelEventKind::NoteOn, channel, pitch, time, velocity)?;
        let off = match duration {
            0 => None,
            ticks => Some(key_event(
                ChannelEventKind::NoteOff,
                channel,
                pitch,
                Some(ticks),
                velocity,
            )?),
        };
        self.push(on);
        if let Some(off) = off {
            self.push(off);
        }
        Ok(self)
    }

    /// Strikes every pitch together and releases them `duration` ticks later.
    ///
    /// The first note-off carries the delay and `velocity`; the rest follow at
    /// zero ticks with the default velocity.
    pub fn chord<'p, P>(
        &mut self,
        channel: i32,
        pitches: impl IntoIterator<Item = P>,
        duration: u32,
        velocity: u8,
    ) -> MidiResult<&mut Self>
    where
        P: Into<PitchSource<'p>>,
    {
        let pitches = pitches
            .into_iter()
            .map(|p| p.into().resolve())
            .collect::<MidiResult<Vec<Pitch>>>()?;

        let mut events = Vec::with_capacity(pitches.len() * 2);
        for pitch in &pitches {
            events.push(key_event(
                ChannelEventKind::NoteOn,
                channel,
                *pitch,
                None,
                velocity,
            )?);
        }
        for (i, pitch) in pitches.iter().enumerate() {
            let event = if i == 0 {
                key_event(
                    ChannelEventKind::NoteOff,
                    channel,
                    *pitch,
                    Some(duration),
                    velocity,
                )?
            } else {
                key_event(ChannelEventKind::NoteOff, channel, *pitch, None, 0)?
            };
            events.push(event);
        }

        self.events.extend(events.into_iter().map(Event::Channel));
        Ok(self)
    }

    /// Selects an instrument (program) for a channel.
    pub fn instrument(
        &mut self,
        channel: i32,
        program: u8,
        time: Option<u32>,
    ) -> MidiResult<&mut Self> {
        let kind = ChannelEventKind::ProgramChange;
        let event = ChannelEvent::new(time, kind, channel, program, 0)?;
        Ok(self.push(event))
    }

    /// Sets the tempo in beats per minute.
    ///
    /// The tempo is stored as microseconds per quarter note in a
    /// one-byte timing payload, so only its low byte is written.
    pub fn tempo(&mut self, bpm: u32, time: Option<u32>) -> MidiResult<&mut Self> {
        let mpqn = Timing::new(bpm).mpqn_from_bpm()?;
        let event = MetaEvent::new(time, MetaKind::Tempo, Some(mpqn.into()))?;
        Ok(self.push(event))
    }

    /// Appends the framed track to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.extend_from_slice(&TRACK_MAGIC);
        out.extend_from_slice(&[0; 4]);
        for event in &self.events {
            event.write_into(out);
        }
        out.extend_from_slice(&END_OF_TRACK);

        let len = out.len() - start - 8;
        out[start + 4..start + 8].copy_from_slice(&(len as u32).to_be_bytes());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            "framed track with {} events in {} bytes",
            self.events.len(),
            len
        );
    }

    /// Returns the framed track: magic, length, events and end-of-track marker
    pub fn to_bytes(&self) -> Codes {
        let mut out = Vec::new();
        self.write_into(&mut out);
        Codes::from(out)
    }
}

impl FromIterator<Event> for Track {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self::from_events(iter.into_iter().collect())
    }
}

fn key_event(
    kind: ChannelEventKind,
    channel: i32,
    pitch: Pitch,
    time: Option<u32>,
    velocity: u8,
) -> MidiResult<ChannelEvent> {
    let velocity = if velocity == 0 {
        DEFAULT_VELOCITY
    } else {
        velocity
    };
    ChannelEvent::new(time, kind, channel, pitch.byte(), velocity)
}

#[test]
fn empty_track() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Track::new().to_bytes(),
        [
            0x4d, 0x54, 0x72, 0x6b, 0x00, 0x00, 0x00, 0x04, 0x00, 0xff, 0x2f, 0x00,
        ]
    );
}

#[test]
fn length_counts_events_and_end_marker() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    track.note(0, "c4", 128, None, 0).unwrap();
    assert_eq!(
        track.to_bytes(),
        [
            0x4d, 0x54, 0x72, 0x6b, 0x00, 0x00, 0x00, 0x0D, //
            0x00, 0x90, 0x3C, 0x5A, //
            0x81, 0x00, 0x80, 0x3C, 0x5A, //
            0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn serializing_does_not_mutate() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    track.instrument(3, 41, Some(10)).unwrap();
    let before = track.clone();
    let first = track.to_bytes();
    assert_eq!(track.to_bytes(), first);
    assert_eq!(track, before);
}

#[test]
fn long_tracks_use_all_four_length_bytes() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    let text = "x".repeat(200);
    for _ in 0..400 {
        track.push(MetaEvent::new(None, MetaKind::Text, Some(text.as_str().into())).unwrap());
    }
    let bytes = track.to_bytes();
    // each event is 00 FF 08 C8 + 200 bytes
    let len = 400 * 204 + 4;
    assert_eq!(&bytes[4..8], &(len as u32).to_be_bytes());
    assert_eq!(bytes.len(), len + 8);
}

#[test]
fn builder_errors_leave_track_untouched() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    assert_eq!(
        track.note_on(16, "c4", None, 0).unwrap_err(),
        MidiError::ChannelOutOfRange(16)
    );
    assert_eq!(
        track.chord(0, ["c4", "x4"], 10, 0).unwrap_err(),
        MidiError::InvalidNoteName("x4".into())
    );
    assert_eq!(track.tempo(0, None).unwrap_err(), MidiError::InvalidTempo);
    assert_eq!(track.add_event(None).unwrap_err(), MidiError::NilInput);
    assert!(track.is_empty());
}

#[test]
fn chord_releases_first_note_after_duration() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    track.chord(1, [60u8, 64, 67], 96, 100).unwrap();

    let bytes: Vec<Codes> = track.events().iter().map(Event::to_bytes).collect();
    assert_eq!(bytes.len(), 6);
    assert_eq!(bytes[0], [0x00, 0x90, 60, 100]);
    assert_eq!(bytes[2], [0x00, 0x90, 67, 100]);
    assert_eq!(bytes[3], [0x60, 0x80, 60, 100]);
    assert_eq!(bytes[4], [0x00, 0x80, 64, DEFAULT_VELOCITY]);
    assert_eq!(bytes[5], [0x00, 0x80, 67, DEFAULT_VELOCITY]);
}

#[test]
fn note_without_duration_only_strikes() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    track.note(0, Pitch::MIDDLE_C, 0, Some(5), 70).unwrap();
    assert_eq!(track.len(), 1);
    assert_eq!(track.events()[0].to_bytes(), [0x05, 0x90, 60, 70]);
}

#[test]
fn tempo_is_a_truncated_timing_payload() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new();
    // 120 bpm is 500_000 (0x07A120) microseconds per quarter note
    track.tempo(120, None).unwrap();
    assert_eq!(track.events()[0].to_bytes(), [0x00, 0xFF, 0x51, 0x01, 0x20]);
}
