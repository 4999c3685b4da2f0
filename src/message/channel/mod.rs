#![doc = r#"
Contains the channel event types

# Layout
```text
|------------|--------|--------|---------------------|
| delta time | status | param1 | param2 (if nonzero) |
|------------|--------|--------|---------------------|
```

The status byte is the event kind alone. The channel is validated when the
event is built, but only ends up on the wire when the kind is unset.
"#]

use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{Codes, DeltaTime, MidiError, MidiResult};

/// The highest channel number, channels are `0..=15`.
pub const MAX_CHANNEL: u8 = 15;

#[doc = r#"
The seven kinds of channel events, identified by the upper nibble of their status byte.

# Example
```rust
# use midix_smf::prelude::*;
assert_eq!(u8::from(ChannelEventKind::NoteOn), 0x90);
assert_eq!(ChannelEventKind::try_from(0xE0u8).unwrap(), ChannelEventKind::PitchBend);
assert!(ChannelEventKind::try_from(0x00u8).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelEventKind {
    /// Release a key
    NoteOff = 0x80,
    /// Press a key
    NoteOn = 0x90,
    /// Change the pressure on a held key
    AfterTouch = 0xA0,
    /// Set a controller value
    Controller = 0xB0,
    /// Select an instrument
    ProgramChange = 0xC0,
    /// Change the pressure on every held key
    ChannelAfterTouch = 0xD0,
    /// Bend the pitch of the channel
    PitchBend = 0xE0,
}

#[doc = r#"
A performance event scoped to one of sixteen channels.

# Example
```rust
# use midix_smf::prelude::*;
let event = ChannelEvent::new(None, ChannelEventKind::NoteOn, 0, 60, 90).unwrap();
assert_eq!(event.to_bytes(), [0x00, 0x90, 0x3C, 0x5A]);

assert_eq!(
    ChannelEvent::new(None, ChannelEventKind::NoteOn, 16, 60, 90),
    Err(MidiError::ChannelOutOfRange(16))
);
```
"#]
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEvent {
    delta: DeltaTime,
    kind: Option<ChannelEventKind>,
    channel: u8,
    param1: u8,
    param2: u8,
}

impl ChannelEvent {
    /// Create a new channel event.
    ///
    /// `kind` may be a [`ChannelEventKind`] or its raw status byte. A missing
    /// `delta` means zero ticks.
    ///
    /// # Errors
    /// - [`MidiError::ChannelOutOfRange`] unless `channel` is `0..=15`
    /// - [`MidiError::UnknownEventKind`] unless `kind` is one of the seven kinds
    pub fn new(
        delta: Option<u32>,
        kind: impl Into<u8>,
        channel: i32,
        param1: u8,
        param2: u8,
    ) -> MidiResult<Self> {
        let channel = u8::try_from(channel)
            .ok()
            .filter(|c| *c <= MAX_CHANNEL)
            .ok_or(MidiError::ChannelOutOfRange(channel))?;
        let byte: u8 = kind.into();
        let Ok(kind) = ChannelEventKind::try_from(byte) else {
            return Err(MidiError::UnknownEventKind(byte));
        };

        Ok(Self {
            delta: DeltaTime::from(delta),
            kind: Some(kind),
            channel,
            param1,
            param2,
        })
    }

    /// Creates a channel event without validating the channel or kind.
    ///
    /// An event without a kind writes `channel & 0x0F` as its status byte.
    pub const fn new_unchecked(
        delta: DeltaTime,
        kind: Option<ChannelEventKind>,
        channel: u8,
        param1: u8,
        param2: u8,
    ) -> Self {
        Self {
            delta,
            kind,
            channel,
            param1,
            param2,
        }
    }

    /// Sets the ticks since the previous event
    pub fn set_time(&mut self, ticks: u32) {
        self.delta = DeltaTime::new(ticks);
    }

    /// Ticks since the previous event
    pub const fn delta(&self) -> DeltaTime {
        self.delta
    }

    /// The kind of event, `None` only for unchecked events
    pub const fn kind(&self) -> Option<ChannelEventKind> {
        self.kind
    }

    /// The channel, `0..=15` for checked events
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// First data byte (a pitch, controller or program)
    pub const fn param1(&self) -> u8 {
        self.param1
    }

    /// Second data byte (usually a velocity or value)
    pub const fn param2(&self) -> u8 {
        self.param2
    }

    /// The byte written after the delta time.
    pub fn status(&self) -> u8 {
        match self.kind {
            Some(kind) => kind.into(),
            None => self.channel & 0x0F,
        }
    }

    /// Appends the serialized event to `out`.
    ///
    /// `param2` is left out entirely when it is zero.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        self.delta.write_into(out);
        out.push(self.status());
        out.push(self.param1);
        if self.param2 != 0 {
            out.push(self.param2);
        }
    }

    /// Returns the serialized event
    pub fn to_bytes(&self) -> Codes {
        let mut out = Vec::with_capacity(self.delta.encoded_len() + 3);
        self.write_into(&mut out);
        Codes::from(out)
    }
}

#[test]
fn note_on_bytes() {
    use pretty_assertions::assert_eq;
    let event = ChannelEvent::new(None, ChannelEventKind::NoteOn, 0, 60, 90).unwrap();
    assert_eq!(event.to_bytes(), [0x00, 0x90, 0x3C, 0x5A]);
}

#[test]
fn unset_kind_falls_back_to_channel() {
    use pretty_assertions::assert_eq;
    let event = ChannelEvent::new_unchecked(DeltaTime::ZERO, None, 0, 60, 90);
    assert_eq!(event.to_bytes(), [0x00, 0x00, 0x3C, 0x5A]);

    let event = ChannelEvent::new_unchecked(DeltaTime::ZERO, None, 0x1B, 60, 90);
    assert_eq!(event.status(), 0x0B);
}

#[test]
fn channel_is_not_part_of_status() {
    use pretty_assertions::assert_eq;
    let event = ChannelEvent::new(None, ChannelEventKind::NoteOn, 9, 60, 90).unwrap();
    assert_eq!(event.status(), 0x90);
}

#[test]
fn zero_param2_is_omitted() {
    use pretty_assertions::assert_eq;
    let event = ChannelEvent::new(None, ChannelEventKind::ProgramChange, 0, 5, 0).unwrap();
    assert_eq!(event.to_bytes(), [0x00, 0xC0, 0x05]);
    let event = ChannelEvent::new(None, ChannelEventKind::NoteOff, 0, 60, 0).unwrap();
    assert_eq!(event.to_bytes(), [0x00, 0x80, 0x3C]);
}

#[test]
fn delta_time_prefix() {
    use pretty_assertions::assert_eq;
    let mut event = ChannelEvent::new(Some(200), ChannelEventKind::NoteOff, 0, 60, 64).unwrap();
    assert_eq!(event.to_bytes(), [0x81, 0x48, 0x80, 0x3C, 0x40]);
    event.set_time(0);
    assert_eq!(event.to_bytes(), [0x00, 0x80, 0x3C, 0x40]);
}

#[test]
fn construction_is_validated() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        ChannelEvent::new(None, ChannelEventKind::NoteOn, -1, 0, 0),
        Err(MidiError::ChannelOutOfRange(-1))
    );
    assert_eq!(
        ChannelEvent::new(None, ChannelEventKind::NoteOn, 16, 0, 0),
        Err(MidiError::ChannelOutOfRange(16))
    );
    assert_eq!(
        ChannelEvent::new(None, 0u8, 0, 0, 0),
        Err(MidiError::UnknownEventKind(0))
    );
    assert_eq!(
        ChannelEvent::new(None, 0x85u8, 0, 0, 0),
        Err(MidiError::UnknownEventKind(0x85))
    );
    assert_eq!(
        ChannelEvent::new(None, 0xB0u8, 15, 7, 100).map(|e| e.kind()),
        Ok(Some(ChannelEventKind::Controller))
    );
}
