#![doc = r#"
Contains every event a track can hold

# Hierarchy
```text
                 |-------|
                 | Event |
                 |-------|
                /         \
|--------------|           |-----------|
| ChannelEvent |           | MetaEvent |
|--------------|           |-----------|
```
"#]

pub mod channel;

use alloc::vec::Vec;

use crate::{Codes, DeltaTime, file::meta::MetaEvent, message::channel::ChannelEvent};

#[doc = r#"
The set of events a [`Track`](crate::prelude::Track) can hold
"#]
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A performance event on a channel
    Channel(ChannelEvent),
    /// A meta event
    Meta(MetaEvent),
}

impl Event {
    /// Sets the ticks since the previous event
    pub fn set_time(&mut self, ticks: u32) {
        match self {
            Self::Channel(e) => e.set_time(ticks),
            Self::Meta(e) => e.set_time(ticks),
        }
    }

    /// Ticks since the previous event
    pub const fn delta(&self) -> DeltaTime {
        match self {
            Self::Channel(e) => e.delta(),
            Self::Meta(e) => e.delta(),
        }
    }

    /// Appends the serialized event to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Channel(e) => e.write_into(out),
            Self::Meta(e) => e.write_into(out),
        }
    }

    /// Returns the serialized event
    pub fn to_bytes(&self) -> Codes {
        match self {
            Self::Channel(e) => e.to_bytes(),
            Self::Meta(e) => e.to_bytes(),
        }
    }
}

impl From<ChannelEvent> for Event {
    fn from(value: ChannelEvent) -> Self {
        Self::Channel(value)
    }
}

impl From<MetaEvent> for Event {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}

#[test]
fn set_time_on_either_variant() {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    let mut note: Event = ChannelEvent::new(None, ChannelEventKind::NoteOn, 0, 60, 90)
        .unwrap()
        .into();
    let mut marker: Event = MetaEvent::new(None, MetaKind::Marker, Some("A".into()))
        .unwrap()
        .into();

    note.set_time(128);
    marker.set_time(127);

    assert_eq!(note.delta(), DeltaTime::new(128));
    assert_eq!(note.to_bytes(), [0x81, 0x00, 0x90, 0x3C, 0x5A]);
    assert_eq!(marker.to_bytes(), [0x7F, 0xFF, 0x0D, 0x01, b'A']);
}
