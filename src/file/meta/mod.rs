#![doc = r#"
Meta events - non-performance annotations in a track

# Layout
```text
|------------|------|------|--------|---------|
| delta time | 0xFF | kind | length | payload |
|------------|------|------|--------|---------|
```

The length is a single byte. The payload is one of three shapes, see
[`MetaPayload`].
"#]

use alloc::{string::String, vec::Vec};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{Codes, DeltaTime, MidiError, MidiResult, Timing};

/// Status byte that introduces every meta event
pub const META_STATUS: u8 = 0xFF;

#[doc = r#"
The supported meta event kinds, with their identifying byte.

The eight text-like kinds are numbered `0x07` to `0x0E`.

# Example
```rust
# use midix_smf::prelude::*;
assert_eq!(u8::from(MetaKind::Sequence), 0x07);
assert_eq!(u8::from(MetaKind::EndOfTrack), 0x2F);
assert_eq!(MetaKind::try_from(0x51u8).unwrap(), MetaKind::Tempo);
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaKind {
    Sequence = 0x07,
    Text = 0x08,
    Copyright = 0x09,
    TrackName = 0x0A,
    Instrument = 0x0B,
    Lyric = 0x0C,
    Marker = 0x0D,
    CuePoint = 0x0E,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    Smpte = 0x54,
    TimeSig = 0x58,
    KeySig = 0x59,
    SeqEvent = 0x7F,
}

/// The data carried by a [`MetaEvent`]
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaPayload {
    /// Written verbatim
    Bytes(Vec<u8>),
    /// Written as its UTF-8 encoding
    Text(String),
    /// Written as a single byte. Values above 255 are truncated.
    Timing(Timing),
}

impl MetaPayload {
    /// Appends the length byte and payload to `out`.
    fn write_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Bytes(bytes) => {
                out.push(length_byte(bytes.len()));
                out.extend_from_slice(bytes);
            }
            Self::Text(text) => {
                out.push(length_byte(text.len()));
                out.extend_from_slice(text.as_bytes());
            }
            Self::Timing(timing) => {
                #[cfg(feature = "tracing")]
                if timing.value() > 0xFF {
                    tracing::warn!(
                        "Timing value {} does not fit in one byte and will be truncated",
                        timing.value()
                    );
                }
                out.push(1);
                out.push(timing.value() as u8);
            }
        }
    }

    fn encoded_len(&self) -> usize {
        1 + match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Text(text) => text.len(),
            Self::Timing(_) => 1,
        }
    }
}

fn length_byte(len: usize) -> u8 {
    #[cfg(feature = "tracing")]
    if len > 0xFF {
        tracing::warn!("Meta payload of {len} bytes overflows its one byte length");
    }
    len as u8
}

impl From<Vec<u8>> for MetaPayload {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for MetaPayload {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<String> for MetaPayload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetaPayload {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<Timing> for MetaPayload {
    fn from(value: Timing) -> Self {
        Self::Timing(value)
    }
}

#[doc = r#"
A non-performance event: names, lyrics, tempo changes and the like.

# Example
```rust
# use midix_smf::prelude::*;
let name = MetaEvent::new(None, MetaKind::TrackName, Some("Piano".into())).unwrap();
assert_eq!(name.to_bytes(), [0x00, 0xFF, 0x0A, 0x05, b'P', b'i', b'a', b'n', b'o']);

assert_eq!(
    MetaEvent::new(None, MetaKind::Text, None),
    Err(MidiError::InvalidPayloadType)
);
```
"#]
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    delta: DeltaTime,
    kind: MetaKind,
    payload: Option<MetaPayload>,
}

impl MetaEvent {
    /// Create a new meta event.
    ///
    /// `kind` may be a [`MetaKind`] or its raw byte. A missing `delta` means
    /// zero ticks.
    ///
    /// # Errors
    /// - [`MidiError::InvalidPayloadType`] when there is no payload
    /// - [`MidiError::UnknownMetaKind`] unless `kind` is a supported kind
    pub fn new(
        delta: Option<u32>,
        kind: impl Into<u8>,
        payload: Option<MetaPayload>,
    ) -> MidiResult<Self> {
        let Some(payload) = payload else {
            return Err(MidiError::InvalidPayloadType);
        };
        let kind = kind.into();
        let kind = MetaKind::try_from(kind).map_err(|_| MidiError::UnknownMetaKind(kind))?;

        Ok(Self {
            delta: DeltaTime::from(delta),
            kind,
            payload: Some(payload),
        })
    }

    /// Creates a meta event without requiring a payload.
    ///
    /// An event without a payload is written with a zero length byte.
    pub const fn new_unchecked(
        delta: DeltaTime,
        kind: MetaKind,
        payload: Option<MetaPayload>,
    ) -> Self {
        Self {
            delta,
            kind,
            payload,
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

    /// The meta kind
    pub const fn kind(&self) -> MetaKind {
        self.kind
    }

    /// The payload, `None` only for unchecked events
    pub const fn payload(&self) -> Option<&MetaPayload> {
        self.payload.as_ref()
    }

    /// Appends the serialized event to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        self.delta.write_into(out);
        out.push(META_STATUS);
        out.push(self.kind.into());
        match &self.payload {
            Some(payload) => payload.write_into(out),
            None => out.push(0),
        }
    }

    /// Returns the serialized event
    pub fn to_bytes(&self) -> Codes {
        let payload_len = self.payload.as_ref().map_or(1, MetaPayload::encoded_len);
        let mut out = Vec::with_capacity(self.delta.encoded_len() + 2 + payload_len);
        self.write_into(&mut out);
        Codes::from(out)
    }
}

#[cfg(test)]
fn sequence(payload: Option<MetaPayload>) -> MetaEvent {
    MetaEvent::new_unchecked(DeltaTime::ZERO, MetaKind::Sequence, payload)
}

#[test]
fn text_payload() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        sequence(Some("2".into())).to_bytes(),
        [0x00, 0xFF, 0x07, 0x01, 0x32]
    );
}

#[test]
fn timing_payload() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        sequence(Some(Timing::new(2).into())).to_bytes(),
        [0x00, 0xFF, 0x07, 0x01, 0x02]
    );
    // only the low byte survives
    assert_eq!(
        sequence(Some(Timing::new(500_000).into())).to_bytes(),
        [0x00, 0xFF, 0x07, 0x01, 0x20]
    );
}

#[test]
fn bytes_payload() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        sequence(Some(alloc::vec![0x02].into())).to_bytes(),
        [0x00, 0xFF, 0x07, 0x01, 0x02]
    );
    assert_eq!(
        sequence(Some(Vec::new().into())).to_bytes(),
        [0x00, 0xFF, 0x07, 0x00]
    );
}

#[test]
fn missing_payload_has_zero_length() {
    use pretty_assertions::assert_eq;
    assert_eq!(sequence(None).to_bytes(), [0x00, 0xFF, 0x07, 0x00]);
}

#[test]
fn utf8_text_length_counts_bytes() {
    use pretty_assertions::assert_eq;
    let event = MetaEvent::new(Some(128), MetaKind::Lyric, Some("é".into())).unwrap();
    assert_eq!(event.to_bytes(), [0x81, 0x00, 0xFF, 0x0C, 0x02, 0xC3, 0xA9]);
}

#[test]
fn construction_is_validated() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaEvent::new(None, 0u8, None),
        Err(MidiError::InvalidPayloadType)
    );
    assert_eq!(
        MetaEvent::new(None, 0xFFu8, Some("".into())),
        Err(MidiError::UnknownMetaKind(0xFF))
    );
    assert_eq!(
        MetaEvent::new(None, 0x00u8, Some("".into())),
        Err(MidiError::UnknownMetaKind(0x00))
    );
    let event = MetaEvent::new(None, 0x51u8, Some(Timing::new(120).into())).unwrap();
    assert_eq!(event.kind(), MetaKind::Tempo);
    assert_eq!(
        event.payload(),
        Some(&MetaPayload::Timing(Timing::new(120)))
    );
}
