#![doc = r#"
Delta times and their variable-length encoding.

Every event in a track is prefixed by the number of ticks that elapsed since
the previous event. The tick count is written as a variable-length quantity
(VLQ): seven bits per byte, most significant group first, with the high bit
set on every byte but the last.

```text
ticks        bytes
0            00
127          7F
128          81 00
16_383       FF 7F
16_384       81 80 00
```
"#]

use alloc::vec::Vec;

/// A VLQ holding a `u32` never needs more than five bytes.
const MAX_VLQ_LEN: usize = 5;

/// Ticks since the previous event in the same track.
///
/// Defaults to zero ticks, which encodes as a single `0x00` byte.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaTime(u32);

impl DeltaTime {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// Create a delta time from a tick count
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Returns the tick count
    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Returns the variable-length encoding of these ticks.
    ///
    /// # Example
    /// ```rust
    /// # use midix_smf::prelude::*;
    /// assert_eq!(DeltaTime::new(0).encode(), [0x00]);
    /// assert_eq!(DeltaTime::new(128).encode(), [0x81, 0x00]);
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_VLQ_LEN);
        self.write_into(&mut out);
        out
    }

    /// Appends the variable-length encoding of these ticks to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        // groups are packed least significant byte first, so the
        // lowest byte of the buffer is the first byte on the wire.
        let mut ticks = self.0;
        let mut buffer: u64 = (ticks & 0x7F) as u64;
        ticks >>= 7;
        while ticks != 0 {
            buffer <<= 8;
            buffer |= ((ticks & 0x7F) | 0x80) as u64;
            ticks >>= 7;
        }

        loop {
            let byte = (buffer & 0xFF) as u8;
            out.push(byte);
            if byte & 0x80 == 0 {
                break;
            }
            buffer >>= 8;
        }
    }

    /// Number of bytes [`DeltaTime::encode`] would produce.
    pub const fn encoded_len(&self) -> usize {
        let mut len = 1;
        let mut ticks = self.0 >> 7;
        while ticks != 0 {
            len += 1;
            ticks >>= 7;
        }
        len
    }

    /// Reads a variable-length quantity from the front of `bytes`.
    ///
    /// Returns the delta time and the number of bytes consumed, or `None`
    /// if the quantity is unterminated or does not fit in 32 bits.
    pub fn decode(bytes: &[u8]) -> Option<(Self, usize)> {
        let mut value: u64 = 0;
        for (i, byte) in bytes.iter().take(MAX_VLQ_LEN).enumerate() {
            value = (value << 7) | (byte & 0x7F) as u64;
            if byte & 0x80 == 0 {
                let ticks = u32::try_from(value).ok()?;
                return Some((Self(ticks), i + 1));
            }
        }
        None
    }
}

impl From<u32> for DeltaTime {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Option<u32>> for DeltaTime {
    fn from(value: Option<u32>) -> Self {
        Self(value.unwrap_or_default())
    }
}

impl From<DeltaTime> for u32 {
    fn from(value: DeltaTime) -> Self {
        value.0
    }
}

#[test]
fn encode_known_values() {
    use pretty_assertions::assert_eq;
    assert_eq!(DeltaTime::new(0).encode(), [0x00]);
    assert_eq!(DeltaTime::new(127).encode(), [0x7F]);
    assert_eq!(DeltaTime::new(128).encode(), [0x81, 0x00]);
    assert_eq!(DeltaTime::new(0x2000).encode(), [0xC0, 0x00]);
    assert_eq!(DeltaTime::new(0x3FFF).encode(), [0xFF, 0x7F]);
    assert_eq!(DeltaTime::new(0x4000).encode(), [0x81, 0x80, 0x00]);
    assert_eq!(
        DeltaTime::new(0x0FFF_FFFF).encode(),
        [0xFF, 0xFF, 0xFF, 0x7F]
    );
    assert_eq!(
        DeltaTime::new(u32::MAX).encode(),
        [0x8F, 0xFF, 0xFF, 0xFF, 0x7F]
    );
}

#[test]
fn absent_time_is_zero() {
    use pretty_assertions::assert_eq;
    assert_eq!(DeltaTime::from(None).encode(), [0x00]);
    assert_eq!(DeltaTime::default(), DeltaTime::ZERO);
}

#[test]
fn decode_rejects_unterminated() {
    assert_eq!(DeltaTime::decode(&[]), None);
    assert_eq!(DeltaTime::decode(&[0x81]), None);
    let too_long = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
    assert_eq!(DeltaTime::decode(&too_long), None);
}

#[test]
fn decode_reports_consumed_bytes() {
    assert_eq!(
        DeltaTime::decode(&[0x81, 0x00, 0x90]),
        Some((DeltaTime::new(128), 2))
    );
}

#[test]
fn encode_decode_range() {
    for ticks in 0..=2_000_000 {
        let delta = DeltaTime::new(ticks);
        let bytes = delta.encode();
        assert_eq!(bytes.len(), delta.encoded_len());
        assert_eq!(DeltaTime::decode(&bytes), Some((delta, bytes.len())));
    }
}
