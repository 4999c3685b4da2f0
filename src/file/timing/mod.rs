use crate::{MidiError, MidiResult};

/// Ticks per beat used when a file is created with `0`
pub const DEFAULT_TICKS: u16 = 128;

/// The highest resolution a header can carry; the top bit is reserved for SMPTE timing.
pub const MAX_TICKS: u16 = 0x7FFF;

#[doc = r#"
How many ticks make up one quarter note, for every track in a file.

# Example
```rust
# use midix_smf::prelude::*;
assert_eq!(TicksPerBeat::new(0).unwrap().get(), 128);
assert_eq!(TicksPerBeat::new(480).unwrap().to_be_bytes(), [0x01, 0xE0]);
assert_eq!(TicksPerBeat::new(32768), Err(MidiError::InvalidTicks(32768)));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerBeat(u16);

impl TicksPerBeat {
    /// Validates a tick rate.
    ///
    /// `0` selects [`DEFAULT_TICKS`].
    ///
    /// # Errors
    /// [`MidiError::InvalidTicks`] unless `ticks` is `0..=32767`
    pub const fn new(ticks: i32) -> MidiResult<Self> {
        if ticks == 0 {
            return Ok(Self(DEFAULT_TICKS));
        }
        if ticks < 1 || ticks > MAX_TICKS as i32 {
            return Err(MidiError::InvalidTicks(ticks));
        }
        Ok(Self(ticks as u16))
    }

    /// The tick rate
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// The two bytes written in the file header
    pub const fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl Default for TicksPerBeat {
    fn default() -> Self {
        Self(DEFAULT_TICKS)
    }
}

impl TryFrom<i32> for TicksPerBeat {
    type Error = MidiError;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[test]
fn tick_bounds() {
    use pretty_assertions::assert_eq;
    assert_eq!(TicksPerBeat::new(0), Ok(TicksPerBeat(DEFAULT_TICKS)));
    assert_eq!(TicksPerBeat::new(1), Ok(TicksPerBeat(1)));
    assert_eq!(TicksPerBeat::new(32767), Ok(TicksPerBeat(MAX_TICKS)));
    for ticks in [-1, 32768, 0x10000] {
        let err = MidiError::InvalidTicks(ticks);
        assert_eq!(TicksPerBeat::new(ticks), Err(err));
    }
}
