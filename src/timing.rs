use crate::{MidiError, MidiResult};

/// Microseconds in one minute
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

#[doc = r#"
A tempo value, either in microseconds per quarter note (MPQN) or beats per minute (BPM).

The two units are reciprocal, so the same conversion takes you both ways.

# Example
```rust
# use midix_smf::prelude::*;
let mpqn = Timing::new(200).mpqn_from_bpm().unwrap();
assert_eq!(mpqn, Timing::new(300_000));
assert_eq!(mpqn.bpm_from_mpqn().unwrap(), Timing::new(200));
```
"#]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing(u32);

impl Timing {
    /// Wrap a raw tempo value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Treating self as BPM, returns microseconds per quarter note.
    ///
    /// # Errors
    /// [`MidiError::InvalidTempo`] for zero BPM
    pub const fn mpqn_from_bpm(self) -> MidiResult<Self> {
        reciprocal(self)
    }

    /// Treating self as MPQN, returns beats per minute.
    ///
    /// # Errors
    /// [`MidiError::InvalidTempo`] for zero MPQN
    pub const fn bpm_from_mpqn(self) -> MidiResult<Self> {
        reciprocal(self)
    }
}

const fn reciprocal(value: Timing) -> MidiResult<Timing> {
    match MICROS_PER_MINUTE.checked_div(value.0) {
        Some(v) => Ok(Timing(v)),
        None => Err(MidiError::InvalidTempo),
    }
}

impl From<u32> for Timing {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Converts beats per minute to microseconds per quarter note.
pub const fn mpqn_from_bpm(bpm: Timing) -> MidiResult<Timing> {
    bpm.mpqn_from_bpm()
}

/// Converts microseconds per quarter note to beats per minute.
pub const fn bpm_from_mpqn(mpqn: Timing) -> MidiResult<Timing> {
    mpqn.bpm_from_mpqn()
}

#[test]
fn tempo_conversions() {
    use pretty_assertions::assert_eq;
    assert_eq!(mpqn_from_bpm(Timing::new(200)), Ok(Timing::new(300_000)));
    assert_eq!(bpm_from_mpqn(Timing::new(300_000)), Ok(Timing::new(200)));
    assert_eq!(mpqn_from_bpm(Timing::new(120)), Ok(Timing::new(500_000)));
    // floors
    assert_eq!(mpqn_from_bpm(Timing::new(7)), Ok(Timing::new(8_571_428)));
    assert_eq!(mpqn_from_bpm(Timing::new(0)), Err(MidiError::InvalidTempo));
    assert_eq!(bpm_from_mpqn(Timing::new(0)), Err(MidiError::InvalidTempo));
}
