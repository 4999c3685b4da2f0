#![doc = r#"
Pitches and note names

A [`Pitch`] is the 7-bit key number carried by note events. A [`NoteName`]
spells it as a letter, optional accidentals and an octave, with `c4` = 60.
"#]

use alloc::{
    format,
    string::{String, ToString},
};
use core::{fmt, str::FromStr};

use crate::{MidiError, MidiResult};

#[doc = r#"
A MIDI pitch, interpreted as a 7-bit number.

Each value corresponds to some [`Key`] and [`Octave`].

[`Pitch`] `0` is `c-1`, [`Pitch`] `60` is `c4` (middle C), and [`Pitch`] `127` is `g9`.

# Example
```rust
# use midix_smf::prelude::*;

let pitch = Pitch::new(63).unwrap();

assert_eq!(pitch.key(), Key::DSharp);
assert_eq!(pitch.octave(), Octave::new(4));
assert_eq!(pitch.to_note(false).as_str(), "d#4");
assert_eq!(pitch.to_note(true).as_str(), "eb4");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch(u8);

impl Pitch {
    /// Middle C
    pub const MIDDLE_C: Self = Self(60);

    /// Create a new pitch.
    ///
    /// # Errors
    /// if the byte is > 127
    pub const fn new(byte: u8) -> MidiResult<Self> {
        if byte > 127 {
            return Err(MidiError::PitchOutOfRange(byte as i32));
        }
        Ok(Self(byte))
    }

    /// Create a pitch from a key and octave.
    ///
    /// # Errors
    /// if the pair lies outside `c-1..=g9`.
    pub const fn from_key_octave(key: Key, octave: Octave) -> MidiResult<Self> {
        let value = (octave.value() as i16 + 1) * 12 + key.semitone() as i16;
        if value < 0 || value > 127 {
            return Err(MidiError::PitchOutOfRange(value as i32));
        }
        Ok(Self(value as u8))
    }

    /// Identifies the key of the pitch
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_semitone(self.0 % 12)
    }

    /// Identifies the octave of the pitch
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave((self.0 / 12) as i8 - 1)
    }

    /// Returns the underlying byte of the pitch
    #[inline]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// Spell this pitch as a note name.
    ///
    /// When `flatten` is set, the five sharp spellings are replaced with
    /// their flat enharmonics (`c#4` becomes `db4`).
    pub fn to_note(&self, flatten: bool) -> NoteName {
        pitch_to_note(*self, flatten)
    }
}

impl TryFrom<u8> for Pitch {
    type Error = MidiError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pitch> for u8 {
    fn from(value: Pitch) -> Self {
        value.0
    }
}

impl FromStr for Pitch {
    type Err = MidiError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        note_to_pitch(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_note(false))
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
One of the twelve semitones of an octave, spelled with sharps.

# Example
```rust
# use midix_smf::prelude::*;

let pitch = Key::FSharp.with_octave(Octave::new(4)).unwrap();

assert_eq!(pitch.byte(), 66);
assert_eq!(Key::FSharp.name(), "f#");
assert_eq!(Key::FSharp.flat_name(), Some("gb"));
```
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

const SHARP_NAMES: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];

impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub const fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Identify the key from its offset within an octave. Wraps past 11.
    pub const fn from_semitone(semitone: u8) -> Self {
        use Key::*;
        match semitone % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Offset of this key from C, `0..=11`
    pub const fn semitone(&self) -> u8 {
        *self as u8
    }

    /// The natural key for a lowercase letter `a` through `g`.
    pub const fn from_letter(letter: u8) -> Option<Self> {
        use Key::*;
        Some(match letter {
            b'c' => C,
            b'd' => D,
            b'e' => E,
            b'f' => F,
            b'g' => G,
            b'a' => A,
            b'b' => B,
            _ => return None,
        })
    }

    /// Lowercase name with a sharp where needed
    pub const fn name(&self) -> &'static str {
        SHARP_NAMES[*self as usize]
    }

    /// The flat spelling of a sharp key, `None` for naturals.
    pub const fn flat_name(&self) -> Option<&'static str> {
        use Key::*;
        match self {
            CSharp => Some("db"),
            DSharp => Some("eb"),
            FSharp => Some("gb"),
            GSharp => Some("ab"),
            ASharp => Some("bb"),
            _ => None,
        }
    }

    /// Create a [`Pitch`] given this key and a provided [`Octave`]
    pub const fn with_octave(self, octave: Octave) -> MidiResult<Pitch> {
        Pitch::from_key_octave(self, octave)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[doc = r#"
Identifies the octave of a [`Pitch`]. MIDI pitches span octaves -1 to 9.
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Any octave number. Only `-1..=9` produce valid pitches.
    pub const fn new(octave: i8) -> Self {
        Self(octave)
    }

    /// The octave number
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[doc = r#"
A symbolic note name such as `c4`, `c#4`, `eb-1`.

The grammar is a lowercase letter `a`-`g`, an optional run of `#` or `b`
accidentals, and a base-10 octave that may be negative.
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteName(String);

impl NoteName {
    /// Wraps a note name without checking it. Use [`NoteName::pitch`] to validate.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse this name into a pitch
    pub fn pitch(&self) -> MidiResult<Pitch> {
        note_to_pitch(&self.0)
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<&str> for NoteName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Converts a note name (`c4`) to its MIDI pitch (`60`).
///
/// A run of `#` raises the letter by one semitone and a run of `b` lowers it
/// by one; repeated accidentals are not accumulated.
///
/// # Errors
/// [`MidiError::InvalidNoteName`] if the name does not follow the grammar or
/// names a pitch outside `0..=127`.
///
/// # Example
/// ```rust
/// # use midix_smf::prelude::*;
/// assert_eq!(note_to_pitch("c4").unwrap().byte(), 60);
/// assert_eq!(note_to_pitch("c#4").unwrap().byte(), 61);
/// assert!(note_to_pitch("h4").is_err());
/// ```
pub fn note_to_pitch(name: &str) -> MidiResult<Pitch> {
    let invalid = || MidiError::InvalidNoteName(name.to_string());
    let bytes = name.as_bytes();

    let (&letter, rest) = bytes.split_first().ok_or_else(invalid)?;
    let key = Key::from_letter(letter).ok_or_else(invalid)?;

    let (accidental, digits) = match rest.first() {
        Some(b'#') => (1, trim_run(rest, b'#')),
        // a flat lowers by one, matching the spelling of `pitch_to_note(_, true)`
        Some(b'b') => (-1, trim_run(rest, b'b')),
        _ => (0, rest),
    };

    let unsigned = digits.strip_prefix(b"-").unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    // digits are ascii, so this slice is valid utf-8
    let octave: i32 = name[name.len() - digits.len()..]
        .parse()
        .map_err(|_| invalid())?;

    let pitch = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|p| p.checked_add(key.semitone() as i32 + accidental))
        .ok_or_else(invalid)?;

    u8::try_from(pitch)
        .ok()
        .and_then(|p| Pitch::new(p).ok())
        .ok_or_else(invalid)
}

fn trim_run(bytes: &[u8], symbol: u8) -> &[u8] {
    let run = bytes.iter().take_while(|&&b| b == symbol).count();
    &bytes[run..]
}

/// Converts a MIDI pitch (`61`) to its note name (`c#4`, or `db4` when flattened).
pub fn pitch_to_note(pitch: Pitch, flatten: bool) -> NoteName {
    let key = pitch.key();
    let name = match key.flat_name() {
        Some(flat) if flatten => flat,
        _ => key.name(),
    };
    NoteName(format!("{}{}", name, pitch.octave()))
}

#[doc = r#"
Anything that can name a pitch: a [`Pitch`], a raw byte, or a note name.

# Example
```rust
# use midix_smf::prelude::*;
assert_eq!(ensure_pitch(Some("c4".into())).unwrap(), Pitch::MIDDLE_C);
assert_eq!(ensure_pitch(Some(60u8.into())).unwrap(), Pitch::MIDDLE_C);
assert_eq!(ensure_pitch(None), Err(MidiError::NilInput));
```
"#]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PitchSource<'a> {
    /// An already validated pitch
    Pitch(Pitch),
    /// A byte that still needs its range checked
    Byte(u8),
    /// A note name that still needs parsing
    Name(&'a str),
}

impl PitchSource<'_> {
    /// Normalize this source into a [`Pitch`]
    pub fn resolve(self) -> MidiResult<Pitch> {
        match self {
            Self::Pitch(p) => Ok(p),
            Self::Byte(b) => Pitch::new(b),
            Self::Name(n) => note_to_pitch(n),
        }
    }
}

impl From<Pitch> for PitchSource<'_> {
    fn from(value: Pitch) -> Self {
        Self::Pitch(value)
    }
}

impl From<u8> for PitchSource<'_> {
    fn from(value: u8) -> Self {
        Self::Byte(value)
    }
}

impl<'a> From<&'a str> for PitchSource<'a> {
    fn from(value: &'a str) -> Self {
        Self::Name(value)
    }
}

impl<'a> From<&'a NoteName> for PitchSource<'a> {
    fn from(value: &'a NoteName) -> Self {
        Self::Name(value.as_str())
    }
}

/// Normalize a pitch or note name into a [`Pitch`].
///
/// # Errors
/// [`MidiError::NilInput`] when no value is given, otherwise whatever
/// [`PitchSource::resolve`] reports.
pub fn ensure_pitch(value: Option<PitchSource<'_>>) -> MidiResult<Pitch> {
    value.ok_or(MidiError::NilInput)?.resolve()
}

#[test]
fn parse_note_names() {
    use pretty_assertions::assert_eq;
    let byte = |name: &str| note_to_pitch(name).map(|p| p.byte());

    assert_eq!(byte("c4"), Ok(60));
    assert_eq!(byte("c#4"), Ok(61));
    assert_eq!(byte("c###4"), Ok(61));
    assert_eq!(byte("db4"), Ok(61));
    assert_eq!(byte("bb3"), Ok(58));
    assert_eq!(byte("eb4"), Ok(63));
    assert_eq!(byte("b3"), Ok(59));
    assert_eq!(byte("a4"), Ok(69));
    assert_eq!(byte("c-1"), Ok(0));
    assert_eq!(byte("g9"), Ok(127));
    assert_eq!(byte("c10"), Err(MidiError::InvalidNoteName("c10".into())));
    assert_eq!(byte("cb-1"), Err(MidiError::InvalidNoteName("cb-1".into())));
}

#[test]
fn reject_malformed_note_names() {
    for name in ["", "c", "h4", "C4", "c#b4", "c4x", "#4", "c-", "c+4", "c 4"] {
        assert_eq!(
            note_to_pitch(name),
            Err(MidiError::InvalidNoteName(name.to_string())),
            "{name:?} should not parse"
        );
    }
}

#[test]
fn spell_pitches() {
    use pretty_assertions::assert_eq;
    let p = |b| Pitch::new(b).unwrap();

    assert_eq!(pitch_to_note(p(60), false), "c4");
    assert_eq!(pitch_to_note(p(61), false), "c#4");
    assert_eq!(pitch_to_note(p(61), true), "db4");
    assert_eq!(pitch_to_note(p(64), true), "e4");
    assert_eq!(pitch_to_note(p(0), false), "c-1");
    assert_eq!(pitch_to_note(p(23), false), "b0");
    assert_eq!(pitch_to_note(p(127), false), "g9");
}

#[test]
fn natural_names_round_trip() {
    for letter in ["c", "d", "e", "f", "g", "a", "b"] {
        for octave in 0..=8 {
            let name = format!("{letter}{octave}");
            let pitch = note_to_pitch(&name).unwrap();
            assert_eq!(pitch_to_note(pitch, false).as_str(), name);
        }
    }
}

#[test]
fn every_pitch_round_trips() {
    for byte in 0..=127 {
        let pitch = Pitch::new(byte).unwrap();
        for flatten in [false, true] {
            let name = pitch_to_note(pitch, flatten);
            assert_eq!(name.pitch(), Ok(pitch), "{name} did not parse back");
        }
    }
}

#[test]
fn pitch_from_key_and_octave() {
    use pretty_assertions::assert_eq;
    for byte in 0..=127 {
        let pitch = Pitch::new(byte).unwrap();
        let (key, octave) = (pitch.key(), pitch.octave());
        assert_eq!(Pitch::from_key_octave(key, octave), Ok(pitch));
    }
    for (semitone, key) in Key::all().into_iter().enumerate() {
        assert_eq!(key.semitone() as usize, semitone);
        assert_eq!(Key::from_semitone(semitone as u8 + 12), key);
    }
    assert_eq!(
        Key::GSharp.with_octave(Octave::new(9)),
        Err(MidiError::PitchOutOfRange(128))
    );
    assert_eq!(
        Key::C.with_octave(Octave::new(-2)),
        Err(MidiError::PitchOutOfRange(-12))
    );
    assert!(Pitch::new(128).is_err());
}

#[test]
fn ensure_pitch_sources() {
    use pretty_assertions::assert_eq;
    let name = NoteName::from("c4");
    assert_eq!(ensure_pitch(None), Err(MidiError::NilInput));
    assert_eq!(
        ensure_pitch(Some(Pitch::MIDDLE_C.into())),
        Ok(Pitch::MIDDLE_C)
    );
    assert_eq!(ensure_pitch(Some((&name).into())), Ok(Pitch::MIDDLE_C));
    assert_eq!(
        ensure_pitch(Some(200u8.into())),
        Err(MidiError::PitchOutOfRange(200))
    );
}
