use alloc::{string::ToString, vec::Vec};
use core::{fmt, ops::Deref};

use crate::{MidiError, MidiResult};

#[doc = r#"
Serialized MIDI bytes.

Every `to_bytes` in this crate returns [`Codes`]. They deref to `[u8]` and
display as lowercase hex, which makes them easy to compare and to log.

# Example
```rust
# use midix_smf::prelude::*;
let codes = Codes::from_hex("4d54726b", 0).unwrap();
assert_eq!(codes, *b"MTrk");
assert_eq!(codes.to_string(), "4d54726b");

// left-pad to a fixed width
assert_eq!(Codes::from_hex("c", 2).unwrap(), [0x00, 0x0C]);
```
"#]
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Codes(Vec<u8>);

impl Codes {
    /// Decodes a string of hex digits.
    ///
    /// The string is padded with leading `0` nibbles until it decodes to at
    /// least `final_bytes` bytes, so odd-length strings are accepted.
    ///
    /// # Errors
    /// [`MidiError::InvalidHex`] if a character is not a hex digit, or if
    /// `final_bytes` is too large to pad to
    pub fn from_hex(hex: &str, final_bytes: usize) -> MidiResult<Self> {
        let digits = hex
            .bytes()
            .map(nibble)
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| MidiError::InvalidHex(hex.to_string()))?;

        let wanted = final_bytes
            .checked_mul(2)
            .ok_or_else(|| MidiError::InvalidHex(hex.to_string()))?;
        let padded_len = digits.len().max(wanted);
        let padded_len = padded_len + padded_len % 2;
        let padding = padded_len - digits.len();

        let bytes = core::iter::repeat_n(0, padding)
            .chain(digits)
            .collect::<Vec<u8>>()
            .chunks_exact(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect();
        Ok(Self(bytes))
    }

    /// Returns the inner byte vector
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Returns the bytes as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Deref for Codes {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Codes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Codes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<Codes> for Vec<u8> {
    fn from(value: Codes) -> Self {
        value.0
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Codes {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.0 == other
    }
}

impl PartialEq<[u8]> for Codes {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<Vec<u8>> for Codes {
    fn eq(&self, other: &Vec<u8>) -> bool {
        &self.0 == other
    }
}

impl fmt::Display for Codes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[test]
fn hex_display() {
    use pretty_assertions::assert_eq;
    let codes = Codes::from(alloc::vec![0x00, 0xFF, 0x2F, 0x00]);
    assert_eq!(alloc::format!("{codes}"), "00ff2f00");
    assert_eq!(alloc::format!("{}", Codes::default()), "");
}

#[test]
fn hex_decode() {
    use pretty_assertions::assert_eq;
    assert_eq!(Codes::from_hex("", 0).unwrap(), [0u8; 0]);
    assert_eq!(Codes::from_hex("", 2).unwrap(), [0x00, 0x00]);
    assert_eq!(Codes::from_hex("0a", 4).unwrap(), [0, 0, 0, 0x0A]);
    assert_eq!(Codes::from_hex("ABC", 0).unwrap(), [0x0A, 0xBC]);
    assert_eq!(Codes::from_hex("123456", 2).unwrap(), [0x12, 0x34, 0x56]);
    assert_eq!(
        Codes::from_hex("zz", 0),
        Err(MidiError::InvalidHex("zz".into()))
    );
}

#[test]
fn hex_padding_overflow() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Codes::from_hex("0", usize::MAX / 2 + 1),
        Err(MidiError::InvalidHex("0".into()))
    );
}
