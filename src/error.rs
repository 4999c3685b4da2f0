use alloc::string::String;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while constructing events, tracks, and files.

Every error is produced at construction time. Once a value exists, turning it
into bytes cannot fail.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MidiError {
    /// Channels are numbered 0-15
    #[error("Channel {0} is out of range (0-15)")]
    ChannelOutOfRange(i32),
    /// The status byte is not one of the seven channel event kinds
    #[error("Unknown channel event kind {0:#04X}")]
    UnknownEventKind(u8),
    /// The byte does not identify a supported meta event
    #[error("Unknown meta event kind {0:#04X}")]
    UnknownMetaKind(u8),
    /// A meta event was given no usable payload
    #[error("Meta event payload must be bytes, text or a timing value")]
    InvalidPayloadType,
    /// The note name doesn't follow `letter[accidentals]octave`
    #[error("Invalid note name {0:?}")]
    InvalidNoteName(String),
    /// Ticks per beat must fit in 15 bits
    #[error("Ticks per beat must be an integer between 1 and 32767, got {0}")]
    InvalidTicks(i32),
    /// A value was required but none was given
    #[error("A value was required, but none was provided")]
    NilInput,
    /// Pitches are 7-bit values
    #[error("Pitch {0} is out of range (0-127)")]
    PitchOutOfRange(i32),
    /// A file header can count at most 65535 tracks
    #[error("A file holds at most 65535 tracks, got {0}")]
    TooManyTracks(usize),
    /// Tempo conversions divide by their input
    #[error("Tempo must be greater than zero")]
    InvalidTempo,
    /// The string could not be decoded as hexadecimal
    #[error("Invalid hex string {0:?}")]
    InvalidHex(String),
}

/// The result type for everything that validates its input.
pub type MidiResult<T> = Result<T, MidiError>;

impl MidiError {
    /// True if the error was caused by a bad channel or event kind
    pub const fn is_channel_event_error(&self) -> bool {
        matches!(self, Self::ChannelOutOfRange(_) | Self::UnknownEventKind(_))
    }

    /// True if the error was caused by a bad meta kind or payload
    pub const fn is_meta_event_error(&self) -> bool {
        matches!(self, Self::UnknownMetaKind(_) | Self::InvalidPayloadType)
    }
}

#[test]
fn error_messages() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    assert_eq!(
        MidiError::UnknownEventKind(0x00).to_string(),
        "Unknown channel event kind 0x00"
    );
    assert_eq!(
        MidiError::ChannelOutOfRange(16).to_string(),
        "Channel 16 is out of range (0-15)"
    );
    assert!(MidiError::InvalidPayloadType.is_meta_event_error());
    assert!(!MidiError::NilInput.is_channel_event_error());
}
