#![doc = r#"
Build Standard MIDI Files byte by byte.

Events are collected into [`Track`](prelude::Track)s, tracks into a
[`MidiFile`](prelude::MidiFile), and the file is serialized to the exact
layout MIDI players read. Everything is validated when it is constructed;
serializing never fails.

# Example
```rust
use midix_smf::prelude::*;

# fn main() -> Result<(), MidiError> {
let mut track = Track::new();
track
    .push(MetaEvent::new(None, MetaKind::TrackName, Some("Lead".into()))?)
    .instrument(0, 0, None)?
    .note(0, "c4", 128, None, 0)?
    .note(0, "g4", 128, None, 0)?;

let mut file = MidiFile::new(0)?;
file.push_track(track);

let bytes = file.to_bytes();
assert_eq!(&bytes[..4], b"MThd");
# Ok(())
# }
```

# Features
- `std` (default): [`MidiFile::save`](prelude::MidiFile::save)
- `serde`: `Serialize`/`Deserialize` for the value types
- `tracing`: diagnostics for truncated payloads and serialized sizes
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod codes;
pub use codes::*;

mod delta;
pub use delta::*;

mod error;
pub use error::*;

pub mod file;

pub mod message;

pub mod note;

mod timing;
pub use timing::*;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        codes::*,
        delta::*,
        error::*,
        file::{meta::*, *},
        message::{Event, channel::*},
        note::*,
        timing::*,
    };
}
