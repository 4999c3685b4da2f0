use midix_smf::prelude::*;
use pretty_assertions::assert_eq;

/// Splits serialized bytes into `(magic, body)` chunks, checking every length prefix.
fn chunks(mut bytes: &[u8]) -> Vec<([u8; 4], &[u8])> {
    let mut out = Vec::new();
    while !bytes.is_empty() {
        let magic: [u8; 4] = bytes[..4].try_into().unwrap();
        let len = u32::from_be_bytes(bytes[4..8].try_into().unwrap()) as usize;
        out.push((magic, &bytes[8..8 + len]));
        bytes = &bytes[8 + len..];
    }
    out
}

#[test]
fn empty_file_is_format_zero() {
    let file = MidiFile::new(0).unwrap();
    assert_eq!(
        file.to_bytes(),
        [
            b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, // header
            0x00, 0x00, // format 0
            0x00, 0x00, // no tracks
            0x00, 0x80, // 128 ticks per beat
        ]
    );
}

#[test]
fn single_track_file() {
    let mut file = MidiFile::new(96).unwrap();
    file.push_track(Track::new());

    assert_eq!(
        file.to_bytes(),
        [
            b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, //
            0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
            b'M', b'T', b'r', b'k', 0x00, 0x00, 0x00, 0x04, //
            0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn multiple_tracks_use_format_one() {
    let mut file = MidiFile::new(32767).unwrap();
    file.push_track(Track::new())
        .push_track(Track::new())
        .add_track(None);
    assert_eq!(file.format_type(), FormatType::Simultaneous);

    let bytes = file.to_bytes();
    assert_eq!(&bytes[8..14], &[0x00, 0x01, 0x00, 0x03, 0x7F, 0xFF]);

    let chunks = chunks(&bytes);
    assert_eq!(chunks.len(), 4);
    for (magic, body) in &chunks[1..] {
        assert_eq!(magic, b"MTrk");
        assert_eq!(*body, END_OF_TRACK);
    }
}

#[test]
fn tracks_are_written_in_order() {
    let name = MetaEvent::new(None, MetaKind::TrackName, Some("one".into())).unwrap();
    let mut first = Track::new();
    first.push(name);
    let mut second = Track::new();
    second.note(2, "a4", 10, Some(5), 64).unwrap();

    let file = MidiFile::with_tracks(0, vec![first, second]).unwrap();
    let bytes = file.to_bytes();
    let chunks = chunks(&bytes);

    assert_eq!(chunks[0].0, *b"MThd");
    assert_eq!(chunks[0].1, &[0x00, 0x01, 0x00, 0x02, 0x00, 0x80]);
    assert_eq!(
        chunks[1].1,
        &[
            0x00, 0xFF, 0x0A, 0x03, b'o', b'n', b'e', 0x00, 0xFF, 0x2F, 0x00,
        ]
    );
    assert_eq!(
        chunks[2].1,
        &[
            0x05, 0x90, 69, 64, 0x0A, 0x80, 69, 64, 0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn appending_after_serializing() {
    let mut file = MidiFile::new(0).unwrap();
    file.push_track(Track::new());
    let before = file.to_bytes();

    file.push_track(Track::new());
    let after = file.to_bytes();

    assert_eq!(&before[8..10], &[0x00, 0x00]);
    assert_eq!(&after[8..10], &[0x00, 0x01]);
    assert_eq!(after.len(), before.len() + 12);
}

#[test]
fn file_bytes_display_as_hex() {
    let file = MidiFile::new(0).unwrap();
    assert_eq!(file.to_bytes().to_string(), "4d54686400000006000000000080");
}

#[cfg(feature = "std")]
#[test]
fn save_appends_extension() {
    let dir = std::env::temp_dir().join(format!("midix-smf-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut file = MidiFile::new(0).unwrap();
    file.push_track(Track::new());

    let saved = file.save(dir.join("song")).unwrap();
    assert_eq!(saved, dir.join("song.mid"));
    assert_eq!(std::fs::read(&saved).unwrap(), file.to_bytes().into_inner());

    let saved = file.save(dir.join("again.mid")).unwrap();
    assert_eq!(saved, dir.join("again.mid"));

    std::fs::remove_dir_all(&dir).unwrap();
}
