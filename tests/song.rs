use midix_smf::prelude::*;
use pretty_assertions::assert_eq;

/// Walks the body of a track chunk and returns each event's delta and status byte.
fn walk_track(mut body: &[u8]) -> Vec<(u32, u8)> {
    let mut out = Vec::new();
    while !body.is_empty() {
        let (delta, read) = DeltaTime::decode(body).expect("valid delta time");
        body = &body[read..];
        let status = body[0];
        let len = match status {
            0xFF => 3 + body[2] as usize,
            // zero second params are dropped on the wire, which the
            // builder only does for program changes here
            0xC0 => 2,
            _ => 3,
        };
        out.push((delta.ticks(), status));
        body = &body[len..];
    }
    out
}

fn scale() -> Result<MidiFile, MidiError> {
    let name = MetaEvent::new(None, MetaKind::TrackName, Some("lead".into()))?;
    let mut lead = Track::new();
    lead.push(name).tempo(200, None)?;
    lead.instrument(DEFAULT_CHANNEL, 73, None)?;
    for name in ["c4", "d4", "e4", "f4", "g4", "a4", "b4", "c5"] {
        lead.note(DEFAULT_CHANNEL, name, DEFAULT_DURATION, None, 0)?;
    }

    let mut pad = Track::new();
    pad.instrument(1, 89, None)?
        .chord(1, ["c3", "eb3", "g3"], 4 * DEFAULT_DURATION, 70)?;

    let mut file = MidiFile::new(0)?;
    file.push_track(lead).push_track(pad);
    Ok(file)
}

#[test]
fn build_a_scale() {
    let file = scale().unwrap();
    assert_eq!(file.format_type(), FormatType::Simultaneous);
    assert_eq!(file.tracks()[0].len(), 3 + 16);
    assert_eq!(file.tracks()[1].len(), 1 + 6);

    let bytes = file.to_bytes();
    let header_end = 14;
    let lead_len = u32::from_be_bytes(bytes[18..22].try_into().unwrap()) as usize;
    let lead = &bytes[header_end + 8..header_end + 8 + lead_len];

    let events = walk_track(lead);
    assert_eq!(events[0], (0, 0xFF));
    assert_eq!(events[1], (0, 0xFF));
    assert_eq!(events[2], (0, 0xC0));
    for pair in events[3..19].chunks(2) {
        assert_eq!(pair, &[(0, 0x90), (DEFAULT_DURATION, 0x80)]);
    }
    assert_eq!(events.last(), Some(&(0, 0xFF)));
}

#[test]
fn pad_chord_spelling() {
    let file = scale().unwrap();
    let pitches: Vec<String> = file.tracks()[1]
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::Channel(c) if c.kind() == Some(ChannelEventKind::NoteOn) => {
                Some(Pitch::new(c.param1()).unwrap().to_note(true).to_string())
            }
            _ => None,
        })
        .collect();
    assert_eq!(pitches, ["c3", "eb3", "g3"]);
}

#[test]
fn builder_can_be_resumed_after_an_error() {
    let mut track = Track::new();
    track.note(0, "c4", 10, None, 0).unwrap();

    let err = track.note(0, "q4", 10, None, 0).unwrap_err();
    assert_eq!(err, MidiError::InvalidNoteName("q4".into()));

    track.note(0, "d4", 10, None, 0).unwrap();
    assert_eq!(track.len(), 4);
}

#[test]
fn ensure_pitch_feeds_events() {
    let pitch = ensure_pitch(Some("f#2".into())).unwrap();
    let event = ChannelEvent::new(Some(0), ChannelEventKind::NoteOn, 0, pitch.byte(), 1).unwrap();
    assert_eq!(event.to_bytes(), [0x00, 0x90, 42, 0x01]);
}
