use std::io::Cursor;
use std::sync::mpsc;
use std::time::Duration;

use super::*;
use crate::error::ProtocolError;
use crate::player::PlayerEvent;

#[test]
fn display_frame_decodes_section_and_content() {
    let frame = DisplayCommand::new(Section::Track, "3. Come Together").encode();
    assert_eq!(frame, "track|3. Come Together\r");

    let decoded = DisplayCommand::decode(&frame).unwrap();
    assert_eq!(decoded.section, Section::Track);
    assert_eq!(decoded.content, "3. Come Together");
}

#[test]
fn display_frame_splits_on_first_separator_only() {
    let decoded = DisplayCommand::decode("album|Live | Unplugged").unwrap();
    assert_eq!(decoded.section, Section::Album);
    assert_eq!(decoded.content, "Live | Unplugged");
}

#[test]
fn display_frame_without_separator_is_a_framing_error() {
    assert!(matches!(
        DisplayCommand::decode("garbage"),
        Err(ProtocolError::Framing(_))
    ));
    assert!(matches!(
        DisplayCommand::decode("volume|11"),
        Err(ProtocolError::UnknownSection(_))
    ));
}

#[test]
fn empty_content_is_valid() {
    let decoded = DisplayCommand::decode("time|\r").unwrap();
    assert_eq!(decoded.section, Section::Time);
    assert_eq!(decoded.content, "");
}

#[test]
fn line_breaks_in_content_cannot_end_a_frame() {
    let frame = DisplayCommand::new(Section::Artist, "Simon\r\nGarfunkel").encode();
    assert_eq!(frame, "artist|SimonGarfunkel\r");
}

#[test]
fn decoder_keeps_partial_frames_between_reads() {
    let mut decoder = FrameDecoder::new(DISPLAY_TERMINATOR);
    assert!(decoder.feed(b"player_st").is_empty());
    assert_eq!(decoder.pending(), 9);

    let frames = decoder.feed(b"atus|Playing\rtime|00:");
    assert_eq!(frames, vec!["player_status|Playing".to_string()]);

    let frames = decoder.feed(b"12/03:00\r");
    assert_eq!(frames, vec!["time|00:12/03:00".to_string()]);
    assert_eq!(decoder.pending(), 0);
}

#[test]
fn decoder_drops_oversized_frame_and_resyncs() {
    let mut decoder = FrameDecoder::new(DISPLAY_TERMINATOR);
    let flood = vec![b'x'; MAX_FRAME_LEN + 88];
    assert!(decoder.feed(&flood).is_empty());
    assert_eq!(decoder.pending(), 0);

    let frames = decoder.feed(b"yyy\rtrack|a\r");
    assert_eq!(frames, vec!["track|a".to_string()]);

    let exact = vec![b'z'; MAX_FRAME_LEN];
    let mut line = exact.clone();
    line.push(DISPLAY_TERMINATOR);
    let frames = decoder.feed(&line);
    assert_eq!(frames, vec![String::from_utf8(exact).unwrap()]);
}

#[test]
fn key_events_round_trip_through_json() {
    let line = KeyCommand::keypress(Key::PlayPause).encode();
    assert_eq!(line, "{\"event\":\"keypress\",\"key\":\"Play/Pause\"}\n");
    assert_eq!(KeyCommand::decode(&line).unwrap(), Some(Key::PlayPause));
}

#[test]
fn key_decoding_accepts_spaced_json_and_ignores_none() {
    assert_eq!(
        KeyCommand::decode(r#"{"event": "keypress", "key": "Eject"}"#).unwrap(),
        Some(Key::Eject)
    );
    assert_eq!(
        KeyCommand::decode(r#"{"event": "keypress", "key": "none"}"#).unwrap(),
        None
    );
    assert!(matches!(
        KeyCommand::decode(r#"{"event": "keypress", "key": "Shuffle"}"#),
        Err(ProtocolError::UnknownKey(_))
    ));
    assert!(matches!(
        KeyCommand::decode("{not json"),
        Err(ProtocolError::Json(_))
    ));
}

#[test]
fn key_listener_skips_bad_lines_and_forwards_keys() {
    let input = concat!(
        "{\"event\": \"keypress\", \"key\": \"Next\"}\n",
        "Error parsing garbage\n",
        "{\"event\": \"keypress\", \"key\": \"none\"}\n",
        "{\"event\": \"keypress\", \"key\": \"Prev\"}\n",
        "{\"event\": \"keypress\", \"key\": \"Eje",
    );
    let (tx, rx) = mpsc::channel();
    spawn_key_listener(Cursor::new(input.as_bytes().to_vec()), tx)
        .join()
        .unwrap();

    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![PlayerEvent::Key(Key::Next), PlayerEvent::Key(Key::Prev)]
    );
}

#[test]
fn display_listener_discards_framing_errors() {
    let input = "track|1. Intro\rnonsense\ralbum|Debut\r";
    let (tx, rx) = mpsc::channel();
    spawn_display_listener(Cursor::new(input.as_bytes().to_vec()), tx)
        .join()
        .unwrap();

    let commands: Vec<DisplayCommand> = rx.try_iter().collect();
    assert_eq!(
        commands,
        vec![
            DisplayCommand::new(Section::Track, "1. Intro"),
            DisplayCommand::new(Section::Album, "Debut"),
        ]
    );
}

#[test]
fn panel_link_announces_player_and_writes_frames() {
    let mut link = PanelLink::open(Vec::new(), Duration::ZERO).unwrap();
    link
        .write_command(&DisplayCommand::new(Section::Time, "00:01/03:00"))
        .unwrap();

    let written = String::from_utf8(link.get_ref().clone()).unwrap();
    assert_eq!(written, "player_status|Player OK\rtime|00:01/03:00\r");
}

#[test]
fn host_link_writes_key_lines() {
    let mut link = HostLink::new(Vec::new());
    link.send_key(Key::Next).unwrap();
    link.send_key(Key::Eject).unwrap();

    let written = String::from_utf8(link.get_ref().clone()).unwrap();
    assert_eq!(
        written,
        "{\"event\":\"keypress\",\"key\":\"Next\"}\n{\"event\":\"keypress\",\"key\":\"Eject\"}\n"
    );
}
