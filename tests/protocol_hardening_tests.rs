use seabattle::protocol::{decode, encode};
use seabattle::{CellPos, Message, ShipDescriptor, ShotResult};

fn encoded(msg: &Message) -> String {
    String::from_utf8(encode(msg).unwrap()).unwrap()
}

#[test]
fn test_encodes_wire_shapes() {
    assert_eq!(encoded(&Message::PassToken), r#"{"type":"passToken"}"#);
    assert_eq!(
        encoded(&Message::ReadyToPlay { reply: true }),
        r#"{"type":"readyToPlay","reply":true}"#
    );
    assert_eq!(
        encoded(&Message::BombCell {
            cell_pos: CellPos::new(2, 3)
        }),
        r#"{"type":"bombCell","cellPos":{"row":2,"column":3}}"#
    );
    assert_eq!(
        encoded(&Message::BombResponse(ShotResult::miss(CellPos::new(1, 1)))),
        r#"{"type":"bombResponse","cellPos":{"row":1,"column":1},"hit":false}"#
    );
}

#[test]
fn test_decodes_peer_messages() {
    assert_eq!(
        decode(br#"{"type":"readyToPlay"}"#),
        Some(Message::ReadyToPlay { reply: false })
    );
    assert_eq!(decode(br#"{"type":"passToken"}"#), Some(Message::PassToken));
    assert_eq!(
        decode(br#"{"type":"bombCell","cellPos":{"row":4,"column":7}}"#),
        Some(Message::BombCell {
            cell_pos: CellPos::new(4, 7)
        })
    );
    assert_eq!(
        decode(br#"{"type":"bombResponse","cellPos":{"row":0,"column":0},"hit":true}"#),
        Some(Message::BombResponse(ShotResult::hit(CellPos::new(0, 0))))
    );
}

#[test]
fn test_decodes_sunk_response() {
    let frame = br#"{
        "type": "bombResponse",
        "cellPos": {"row": 1, "column": 0},
        "hit": true,
        "ship": {"row": 0, "column": 0, "isVertical": true, "size": 2},
        "allSunk": true
    }"#;
    let expected = ShotResult::sunk(
        CellPos::new(1, 0),
        ShipDescriptor {
            row: 0,
            column: 0,
            is_vertical: true,
            size: 2,
        },
        true,
    );
    assert_eq!(decode(frame), Some(Message::BombResponse(expected)));
}

#[test]
fn test_unrecognized_frames_are_dropped() {
    let frames: [&[u8]; 8] = [
        br#"{"type":"chat","text":"hi"}"#,
        br#"{"cellPos":{"row":1,"column":1}}"#,
        br#"{"type":"bombCell"}"#,
        br#"{"type":"bombCell","cellPos":{"row":-1,"column":0}}"#,
        br#"{"type":"bombResponse","cellPos":{"row":1,"column":1}}"#,
        br#""passToken""#,
        b"not json at all",
        &[0xff, 0x00, 0x13],
    ];
    for frame in frames {
        assert_eq!(decode(frame), None, "{:?}", String::from_utf8_lossy(frame));
    }
}

#[test]
fn test_unknown_fields_are_tolerated() {
    assert_eq!(
        decode(br#"{"type":"passToken","seq":12}"#),
        Some(Message::PassToken)
    );
}
