//! Messages exchanged between the two peers, and their JSON codec.

use crate::common::{CellPos, ShotResult};

/// One protocol message. Serialized as a JSON object tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "camelCase"))]
pub enum Message {
    /// Sender's fleet is placed and locked. `reply` is set when the sender
    /// had already received our `readyToPlay`.
    ReadyToPlay {
        #[cfg_attr(
            feature = "std",
            serde(default, skip_serializing_if = "core::ops::Not::not")
        )]
        reply: bool,
    },
    /// Hands the turn to the receiver.
    PassToken,
    /// Fire at a cell of the receiver's board.
    BombCell {
        #[cfg_attr(feature = "std", serde(rename = "cellPos"))]
        cell_pos: CellPos,
    },
    /// Defender's verdict on the last `BombCell`.
    BombResponse(ShotResult),
}

/// Encode a message as a JSON frame body.
#[cfg(feature = "std")]
pub fn encode(msg: &Message) -> Result<std::vec::Vec<u8>, serde_json::Error> {
    serde_json::to_vec(msg)
}

/// Decode a JSON frame body. Frames with a missing or unknown `type`, or
/// with malformed fields, yield `None`.
#[cfg(feature = "std")]
pub fn decode(frame: &[u8]) -> Option<Message> {
    match serde_json::from_slice(frame) {
        Ok(msg) => Some(msg),
        Err(e) => {
            log::debug!("dropping unrecognized frame: {}", e);
            None
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::common::ShipDescriptor;

    #[test]
    fn ready_to_play_omits_reply_when_unset() {
        let json = serde_json::to_string(&Message::ReadyToPlay { reply: false }).unwrap();
        assert_eq!(json, r#"{"type":"readyToPlay"}"#);
    }

    #[test]
    fn bomb_response_uses_camel_case_fields() {
        let msg = Message::BombResponse(ShotResult::sunk(
            CellPos::new(3, 5),
            ShipDescriptor {
                row: 3,
                column: 4,
                is_vertical: false,
                size: 2,
            },
            true,
        ));
        let value: serde_json::Value = serde_json::from_slice(&encode(&msg).unwrap()).unwrap();
        assert_eq!(value["type"], "bombResponse");
        assert_eq!(value["cellPos"]["row"], 3);
        assert_eq!(value["ship"]["isVertical"], false);
        assert_eq!(value["allSunk"], true);
    }
}
