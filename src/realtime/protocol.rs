//! Realtime event envelopes.
//!
//! Every frame is JSON shaped as `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Client → Server
// ============================================================================

/// Event sent from a client
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Request membership in a match room
    #[serde(rename = "chat:join", alias = "join-room")]
    Join(RoomRef),
    /// Relay a chat payload to every member of its room
    #[serde(rename = "chat:message", alias = "chat-message")]
    Message(ChatPayload),
}

/// Room reference: either a bare id or `{"matchId": ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    Id(String),
    Object {
        #[serde(rename = "matchId", alias = "roomId")]
        match_id: String,
    },
}

impl RoomRef {
    pub fn room_id(&self) -> &str {
        match self {
            RoomRef::Id(id) => id,
            RoomRef::Object { match_id } => match_id,
        }
    }
}

/// Chat payload, relayed exactly as the client sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatPayload(pub Map<String, Value>);

impl ChatPayload {
    /// Room the payload is addressed to: `matchId`, else `roomId`
    pub fn room_id(&self) -> Option<&str> {
        ["matchId", "roomId"].into_iter().find_map(|key| {
            self.0
                .get(key)
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
        })
    }
}

// ============================================================================
// Server → Client
// ============================================================================

/// Event sent to clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "chat:message")]
    Message(ChatPayload),
}
