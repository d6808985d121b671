//! Realtime match-room chat relay.
//!
//! ```text
//! websocket client ──> gateway::run_connection ──> dispatch
//!                                                    │
//!                         MatchRoomRegistry (DashMap rooms, per-connection queues)
//!                                                    │
//! websocket client <── outbound queue <───────── broadcast
//! ```

pub mod gateway;
pub mod protocol;
pub mod registry;

pub use gateway::{dispatch, run_connection, ConnectionContext, Dispatched, GatewayError};
pub use protocol::{ChatPayload, ClientEvent, RoomRef, ServerEvent};
pub use registry::{ConnectionId, Frame, MatchRoomRegistry};
