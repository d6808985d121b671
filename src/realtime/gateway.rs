//! Binds inbound realtime events to room registry operations and drives
//! each websocket connection from accept to disconnect.

use actix_ws::{CloseReason, Message, MessageStream, Session};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::auth::Principal;
use crate::config::RealtimeSettings;
use crate::realtime::protocol::{ClientEvent, ServerEvent};
use crate::realtime::registry::{ConnectionId, Frame, MatchRoomRegistry};

/// Reasons an inbound event is dropped
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("event carries no room identifier")]
    MissingRoom,

    #[error("failed to encode outbound event: {0}")]
    Encode(#[source] serde_json::Error),
}

/// What a successfully handled event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Joined { room: String, newly_joined: bool },
    Broadcast { room: String, delivered: usize },
}

/// Apply one raw inbound frame to the registry
pub fn dispatch(
    rooms: &MatchRoomRegistry,
    connection: &ConnectionId,
    raw: &[u8],
) -> Result<Dispatched, GatewayError> {
    match serde_json::from_slice::<ClientEvent>(raw)? {
        ClientEvent::Join(room) => {
            let room = room.room_id();
            if room.is_empty() {
                return Err(GatewayError::MissingRoom);
            }
            let newly_joined = rooms.join(connection, room);
            Ok(Dispatched::Joined {
                room: room.to_string(),
                newly_joined,
            })
        }
        ClientEvent::Message(payload) => {
            let room = payload.room_id().ok_or(GatewayError::MissingRoom)?.to_string();
            let frame: Frame = serde_json::to_string(&ServerEvent::Message(payload))
                .map_err(GatewayError::Encode)?
                .into();
            let delivered = rooms.broadcast(&room, frame);
            Ok(Dispatched::Broadcast { room, delivered })
        }
    }
}

fn handle_frame(rooms: &MatchRoomRegistry, connection: &ConnectionId, principal: &Principal, raw: &[u8]) {
    match dispatch(rooms, connection, raw) {
        Ok(Dispatched::Joined { room, newly_joined }) => {
            debug!(%connection, subject = %principal.subject, %room, newly_joined, "Joined room");
        }
        Ok(Dispatched::Broadcast { room, delivered }) => {
            debug!(%connection, subject = %principal.subject, %room, delivered, "Relayed chat message");
        }
        Err(e) => {
            warn!(%connection, subject = %principal.subject, error = %e, "Dropped realtime event");
        }
    }
}

/// Everything a connection task needs besides the socket halves
pub struct ConnectionContext {
    pub rooms: Arc<MatchRoomRegistry>,
    pub connection: ConnectionId,
    pub principal: Principal,
    pub settings: RealtimeSettings,
}

/// Drive one websocket until either side closes or the client times out
///
/// The connection is removed from every room on every exit path.
pub async fn run_connection(
    ctx: ConnectionContext,
    mut session: Session,
    mut inbound: MessageStream,
    mut outbound: mpsc::Receiver<Frame>,
) {
    let ConnectionContext {
        rooms,
        connection,
        principal,
        settings,
    } = ctx;

    let period = Duration::from_secs(settings.heartbeat_interval_secs.max(1));
    let client_timeout = Duration::from_secs(settings.client_timeout_secs);
    let send_timeout = Duration::from_secs(settings.send_timeout_secs.max(1));
    let mut heartbeat = interval_at(Instant::now() + period, period);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_seen = Instant::now();

    info!(%connection, subject = %principal.subject, "Realtime connection accepted");

    let close_reason: Option<CloseReason> = loop {
        tokio::select! {
            biased;

            frame = outbound.recv() => {
                let Some(frame) = frame else { break None };
                match timeout(send_timeout, session.text(frame.to_string())).await {
                    Ok(Ok(())) => {}
                    Ok(Err(_)) => break None,
                    Err(_) => {
                        warn!(%connection, "Socket write timed out");
                        break None;
                    }
                }
            }

            msg = inbound.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        last_seen = Instant::now();
                        handle_frame(&rooms, &connection, &principal, text.as_bytes());
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        last_seen = Instant::now();
                        handle_frame(&rooms, &connection, &principal, &bytes);
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        last_seen = Instant::now();
                        if session.pong(&bytes).await.is_err() {
                            break None;
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        last_seen = Instant::now();
                    }
                    Some(Ok(Message::Close(reason))) => break reason,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(%connection, error = %e, "Websocket protocol error");
                        break None;
                    }
                    None => break None,
                }
            }

            _ = heartbeat.tick() => {
                if last_seen.elapsed() > client_timeout {
                    info!(%connection, "Realtime client timed out");
                    break None;
                }
                if !matches!(timeout(send_timeout, session.ping(b"")).await, Ok(Ok(()))) {
                    break None;
                }
            }
        }
    };

    rooms.disconnect(&connection);
    if let Err(e) = session.close(close_reason).await {
        debug!(%connection, error = %e, "Session already closed");
    }

    info!(%connection, subject = %principal.subject, "Realtime connection closed");
}
