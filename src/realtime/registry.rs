//! Match room membership and broadcast fan-out.
//!
//! Each connection owns a bounded outbound queue; rooms hold the sending
//! halves, so a broadcast only enqueues and never waits on a slow socket.
//! A member whose queue is full misses the frame instead of growing it.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Opaque identity of a live realtime connection
pub type ConnectionId = Uuid;

/// Pre-serialized outbound message shared by every recipient
pub type Frame = Arc<str>;

/// Frames a connection may have queued before further broadcasts skip it
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

struct Connection {
    tx: mpsc::Sender<Frame>,
    rooms: DashSet<String>,
    closed: AtomicBool,
}

/// Registry of match rooms and the connections joined to them
///
/// Constructed once per server process and shared by handle; tests can build
/// as many isolated registries as they need.
pub struct MatchRoomRegistry {
    connections: DashMap<ConnectionId, Arc<Connection>>,
    rooms: DashMap<String, HashMap<ConnectionId, mpsc::Sender<Frame>>>,
    queue_capacity: usize,
}

impl MatchRoomRegistry {
    pub fn new() -> Self {
        Self::with_queue_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(queue_capacity: usize) -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
            queue_capacity: queue_capacity.max(1),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Register a new connection and hand back its outbound queue
    pub fn connect(&self) -> (ConnectionId, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let id = Uuid::new_v4();
        self.connections.insert(
            id,
            Arc::new(Connection {
                tx,
                rooms: DashSet::new(),
                closed: AtomicBool::new(false),
            }),
        );
        info!(connection = %id, "Connection registered");
        (id, rx)
    }

    /// Add a connection to a room, creating the room on first join
    ///
    /// Returns `false` when the connection was already a member or is no
    /// longer registered.
    pub fn join(&self, connection_id: &ConnectionId, room: &str) -> bool {
        // Clone out so no connection shard guard is held while locking rooms.
        let Some(connection) = self.connections.get(connection_id).map(|c| Arc::clone(&c)) else {
            debug!(connection = %connection_id, %room, "Ignoring join by unknown connection");
            return false;
        };

        if !connection.rooms.insert(room.to_string()) {
            return false;
        }
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(*connection_id, connection.tx.clone());

        // A concurrent disconnect may have swept this connection's rooms before
        // the insert above; back the membership out again if so.
        if connection.closed.load(Ordering::SeqCst) {
            self.leave(connection_id, room);
            return false;
        }

        debug!(connection = %connection_id, %room, "Connection joined room");
        true
    }

    /// Deliver `frame` to every current member of `room`
    ///
    /// Returns the number of members the frame was queued for. The room guard
    /// is held exclusively while enqueueing, so every member observes a
    /// room's broadcasts in the same order. Members whose queue is full are
    /// skipped for this frame.
    pub fn broadcast(&self, room: &str, frame: Frame) -> usize {
        let Some(members) = self.rooms.get_mut(room) else {
            debug!(%room, "Broadcast to empty room");
            return 0;
        };

        let mut delivered = 0;
        for (connection_id, tx) in members.iter() {
            match tx.try_send(Arc::clone(&frame)) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(connection = %connection_id, %room, "Outbound queue full, dropping frame");
                }
                Err(TrySendError::Closed(_)) => {}
            }
        }

        debug!(%room, delivered, members = members.len(), "Broadcast queued");
        delivered
    }

    /// Remove a connection from every room it joined
    ///
    /// Safe to call repeatedly and concurrently with broadcasts.
    pub fn disconnect(&self, connection_id: &ConnectionId) {
        let Some((_, connection)) = self.connections.remove(connection_id) else {
            return;
        };

        connection.closed.store(true, Ordering::SeqCst);
        for room in connection.rooms.iter() {
            self.leave(connection_id, room.key());
        }
        info!(connection = %connection_id, "Connection unregistered");
    }

    fn leave(&self, connection_id: &ConnectionId, room: &str) {
        if let Some(mut members) = self.rooms.get_mut(room) {
            members.remove(connection_id);
        }
        self.rooms.remove_if(room, |_, members| members.is_empty());
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of connections currently in `room`
    pub fn member_count(&self, room: &str) -> usize {
        self.rooms.get(room).map(|members| members.len()).unwrap_or(0)
    }

    /// Rooms a connection currently belongs to
    pub fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<String> {
        self.connections
            .get(connection_id)
            .map(|c| c.rooms.iter().map(|r| r.key().clone()).collect())
            .unwrap_or_default()
    }
}

impl Default for MatchRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
