//! Per-slot queue items.
//!
//! A queue slot needs identity of its own: the same track can sit in up-next
//! and the user queue at the same time, and each occurrence must be
//! addressable and movable independently.

use play_queue_types::Track;
use uuid::Uuid;

/// Unique identity of one queue slot, distinct from the track's catalog id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One entry in the playback queue. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueItem {
    instance_id: InstanceId,
    track: Track,
    user_queued: bool,
}

impl QueueItem {
    /// Item derived from the loaded source content (album/playlist tracks).
    pub fn sourced(track: Track) -> Self {
        Self {
            instance_id: InstanceId::new(),
            track,
            user_queued: false,
        }
    }

    /// Item inserted via an explicit "play next" enqueue.
    pub fn enqueued(track: Track) -> Self {
        Self {
            instance_id: InstanceId::new(),
            track,
            user_queued: true,
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// `true` when the item entered the queue through "play next".
    ///
    /// Drives attribution labels like "Playing from Queue".
    pub fn is_user_queued(&self) -> bool {
        self.user_queued
    }
}
