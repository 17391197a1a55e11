//! Playback queue core for a media-player client.
//!
//! Models "what plays next" as four ordered sections (history, active item,
//! user queue, up-next) with random access, play-next insertion, reordering,
//! and forward/backward navigation. Every mutation commits one immutable
//! [`QueueState`] snapshot and broadcasts it to any number of observers;
//! no consumer ever sees a torn or stale view.
//!
//! Catalog lookups sit behind the [`ContentResolver`] trait; audio output,
//! persistence, and UI all live outside this crate.

pub mod engine;
pub mod index;
pub mod item;
pub mod observe;
pub mod resolver;
pub mod state;

pub use engine::{LoadOutcome, PlaybackQueue};
pub use index::QueueIndex;
pub use item::{InstanceId, QueueItem};
pub use observe::{StateBus, Subscription};
pub use resolver::{ContentResolver, ResolveError};
pub use state::QueueState;

#[cfg(test)]
pub(crate) mod testing {
    use crate::item::QueueItem;
    use play_queue_types::{Track, TrackId};

    pub(crate) fn track(id: &str) -> Track {
        Track {
            id: TrackId::from(id),
            title: format!("title-{id}"),
            artists: vec!["artist".to_string()],
            artwork_url: None,
            stream_url: format!("https://media.example/{id}"),
            duration_ms: Some(180_000),
        }
    }

    pub(crate) fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    pub(crate) fn sourced_items(ids: &[&str]) -> Vec<QueueItem> {
        ids.iter().map(|id| QueueItem::sourced(track(id))).collect()
    }

    pub(crate) fn track_ids(items: &[QueueItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| item.track().id.to_string())
            .collect()
    }
}
