//! Immutable queue snapshots.
//!
//! The engine never mutates a snapshot in place: every operation builds a new
//! `QueueState` and replaces the old one wholesale, so observers can hold and
//! compare snapshots without locking.

use crate::index::QueueIndex;
use crate::item::QueueItem;

/// One consistent snapshot of the playback queue.
///
/// Playback order is exactly `history` (oldest first), `active`,
/// `user_queue` (FIFO), then `up_next`. Either an active item is present or
/// every section is empty (the terminal "exhausted" state).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueueState {
    pub(crate) history: Vec<QueueItem>,
    pub(crate) active: Option<QueueItem>,
    pub(crate) user_queue: Vec<QueueItem>,
    pub(crate) up_next: Vec<QueueItem>,
}

impl QueueState {
    /// Previously active items, oldest first.
    pub fn history(&self) -> &[QueueItem] {
        &self.history
    }

    /// The item currently loaded for playback, if any.
    pub fn active(&self) -> Option<&QueueItem> {
        self.active.as_ref()
    }

    /// Items explicitly enqueued by the user; the head plays next.
    pub fn user_queue(&self) -> &[QueueItem] {
        &self.user_queue
    }

    /// Items derived from the loaded source, after the user queue drains.
    pub fn up_next(&self) -> &[QueueItem] {
        &self.up_next
    }

    /// Total item count across all four sections.
    pub fn len(&self) -> usize {
        self.history.len()
            + usize::from(self.active.is_some())
            + self.user_queue.len()
            + self.up_next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the item a section-addressed index points at.
    ///
    /// `None` when the index does not resolve against this snapshot.
    pub fn item_at(&self, index: &QueueIndex) -> Option<&QueueItem> {
        match *index {
            QueueIndex::History(pos) => self.history.get(pos),
            QueueIndex::Active => self.active.as_ref(),
            QueueIndex::UserQueue(pos) => self.user_queue.get(pos),
            QueueIndex::UpNext(pos) => self.up_next.get(pos),
        }
    }

    /// `true` when the active item came from the user queue.
    ///
    /// The top bar shows "Playing from Queue" instead of the source name in
    /// that case.
    pub fn active_is_user_queued(&self) -> bool {
        self.active.as_ref().is_some_and(QueueItem::is_user_queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sourced_items, track};

    #[test]
    fn default_state_is_empty() {
        let state = QueueState::default();

        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn len_counts_all_sections() {
        let state = QueueState {
            history: sourced_items(&["h0", "h1"]),
            active: Some(QueueItem::sourced(track("a"))),
            user_queue: vec![QueueItem::enqueued(track("q0"))],
            up_next: sourced_items(&["u0", "u1", "u2"]),
        };

        assert_eq!(state.len(), 7);
        assert!(!state.is_empty());
    }

    #[test]
    fn item_at_resolves_each_section() {
        let state = QueueState {
            history: sourced_items(&["h0"]),
            active: Some(QueueItem::sourced(track("a"))),
            user_queue: vec![QueueItem::enqueued(track("q0"))],
            up_next: sourced_items(&["u0"]),
        };

        assert_eq!(
            state.item_at(&QueueIndex::History(0)).unwrap().track().id,
            track("h0").id
        );
        assert_eq!(
            state.item_at(&QueueIndex::Active).unwrap().track().id,
            track("a").id
        );
        assert_eq!(
            state.item_at(&QueueIndex::UserQueue(0)).unwrap().track().id,
            track("q0").id
        );
        assert_eq!(
            state.item_at(&QueueIndex::UpNext(0)).unwrap().track().id,
            track("u0").id
        );
        assert!(state.item_at(&QueueIndex::History(1)).is_none());
        assert!(state.item_at(&QueueIndex::UpNext(7)).is_none());
    }

    #[test]
    fn active_is_user_queued_tracks_the_item_flag() {
        let mut state = QueueState {
            active: Some(QueueItem::enqueued(track("q0"))),
            ..QueueState::default()
        };
        assert!(state.active_is_user_queued());

        state.active = Some(QueueItem::sourced(track("a")));
        assert!(!state.active_is_user_queued());

        state.active = None;
        assert!(!state.active_is_user_queued());
    }
}
