//! Section-addressed and flat queue indices.
//!
//! Two addressing schemes coexist. Callers that know which section they are
//! editing build a [`QueueIndex`] directly. Swipe-through surfaces (stage,
//! mini-bar) see one flat list spanning `history + active + up_next` and
//! address it with a single integer; the user queue is not reachable that
//! way. A flat index is only meaningful against the snapshot it was resolved
//! from.

use crate::state::QueueState;

/// Address of one queue slot within a specific [`QueueState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueIndex {
    /// Zero-based offset into the history section, oldest first.
    History(usize),
    /// The currently active item.
    Active,
    /// Zero-based offset into the user queue.
    UserQueue(usize),
    /// Zero-based offset into the up-next section.
    UpNext(usize),
}

impl QueueState {
    /// Number of flat-addressable slots (`history + active + up_next`).
    pub fn flat_len(&self) -> usize {
        self.history.len() + usize::from(self.active.is_some()) + self.up_next.len()
    }

    /// Resolve a raw flat position into a section-addressed index.
    ///
    /// Raw positions come straight from UI gestures and race against queue
    /// mutations, so an out-of-range (or negative) value is a recoverable
    /// miss, not a fault.
    pub fn index_at_flat(&self, raw: i64) -> Option<QueueIndex> {
        let raw = usize::try_from(raw).ok()?;
        let history_len = self.history.len();
        if raw < history_len {
            return Some(QueueIndex::History(raw));
        }
        if raw == history_len && self.active.is_some() {
            return Some(QueueIndex::Active);
        }
        let offset = raw.checked_sub(history_len + 1)?;
        if offset < self.up_next.len() {
            return Some(QueueIndex::UpNext(offset));
        }
        None
    }

    /// Flat position of a section-addressed index, when it has one.
    ///
    /// `UserQueue` slots are never flat-addressable; stale indices yield
    /// `None`.
    pub fn flat_position(&self, index: &QueueIndex) -> Option<usize> {
        match *index {
            QueueIndex::History(pos) => (pos < self.history.len()).then_some(pos),
            QueueIndex::Active => self.active.as_ref().map(|_| self.history.len()),
            QueueIndex::UserQueue(_) => None,
            QueueIndex::UpNext(pos) => {
                (pos < self.up_next.len()).then(|| self.history.len() + 1 + pos)
            }
        }
    }
}
