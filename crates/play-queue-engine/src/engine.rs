//! Playback queue engine.
//!
//! Owns the committed [`QueueState`] and the current source, applies every
//! mutation as a wholesale snapshot replacement, and republishes each new
//! snapshot (and source change) to all observers. Operations are total:
//! stale indices and forbidden targets degrade to a no-op or `false`, never
//! to an inconsistent state.

use std::sync::{Arc, Mutex};

use play_queue_types::{ContentRef, Track};
use tracing::debug;

use crate::index::QueueIndex;
use crate::item::QueueItem;
use crate::observe::{StateBus, Subscription};
use crate::resolver::{ContentResolver, ResolveError};
use crate::state::QueueState;

/// How a content load concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The resolved tracks were committed to the queue.
    Loaded,
    /// A newer load claimed the queue while this one was resolving; the
    /// result was discarded and nothing changed.
    Superseded,
}

/// The playback queue engine.
///
/// Mutations are expected from a single logical owner (the UI context) and
/// are synchronous apart from the resolver await inside [`load_content`];
/// observation is multi-reader and never blocks a mutation.
///
/// [`load_content`]: PlaybackQueue::load_content
pub struct PlaybackQueue {
    resolver: Arc<dyn ContentResolver>,
    core: Mutex<EngineCore>,
    state_bus: StateBus<QueueState>,
    source_bus: StateBus<Option<ContentRef>>,
}

struct EngineCore {
    state: QueueState,
    source: Option<ContentRef>,
    /// Bumped by every load-class operation; an in-flight resolver round
    /// trip commits only if its claimed epoch is still current.
    load_epoch: u64,
}

impl PlaybackQueue {
    pub fn new(resolver: Arc<dyn ContentResolver>) -> Self {
        Self {
            resolver,
            core: Mutex::new(EngineCore {
                state: QueueState::default(),
                source: None,
                load_epoch: 0,
            }),
            state_bus: StateBus::new(QueueState::default()),
            source_bus: StateBus::new(None),
        }
    }

    /// The most recently committed snapshot.
    pub fn state(&self) -> QueueState {
        self.core.lock().unwrap().state.clone()
    }

    /// The content the up-next section was derived from, if attributable.
    pub fn source(&self) -> Option<ContentRef> {
        self.core.lock().unwrap().source.clone()
    }

    /// Observe every committed snapshot, starting with the current one.
    pub fn observe_state(&self) -> Subscription<QueueState> {
        self.state_bus.subscribe()
    }

    /// Observe source changes, starting with the current source.
    pub fn observe_source(&self) -> Subscription<Option<ContentRef>> {
        self.source_bus.subscribe()
    }

    /// Load the queue from a content reference.
    ///
    /// The queue stays in its prior state until resolution completes. A
    /// newer `load_content`/`load_tracks`/`clear` call supersedes this one:
    /// the stale track list is discarded instead of applied. Resolver
    /// failure is surfaced to the caller and leaves the queue unchanged.
    pub async fn load_content(&self, content: ContentRef) -> Result<LoadOutcome, ResolveError> {
        let epoch = {
            let mut core = self.core.lock().unwrap();
            core.load_epoch += 1;
            core.load_epoch
        };

        let tracks = self.resolver.resolve(&content).await?;

        let mut core = self.core.lock().unwrap();
        if core.load_epoch != epoch {
            debug!(content = content.name(), "discarding superseded load result");
            return Ok(LoadOutcome::Superseded);
        }
        self.apply_load(&mut core, tracks, Some(content));
        Ok(LoadOutcome::Loaded)
    }

    /// Load the queue from an explicit track list, with an optional source
    /// attribution. Supersedes any resolver round trip still in flight.
    pub fn load_tracks(&self, tracks: Vec<Track>, source: Option<ContentRef>) {
        let mut core = self.core.lock().unwrap();
        core.load_epoch += 1;
        self.apply_load(&mut core, tracks, source);
    }

    /// Append a track to the tail of the user queue ("play next").
    ///
    /// Returns `false` from the exhausted state: with nothing active there
    /// is nothing the enqueue could play after, and only a load restarts
    /// playback.
    pub fn add_to_queue(&self, track: Track) -> bool {
        let mut core = self.core.lock().unwrap();
        if core.state.is_empty() {
            return false;
        }
        let mut next = core.state.clone();
        next.user_queue.push(QueueItem::enqueued(track));
        self.commit_state(&mut core, next);
        true
    }

    /// Advance to the next item: user-queue head first, then up-next head.
    ///
    /// Advancing past the last item exhausts the queue to the fully empty
    /// state. Returns `false` only when already exhausted.
    pub fn next(&self) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(next_state) = advanced(&core.state) else {
            return false;
        };
        if next_state.is_empty() {
            debug!("queue exhausted");
        }
        self.commit_state(&mut core, next_state);
        true
    }

    /// Step back to the most recent history item.
    ///
    /// The displaced active item is reinserted at the head of up-next; the
    /// user queue is never consumed or altered by backward navigation.
    /// Returns `false` when history is empty.
    pub fn previous(&self) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(next_state) = rewound(&core.state) else {
            return false;
        };
        self.commit_state(&mut core, next_state);
        true
    }

    /// Jump directly to the addressed item.
    ///
    /// Items passed in the direction of the jump are relocated exactly as
    /// repeated single steps would relocate them; skipped user-queue items
    /// are discarded. A stale index, or addressing the active item, is a
    /// no-op returning `false`.
    pub fn go_to(&self, index: QueueIndex) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(next_state) = jumped(&core.state, &index) else {
            return false;
        };
        self.commit_state(&mut core, next_state);
        true
    }

    /// Jump via a raw flat position (stage/mini-bar addressing).
    ///
    /// The raw position is resolved against the live state at the moment of
    /// the call, not whatever snapshot the gesture was computed from.
    pub fn go_to_flat(&self, raw: i64) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(index) = core.state.index_at_flat(raw) else {
            return false;
        };
        let Some(next_state) = jumped(&core.state, &index) else {
            return false;
        };
        self.commit_state(&mut core, next_state);
        true
    }

    /// Move an item within or across the user-queue and up-next sections.
    ///
    /// Endpoints addressing the active item or history are rejected, as are
    /// indices that no longer resolve against the live state.
    pub fn move_item(&self, from: QueueIndex, to: QueueIndex) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(next_state) = moved(&core.state, &from, &to) else {
            return false;
        };
        if next_state != core.state {
            self.commit_state(&mut core, next_state);
        }
        true
    }

    /// Remove a user-queue or up-next item (queue-editor delete).
    ///
    /// The active item and history cannot be removed this way.
    pub fn remove_item(&self, index: QueueIndex) -> bool {
        let mut core = self.core.lock().unwrap();
        let Some(next_state) = removed(&core.state, &index) else {
            return false;
        };
        self.commit_state(&mut core, next_state);
        true
    }

    /// Reset to the empty queue with no source.
    ///
    /// Also cancels interest in any in-flight load.
    pub fn clear(&self) {
        let mut core = self.core.lock().unwrap();
        core.load_epoch += 1;
        if !core.state.is_empty() {
            self.commit_state(&mut core, QueueState::default());
        }
        self.commit_source(&mut core, None);
    }

    fn apply_load(&self, core: &mut EngineCore, tracks: Vec<Track>, source: Option<ContentRef>) {
        let mut items = tracks.into_iter().map(QueueItem::sourced);
        let active = items.next();
        let state = QueueState {
            history: Vec::new(),
            active,
            user_queue: Vec::new(),
            up_next: items.collect(),
        };
        debug!(
            items = state.len(),
            source = source.as_ref().map(ContentRef::name),
            "queue loaded"
        );
        self.commit_state(core, state);
        self.commit_source(core, source);
    }

    fn commit_state(&self, core: &mut EngineCore, state: QueueState) {
        debug_assert!(state.active().is_some() || state.is_empty());
        core.state = state.clone();
        self.state_bus.publish(state);
    }

    fn commit_source(&self, core: &mut EngineCore, source: Option<ContentRef>) {
        if core.source != source {
            core.source = source.clone();
            self.source_bus.publish(source);
        }
    }
}

/// One forward step. `None` when already exhausted.
fn advanced(state: &QueueState) -> Option<QueueState> {
    if state.active.is_none() && state.user_queue.is_empty() && state.up_next.is_empty() {
        return None;
    }
    let mut next = state.clone();
    let incoming = if !next.user_queue.is_empty() {
        Some(next.user_queue.remove(0))
    } else if !next.up_next.is_empty() {
        Some(next.up_next.remove(0))
    } else {
        None
    };
    match incoming {
        Some(item) => {
            if let Some(active) = next.active.take() {
                next.history.push(active);
            }
            next.active = Some(item);
            Some(next)
        }
        // No successor anywhere: the queue exhausts to the terminal empty
        // state rather than keeping orphaned history around.
        None => Some(QueueState::default()),
    }
}

/// One backward step. `None` when history is empty.
fn rewound(state: &QueueState) -> Option<QueueState> {
    let mut next = state.clone();
    let Some(target) = next.history.pop() else {
        return None;
    };
    if let Some(active) = next.active.take() {
        next.up_next.insert(0, active);
    }
    next.active = Some(target);
    Some(next)
}

/// Direct jump. `None` for stale indices and for the active item itself.
fn jumped(state: &QueueState, index: &QueueIndex) -> Option<QueueState> {
    match *index {
        QueueIndex::Active => None,
        QueueIndex::History(pos) => {
            if pos >= state.history.len() {
                return None;
            }
            let mut next = state.clone();
            // Items pulled off history precede the displaced active at the
            // head of up-next, same as stepping back one item at a time.
            let mut pulled = next.history.split_off(pos);
            let target = pulled.remove(0);
            if let Some(active) = next.active.take() {
                pulled.push(active);
            }
            pulled.append(&mut next.up_next);
            next.up_next = pulled;
            next.active = Some(target);
            Some(next)
        }
        QueueIndex::UserQueue(pos) => {
            if pos >= state.user_queue.len() {
                return None;
            }
            let mut next = state.clone();
            if let Some(active) = next.active.take() {
                next.history.push(active);
            }
            // Skipped user-queue items were never played; they are dropped,
            // not pushed to history.
            let mut rest = next.user_queue.split_off(pos);
            next.active = Some(rest.remove(0));
            next.user_queue = rest;
            Some(next)
        }
        QueueIndex::UpNext(pos) => {
            if pos >= state.up_next.len() {
                return None;
            }
            let mut next = state.clone();
            if let Some(active) = next.active.take() {
                next.history.push(active);
            }
            let mut rest = next.up_next.split_off(pos);
            let target = rest.remove(0);
            // Passed up-next items land on history in playback order; the
            // user queue is flat-invisible and stays put.
            next.history.append(&mut next.up_next);
            next.up_next = rest;
            next.active = Some(target);
            Some(next)
        }
    }
}

/// Reorder within/across the editable sections. `None` on rejection.
fn moved(state: &QueueState, from: &QueueIndex, to: &QueueIndex) -> Option<QueueState> {
    let (from_user, from_pos) = editable_slot(from)?;
    let (to_user, to_pos) = editable_slot(to)?;
    // Both endpoints must resolve against the live state at commit time.
    if state.item_at(from).is_none() || state.item_at(to).is_none() {
        return None;
    }
    let mut next = state.clone();
    let item = if from_user {
        next.user_queue.remove(from_pos)
    } else {
        next.up_next.remove(from_pos)
    };
    let target = if to_user {
        &mut next.user_queue
    } else {
        &mut next.up_next
    };
    // Same-section moves shrink the section by one, which keeps the
    // pre-validated target position in bounds for the insert.
    target.insert(to_pos, item);
    Some(next)
}

/// Remove from an editable section. `None` on rejection.
fn removed(state: &QueueState, index: &QueueIndex) -> Option<QueueState> {
    let (user, pos) = editable_slot(index)?;
    let mut next = state.clone();
    let section = if user {
        &mut next.user_queue
    } else {
        &mut next.up_next
    };
    if pos >= section.len() {
        return None;
    }
    section.remove(pos);
    Some(next)
}

/// Split an index into (is-user-queue, position) when it addresses one of
/// the two sections reordering is allowed to touch.
fn editable_slot(index: &QueueIndex) -> Option<(bool, usize)> {
    match *index {
        QueueIndex::UserQueue(pos) => Some((true, pos)),
        QueueIndex::UpNext(pos) => Some((false, pos)),
        QueueIndex::History(_) | QueueIndex::Active => None,
    }
}
