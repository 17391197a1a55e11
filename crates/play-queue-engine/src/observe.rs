//! Replay-latest broadcast of immutable snapshots.
//!
//! Any number of independent consumers (mini-bar, stage, queue editor,
//! controls) observe the queue. Each new subscriber gets the current value
//! immediately, then every subsequent publish in commit order. Delivery is
//! per-subscriber and unbounded, so a slow observer never blocks the engine
//! and never causes another observer to skip a snapshot.

use std::sync::Mutex;

use tokio::sync::mpsc;

/// Multicast bus that replays the latest value to new subscribers.
pub struct StateBus<T: Clone> {
    inner: Mutex<BusInner<T>>,
}

struct BusInner<T> {
    latest: T,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone> StateBus<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(BusInner {
                latest: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// The most recently published value.
    pub fn latest(&self) -> T {
        self.inner.lock().unwrap().latest.clone()
    }

    /// Publish a new value to every live subscriber.
    ///
    /// Subscribers whose receiving half was dropped are pruned here.
    pub fn publish(&self, value: T) {
        let mut inner = self.inner.lock().unwrap();
        inner.latest = value.clone();
        inner
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Subscribe to the stream.
    ///
    /// The returned subscription yields the value current at subscription
    /// time first, then each later publish, in order and without gaps.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut inner = self.inner.lock().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        // Replay happens under the bus lock so no publish can slot in
        // between the snapshot and the registration.
        let _ = tx.send(inner.latest.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }
}

/// One consumer's view of a [`StateBus`] stream.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Receive the next value, waiting if none is pending.
    ///
    /// Returns `None` once the bus is dropped and the backlog is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Receive the next value if one is already pending.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
