//! Bus: cross-context frame delivery
//!
//! The bus connects relays that live in different contexts. Frames are
//! queued on a channel and delivered by a dedicated background thread, so
//! cross-context delivery is asynchronous with respect to the publisher.
//! Frames are never echoed back to the relay that published them.
//!
//! The delivery thread holds only weak references to attached relays, so
//! dropping a relay detaches it; dead entries are pruned as frames flow.
//! Dropping the last bus handle closes the queue and joins the thread.

use crate::relay::RelayShared;
use eventide_core::types::Channel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// One broadcast message as carried between contexts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    /// Context that published the frame; delivery skips this context
    pub origin: Uuid,
    /// Channel the frame was published on
    pub channel: Channel,
    /// The published payload
    pub payload: Value,
}

enum BusMessage {
    Frame(Frame),
    /// Barrier: reply once every frame queued before it has been delivered
    Flush(Sender<()>),
}

struct Registry {
    relays: Mutex<Vec<Weak<RelayShared>>>,
}

impl Registry {
    /// Deliver `frame` to every live relay except its origin, pruning dead
    /// entries along the way
    ///
    /// The registry lock is released before dispatch, so a callback may
    /// attach a relay or query the bus without wedging the delivery thread.
    fn deliver(&self, frame: &Frame) {
        let live: Vec<Arc<RelayShared>> = {
            let mut relays = self.relays.lock();
            relays.retain(|weak| weak.strong_count() > 0);
            relays.iter().filter_map(Weak::upgrade).collect()
        };
        for shared in live {
            if shared.context_id != frame.origin {
                shared.dispatch(frame.channel, &frame.payload);
            }
        }
    }
}

struct BusInner {
    tx: Mutex<Option<Sender<BusMessage>>>,
    registry: Arc<Registry>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for BusInner {
    fn drop(&mut self) {
        // Closing the sender ends the delivery loop.
        self.tx.lock().take();
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Cross-context broadcast bus
///
/// Cheap-clone handle; all clones feed the same delivery thread. Attach a
/// relay with [`Relay::attached`](crate::Relay::attached).
#[derive(Clone)]
pub struct Bus {
    inner: Arc<BusInner>,
}

impl Bus {
    /// Create a bus and start its delivery thread
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let registry = Arc::new(Registry {
            relays: Mutex::new(Vec::new()),
        });
        let handle = {
            let registry = registry.clone();
            thread::spawn(move || delivery_loop(rx, registry))
        };
        Bus {
            inner: Arc::new(BusInner {
                tx: Mutex::new(Some(tx)),
                registry,
                handle: Mutex::new(Some(handle)),
            }),
        }
    }

    pub(crate) fn register(&self, shared: &Arc<RelayShared>) {
        let mut relays = self.inner.registry.relays.lock();
        relays.retain(|weak| weak.strong_count() > 0);
        relays.push(Arc::downgrade(shared));
        debug!(context = %shared.context_id, "relay attached to bus");
    }

    /// Queue `frame` for delivery to the other contexts
    pub(crate) fn forward(&self, frame: Frame) {
        let tx = self.inner.tx.lock();
        match tx.as_ref() {
            Some(tx) => {
                if tx.send(BusMessage::Frame(frame)).is_err() {
                    warn!("bus delivery thread gone, frame dropped");
                }
            }
            None => warn!("bus closed, frame dropped"),
        }
    }

    /// Number of live relays attached to this bus
    pub fn relay_count(&self) -> usize {
        let mut relays = self.inner.registry.relays.lock();
        relays.retain(|weak| weak.strong_count() > 0);
        relays.len()
    }

    /// Block until every frame queued so far has been delivered
    ///
    /// Delivery is normally fire-and-forget; this barrier exists so callers
    /// (and tests) can observe a quiescent bus deterministically.
    pub fn flush(&self) {
        let (reply_tx, reply_rx) = mpsc::channel();
        let sent = {
            let tx = self.inner.tx.lock();
            match tx.as_ref() {
                Some(tx) => tx.send(BusMessage::Flush(reply_tx)).is_ok(),
                None => false,
            }
        };
        if sent {
            let _ = reply_rx.recv();
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

fn delivery_loop(rx: Receiver<BusMessage>, registry: Arc<Registry>) {
    while let Ok(message) = rx.recv() {
        match message {
            BusMessage::Frame(frame) => {
                trace!(channel = %frame.channel, origin = %frame.origin, "delivering frame");
                registry.deliver(&frame);
            }
            BusMessage::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
    debug!("bus delivery thread exiting");
}
