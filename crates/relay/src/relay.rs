//! Relay: the per-context dispatcher
//!
//! A Relay owns the subscriber table for one context. Publishing dispatches
//! to local subscribers synchronously, then hands the frame to the attached
//! [`Bus`] (if any) for delivery to the other contexts.

use crate::bus::{Bus, Frame};
use eventide_core::error::Result;
use eventide_core::types::Channel;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};
use uuid::Uuid;

/// Subscriber callback
///
/// Receives a reference to the published payload. Must be `Send + Sync`
/// because cross-context frames are delivered from the bus thread.
pub type Callback = Box<dyn Fn(&Value) + Send + Sync>;

struct Entry {
    id: u64,
    callback: Callback,
}

pub(crate) struct RelayShared {
    /// Identifies this context in broadcast frames so the bus can skip
    /// echoing a frame back to its origin
    pub(crate) context_id: Uuid,
    subscribers: RwLock<HashMap<Channel, Vec<Arc<Entry>>>>,
    next_id: AtomicU64,
}

impl RelayShared {
    /// Invoke every current subscriber of `channel`, in subscription order
    ///
    /// The subscriber list is snapshotted before dispatch so a callback may
    /// subscribe or unsubscribe without deadlocking; such changes take
    /// effect from the next publish.
    pub(crate) fn dispatch(&self, channel: Channel, payload: &Value) {
        let snapshot: Vec<Arc<Entry>> = match self.subscribers.read().get(&channel) {
            Some(entries) => entries.clone(),
            None => return,
        };

        for entry in snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| (entry.callback)(payload)));
            if result.is_err() {
                warn!(
                    channel = %channel,
                    subscriber = entry.id,
                    "subscriber panicked, skipping"
                );
            }
        }
    }

    fn remove(&self, channel: Channel, id: u64) {
        let mut subscribers = self.subscribers.write();
        if let Some(entries) = subscribers.get_mut(&channel) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                subscribers.remove(&channel);
            }
        }
    }
}

/// A per-context publish/subscribe dispatcher
///
/// Cheap-clone handle; clones share the subscriber table. Create one relay
/// per context and attach relays that should see each other's messages to
/// the same [`Bus`]:
///
/// ```
/// use eventide_core::Channel;
/// use eventide_relay::{Bus, Relay};
///
/// let bus = Bus::new();
/// let tab_a = Relay::attached(&bus);
/// let tab_b = Relay::attached(&bus);
///
/// let _sub = tab_b.subscribe(Channel::Chat, |msg| {
///     println!("tab B saw: {msg}");
/// });
/// tab_a.publish(Channel::Chat, &"hello").unwrap();
/// bus.flush();
/// ```
#[derive(Clone)]
pub struct Relay {
    shared: Arc<RelayShared>,
    bus: Option<Bus>,
}

impl Relay {
    /// Create a standalone relay with no cross-context delivery
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a relay attached to `bus`
    ///
    /// Frames published here are fanned out to every other relay on the
    /// bus; frames from those relays are delivered to this one.
    pub fn attached(bus: &Bus) -> Self {
        Self::build(Some(bus.clone()))
    }

    fn build(bus: Option<Bus>) -> Self {
        let shared = Arc::new(RelayShared {
            context_id: Uuid::new_v4(),
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        });
        if let Some(bus) = &bus {
            bus.register(&shared);
        }
        Relay { shared, bus }
    }

    /// Identifier of this relay's context
    pub fn context_id(&self) -> Uuid {
        self.shared.context_id
    }

    /// Subscribe `callback` to `channel`
    ///
    /// Returns a [`Subscription`] handle; delivery continues until
    /// [`Subscription::unsubscribe`] is called. Subscribing the same
    /// callback twice yields two independent subscriptions, each invoked
    /// per publish.
    pub fn subscribe<F>(&self, channel: Channel, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .subscribers
            .write()
            .entry(channel)
            .or_default()
            .push(Arc::new(Entry {
                id,
                callback: Box::new(callback),
            }));
        debug!(channel = %channel, subscriber = id, "subscribed");
        Subscription {
            shared: Arc::downgrade(&self.shared),
            channel,
            id,
        }
    }

    /// Publish `payload` on `channel`
    ///
    /// Local subscribers run synchronously, in subscription order, before
    /// this returns. The frame is then queued on the attached bus for the
    /// other contexts. Publishing on a channel with no subscribers anywhere
    /// succeeds and delivers nothing.
    pub fn publish<T: Serialize>(&self, channel: Channel, payload: &T) -> Result<()> {
        let value = serde_json::to_value(payload)?;
        self.shared.dispatch(channel, &value);
        if let Some(bus) = &self.bus {
            bus.forward(Frame {
                origin: self.shared.context_id,
                channel,
                payload: value,
            });
        }
        Ok(())
    }

    /// Number of live subscriptions on `channel` in this context
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.shared
            .subscribers
            .read()
            .get(&channel)
            .map_or(0, |e| e.len())
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one subscription
///
/// Dropping the handle does NOT unsubscribe; delivery stops only on an
/// explicit [`unsubscribe`](Subscription::unsubscribe) (or when the relay
/// itself is dropped). This keeps fire-and-forget subscriptions alive
/// without forcing callers to stash handles.
#[derive(Debug)]
pub struct Subscription {
    shared: Weak<RelayShared>,
    channel: Channel,
    id: u64,
}

impl Subscription {
    /// Remove this subscription; idempotent
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove(self.channel, self.id);
            debug!(channel = %self.channel, subscriber = self.id, "unsubscribed");
        }
    }

    /// Channel this subscription listens on
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn recorder() -> (Arc<Mutex<Vec<Value>>>, impl Fn(&Value) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &Value| sink.lock().push(v.clone()))
    }

    #[test]
    fn publish_reaches_local_subscriber_synchronously() {
        let relay = Relay::new();
        let (seen, cb) = recorder();
        relay.subscribe(Channel::Chat, cb);

        relay.publish(Channel::Chat, &json!({"text": "hi"})).unwrap();
        assert_eq!(seen.lock().len(), 1);
        assert_eq!(seen.lock()[0]["text"], "hi");
    }

    #[test]
    fn publish_without_subscribers_is_ok() {
        let relay = Relay::new();
        relay.publish(Channel::Location, &json!({})).unwrap();
    }

    #[test]
    fn subscribers_fire_in_subscription_order() {
        let relay = Relay::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = order.clone();
            relay.subscribe(Channel::Vendor, move |_| order.lock().push(tag));
        }

        relay.publish(Channel::Vendor, &json!(null)).unwrap();
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn channels_are_independent() {
        let relay = Relay::new();
        let (chat_seen, chat_cb) = recorder();
        let (vendor_seen, vendor_cb) = recorder();
        relay.subscribe(Channel::Chat, chat_cb);
        relay.subscribe(Channel::Vendor, vendor_cb);

        relay.publish(Channel::Chat, &json!(1)).unwrap();
        assert_eq!(chat_seen.lock().len(), 1);
        assert_eq!(vendor_seen.lock().len(), 0);
    }

    #[test]
    fn duplicate_subscription_delivers_twice() {
        let relay = Relay::new();
        let count = Arc::new(Mutex::new(0u32));
        for _ in 0..2 {
            let count = count.clone();
            relay.subscribe(Channel::Client, move |_| *count.lock() += 1);
        }

        relay.publish(Channel::Client, &json!(null)).unwrap();
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let relay = Relay::new();
        let (seen, cb) = recorder();
        let sub = relay.subscribe(Channel::Chat, cb);

        relay.publish(Channel::Chat, &json!(1)).unwrap();
        sub.unsubscribe();
        relay.publish(Channel::Chat, &json!(2)).unwrap();

        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let relay = Relay::new();
        let (seen, cb) = recorder();
        let sub = relay.subscribe(Channel::Chat, cb);

        sub.unsubscribe();
        sub.unsubscribe();
        relay.publish(Channel::Chat, &json!(1)).unwrap();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn unsubscribe_leaves_other_subscribers() {
        let relay = Relay::new();
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();
        let sub_a = relay.subscribe(Channel::Chat, cb_a);
        relay.subscribe(Channel::Chat, cb_b);

        sub_a.unsubscribe();
        relay.publish(Channel::Chat, &json!(1)).unwrap();
        assert!(seen_a.lock().is_empty());
        assert_eq!(seen_b.lock().len(), 1);
    }

    #[test]
    fn dropping_handle_keeps_subscription() {
        let relay = Relay::new();
        let (seen, cb) = recorder();
        drop(relay.subscribe(Channel::Chat, cb));

        relay.publish(Channel::Chat, &json!(1)).unwrap();
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn panicking_subscriber_does_not_stop_delivery() {
        let relay = Relay::new();
        let (seen, cb) = recorder();
        relay.subscribe(Channel::Chat, |_| panic!("subscriber bug"));
        relay.subscribe(Channel::Chat, cb);

        relay.publish(Channel::Chat, &json!(1)).unwrap();
        assert_eq!(seen.lock().len(), 1);

        // The panicking subscriber stays registered and fails again next time.
        relay.publish(Channel::Chat, &json!(2)).unwrap();
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn subscriber_count_tracks_lifecycle() {
        let relay = Relay::new();
        assert_eq!(relay.subscriber_count(Channel::Vendor), 0);
        let sub = relay.subscribe(Channel::Vendor, |_| {});
        assert_eq!(relay.subscriber_count(Channel::Vendor), 1);
        sub.unsubscribe();
        assert_eq!(relay.subscriber_count(Channel::Vendor), 0);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let relay = Relay::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let count = Arc::new(Mutex::new(0u32));
        let sub = {
            let slot = slot.clone();
            let count = count.clone();
            relay.subscribe(Channel::Chat, move |_| {
                *count.lock() += 1;
                if let Some(sub) = slot.lock().take() {
                    sub.unsubscribe();
                }
            })
        };
        *slot.lock() = Some(sub);

        relay.publish(Channel::Chat, &json!(1)).unwrap();
        relay.publish(Channel::Chat, &json!(2)).unwrap();
        assert_eq!(*count.lock(), 1);
    }
}
