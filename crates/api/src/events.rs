//! Event catalog operations

use crate::backend::Backend;
use crate::ids::next_id;
use eventide_core::error::{Error, Result};
use eventide_core::records::{EventRecord, EventStatus};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection};
use serde_json::json;

impl Backend {
    /// The full catalog, sorted by date ascending
    pub fn events(&self) -> Result<Vec<EventRecord>> {
        let mut events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    /// One event by id
    pub fn event(&self, event_id: &str) -> Result<EventRecord> {
        let events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        events
            .into_iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::not_found("event", event_id))
    }

    /// Add an event to the catalog
    ///
    /// Assigns an id and creation timestamp when the draft leaves them
    /// empty. Publishes `CLIENT_UPDATE`.
    pub fn create_event(&self, mut event: EventRecord) -> Result<EventRecord> {
        if event.title.trim().is_empty() {
            return Err(Error::MissingField("title"));
        }
        if event.id.is_empty() {
            event.id = next_id("event");
        }
        if event.created_at.is_none() {
            event.created_at = Some(now_rfc3339());
        }
        let mut events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        events.push(event.clone());
        self.store.set(Collection::Events, &events)?;
        self.publish(Channel::Client, &json!({ "eventId": event.id }));
        Ok(event)
    }

    /// Replace an existing event
    pub fn update_event(&self, event: EventRecord) -> Result<EventRecord> {
        let mut events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        let slot = events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| Error::not_found("event", event.id.clone()))?;
        *slot = event.clone();
        self.store.set(Collection::Events, &events)?;
        self.publish(Channel::Client, &json!({ "eventId": event.id }));
        Ok(event)
    }

    /// Mark an event cancelled; the record stays in the catalog
    pub fn cancel_event(&self, event_id: &str) -> Result<EventRecord> {
        let mut events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::not_found("event", event_id))?;
        event.status = EventStatus::Cancelled;
        let updated = event.clone();
        self.store.set(Collection::Events, &events)?;
        self.publish(Channel::Client, &json!({ "eventId": event_id }));
        Ok(updated)
    }
}
