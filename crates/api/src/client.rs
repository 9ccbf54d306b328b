//! Client-side operations: dashboard, RSVPs, tasks, plans, live location

use crate::backend::Backend;
use crate::ids::next_id;
use crate::seed;
use eventide_core::error::Result;
use eventide_core::records::{
    Booking, ClientDashboard, ClientData, DashboardMetric, Guest, GuestStatus, LocationPing, Plan,
    RsvpStatus, Task, TaskStatus,
};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection};
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Chart palette for computed budget categories
const METRIC_COLORS: [&str; 6] = [
    "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6", "#6366f1",
];

impl Backend {
    /// Assemble the client dashboard for `user_id`
    ///
    /// Budget metrics and totals are computed from the caller's counted
    /// bookings (accepted, confirmed or completed). When no such bookings
    /// exist yet the seeded demo metrics are shown instead. The guest list
    /// is seeded lazily on first read.
    pub fn client_dashboard(&self, user_id: &str) -> Result<ClientDashboard> {
        let data: ClientData = self.store.get(Collection::ClientData, ClientData::default())?;
        let all_bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        let projects = self.store.get(Collection::Projects, Vec::new())?;
        let guests = self.ensure_guests()?;

        let bookings: Vec<Booking> = all_bookings
            .into_iter()
            .filter(|b| b.client_id.as_deref() == Some(user_id))
            .collect();
        let counted: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.status.counts_toward_revenue())
            .collect();

        let total_spent: i64 = counted.iter().map(|b| b.agreed_price).sum();
        let metrics = if counted.is_empty() {
            data.metrics.clone()
        } else {
            budget_by_category(&counted)
        };
        let vendors_hired = counted
            .iter()
            .map(|b| b.provider_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let confirmed_guests = guests
            .iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .count();
        let pending_tasks = data
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .count();

        Ok(ClientDashboard {
            metrics,
            total_spent,
            confirmed_guests,
            vendors_hired,
            pending_tasks,
            upcoming_tasks: data.tasks,
            rsvps: data.rsvps,
            bookings,
            projects,
            guests,
        })
    }

    fn ensure_guests(&self) -> Result<Vec<Guest>> {
        let guests: Vec<Guest> = self.store.get(Collection::Guests, Vec::new())?;
        if !guests.is_empty() || self.store.contains(Collection::Guests)? {
            return Ok(guests);
        }
        let seeded = seed::guests();
        debug!(count = seeded.len(), "seeding guest list");
        self.store.set(Collection::Guests, &seeded)?;
        Ok(seeded)
    }

    /// Record or clear the caller's RSVP for an event
    ///
    /// `None` withdraws the RSVP. Publishes `CLIENT_UPDATE`.
    pub fn update_rsvp(&self, event_id: &str, status: Option<RsvpStatus>) -> Result<()> {
        let mut data: ClientData =
            self.store.get(Collection::ClientData, ClientData::default())?;
        match status {
            Some(status) => {
                data.rsvps.insert(event_id.to_string(), status);
            }
            None => {
                data.rsvps.remove(event_id);
            }
        }
        self.store.set(Collection::ClientData, &data)?;
        self.publish(Channel::Client, &json!({ "eventId": event_id }));
        Ok(())
    }

    /// Add a to-do item to the client dashboard
    pub fn add_task(&self, title: &str) -> Result<Task> {
        let task = Task {
            id: next_id("task"),
            title: title.to_string(),
            status: TaskStatus::Pending,
            date: Utc::now().format("%b %d").to_string(),
        };
        let mut data: ClientData =
            self.store.get(Collection::ClientData, ClientData::default())?;
        data.tasks.insert(0, task.clone());
        self.store.set(Collection::ClientData, &data)?;
        self.publish(Channel::Client, &json!({ "taskId": task.id }));
        Ok(task)
    }

    /// Mark a task completed or pending
    pub fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<()> {
        let mut data: ClientData =
            self.store.get(Collection::ClientData, ClientData::default())?;
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| eventide_core::Error::not_found("task", task_id))?;
        task.status = status;
        self.store.set(Collection::ClientData, &data)?;
        self.publish(Channel::Client, &json!({ "taskId": task_id }));
        Ok(())
    }

    /// Create a private plan around an event
    pub fn create_plan(&self, event_id: &str, name: &str, friends: Vec<String>) -> Result<Plan> {
        let plan = Plan {
            id: next_id("plan"),
            event_id: event_id.to_string(),
            name: name.to_string(),
            friends,
            status: "active".to_string(),
            created_at: now_rfc3339(),
        };
        let mut plans: Vec<Plan> = self.store.get(Collection::ClientPlans, Vec::new())?;
        plans.push(plan.clone());
        self.store.set(Collection::ClientPlans, &plans)?;
        self.publish(Channel::Client, &json!({ "planId": plan.id }));
        Ok(plan)
    }

    /// All private plans
    pub fn plans(&self) -> Result<Vec<Plan>> {
        self.store.get(Collection::ClientPlans, Vec::new())
    }

    /// Broadcast a live-location ping
    ///
    /// Ephemeral by design: the ping is published on `LOCATION_UPDATE` and
    /// never persisted.
    pub fn update_location(&self, ping: &LocationPing) -> Result<()> {
        self.relay.publish(Channel::Location, ping)
    }
}

/// Group counted bookings into budget slices, one per category
fn budget_by_category(counted: &[&Booking]) -> Vec<DashboardMetric> {
    let mut by_category: BTreeMap<&str, i64> = BTreeMap::new();
    for booking in counted {
        let category = booking.category.as_deref().unwrap_or("Other");
        *by_category.entry(category).or_default() += booking.agreed_price;
    }
    by_category
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| DashboardMetric {
            name: name.to_string(),
            value,
            color: METRIC_COLORS[i % METRIC_COLORS.len()].to_string(),
        })
        .collect()
}
