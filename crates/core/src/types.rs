//! Catalog types for the Eventide backend
//!
//! This module defines the two fixed catalogs every layer agrees on:
//! - Collection: the storage keys of the persisted documents
//! - Channel: the realtime notification topics
//!
//! plus the role tag carried by every account and session document.
//!
//! Both catalogs are closed enums rather than free strings so a typo in a
//! storage key or a channel name is a compile error, not a silently empty
//! collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag carried by every account and session document
///
/// Serialized in SCREAMING_SNAKE_CASE to match the persisted data
/// (`"CLIENT"`, `"PLANNER"`, `"VENDOR"`, `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Event organizer browsing and booking providers
    Client,
    /// Professional coordinating events on behalf of clients
    Planner,
    /// Service provider selling services and packages
    Vendor,
    /// Platform administrator
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Client => "CLIENT",
            UserRole::Planner => "PLANNER",
            UserRole::Vendor => "VENDOR",
            UserRole::Admin => "ADMIN",
        };
        write!(f, "{}", s)
    }
}

/// Fixed catalog of persisted document keys
///
/// One variant per logical collection. The storage key strings keep the
/// versioned names of the original data so a directory written by an older
/// deployment remains readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Account directory (flat list of [`crate::records::User`])
    Users,
    /// Event catalog (flat list)
    Events,
    /// Vendor marketplace cards (flat list)
    Vendors,
    /// Current authenticated identity (single document; presence == logged in)
    Session,
    /// Vendor dashboard aggregate (stats, requests, metrics, availability)
    VendorData,
    /// Planner dashboard aggregate (alerts)
    PlannerData,
    /// Client dashboard aggregate (metrics, tasks, rsvps)
    ClientData,
    /// Event chat messages, keyed by event id
    EventChats,
    /// Private client plans (flat list)
    ClientPlans,
    /// Bookings shared between client and vendor (flat list)
    Bookings,
    /// Projects shared between client and planner (flat list)
    Projects,
    /// Contracts attached to bookings (flat list)
    Contracts,
    /// Direct-message conversations (flat list)
    Conversations,
    /// Direct messages (flat list)
    DirectMessages,
    /// Provider reviews (flat list)
    Reviews,
    /// Portfolio items, keyed by provider id
    Portfolios,
    /// Payment records (flat list)
    Payments,
    /// Service offerings, keyed by provider id
    Services,
    /// Event packages, keyed by provider id
    Packages,
    /// Guest list (flat list)
    Guests,
}

impl Collection {
    /// Storage key for this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "eventide_users_v2",
            Collection::Events => "eventide_events_v2",
            Collection::Vendors => "eventide_vendors_v2",
            Collection::Session => "eventide_session_v2",
            Collection::VendorData => "eventide_vendor_data_v2",
            Collection::PlannerData => "eventide_planner_data_v2",
            Collection::ClientData => "eventide_client_data_v2",
            Collection::EventChats => "eventide_event_chats_v2",
            Collection::ClientPlans => "eventide_client_plans_v2",
            Collection::Bookings => "eventide_shared_bookings_v2",
            Collection::Projects => "eventide_shared_projects_v2",
            Collection::Contracts => "eventide_contracts_v2",
            Collection::Conversations => "eventide_conversations_v2",
            Collection::DirectMessages => "eventide_direct_messages_v2",
            Collection::Reviews => "eventide_reviews_v2",
            Collection::Portfolios => "eventide_portfolios_v2",
            Collection::Payments => "eventide_payments_v2",
            Collection::Services => "eventide_services_v2",
            Collection::Packages => "eventide_packages_v2",
            Collection::Guests => "eventide_guests_v2",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Fixed catalog of realtime notification topics
///
/// Each channel names the logical audience that should refresh when a
/// publish lands on it. A channel with no subscribers is valid; the message
/// is simply dropped.
///
/// Serializes as its wire name (`"VENDOR_UPDATE"`, ...) so broadcast
/// frames match the persisted message format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Vendor dashboards (bookings, reviews, payments landed)
    Vendor,
    /// Planner dashboards (projects, alerts)
    Planner,
    /// Client dashboards (rsvps, tasks, catalog changes)
    Client,
    /// Event chat rooms
    Chat,
    /// Ephemeral live-location pings
    Location,
    /// Direct-message threads
    DirectMessage,
}

impl Channel {
    /// Wire name of this channel, as carried in broadcast frames
    pub fn wire_name(&self) -> &'static str {
        match self {
            Channel::Vendor => "VENDOR_UPDATE",
            Channel::Planner => "PLANNER_UPDATE",
            Channel::Client => "CLIENT_UPDATE",
            Channel::Chat => "CHAT_UPDATE",
            Channel::Location => "LOCATION_UPDATE",
            Channel::DirectMessage => "DM_UPDATE",
        }
    }

    /// Parse a wire name back into a channel
    pub fn from_wire_name(s: &str) -> Option<Self> {
        match s {
            "VENDOR_UPDATE" => Some(Channel::Vendor),
            "PLANNER_UPDATE" => Some(Channel::Planner),
            "CLIENT_UPDATE" => Some(Channel::Client),
            "CHAT_UPDATE" => Some(Channel::Chat),
            "LOCATION_UPDATE" => Some(Channel::Location),
            "DM_UPDATE" => Some(Channel::DirectMessage),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for Channel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Channel::from_wire_name(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown channel: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Client).unwrap(), "\"CLIENT\"");
        let back: UserRole = serde_json::from_str("\"VENDOR\"").unwrap();
        assert_eq!(back, UserRole::Vendor);
    }

    #[test]
    fn collection_keys_are_unique() {
        let all = [
            Collection::Users,
            Collection::Events,
            Collection::Vendors,
            Collection::Session,
            Collection::VendorData,
            Collection::PlannerData,
            Collection::ClientData,
            Collection::EventChats,
            Collection::ClientPlans,
            Collection::Bookings,
            Collection::Projects,
            Collection::Contracts,
            Collection::Conversations,
            Collection::DirectMessages,
            Collection::Reviews,
            Collection::Portfolios,
            Collection::Payments,
            Collection::Services,
            Collection::Packages,
            Collection::Guests,
        ];
        let mut keys: Vec<_> = all.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), all.len());
    }

    #[test]
    fn channel_wire_round_trip() {
        for ch in [
            Channel::Vendor,
            Channel::Planner,
            Channel::Client,
            Channel::Chat,
            Channel::Location,
            Channel::DirectMessage,
        ] {
            assert_eq!(Channel::from_wire_name(ch.wire_name()), Some(ch));
        }
        assert_eq!(Channel::from_wire_name("NOPE_UPDATE"), None);
    }

    #[test]
    fn channel_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_string(&Channel::DirectMessage).unwrap(),
            "\"DM_UPDATE\""
        );
        let back: Channel = serde_json::from_str("\"CHAT_UPDATE\"").unwrap();
        assert_eq!(back, Channel::Chat);
    }
}
