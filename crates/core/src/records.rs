//! Typed records for every persisted collection
//!
//! The original data model stored loosely-shaped JSON blobs; here every
//! collection gets an explicit record type, parsed and validated at the
//! store boundary. Serde renames keep the persisted wire shape byte-for-byte
//! compatible: camelCase field names, lowercase booking statuses, the
//! `"type"` discriminator on direct messages.
//!
//! Collections come in three shapes:
//! - flat lists (`Vec<T>`): events, bookings, reviews, payments, ...
//! - keyed maps (`HashMap<owner_id, Vec<T>>`): services, packages, portfolios
//! - per-role aggregates: [`VendorData`], [`PlannerData`], [`ClientData`]

use crate::types::UserRole;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Accounts and identity
// ============================================================================

/// An account in the user directory; also the shape of the session document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable account identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Role tag (client / planner / vendor / admin)
    pub role: UserRole,
    /// Avatar image URL
    pub avatar: String,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Credential for the bundled local directory; never set on sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Interest tags used by discovery
    #[serde(default)]
    pub interests: Vec<String>,
    /// RFC 3339 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Provider-side profile, present for vendors and planners
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_profile: Option<ProviderProfile>,
}

impl User {
    /// Strip credentials before the record leaves the directory
    pub fn into_session(mut self) -> Self {
        self.password = None;
        self
    }
}

/// Business profile attached to vendor and planner accounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    /// Account id this profile belongs to
    pub provider_id: String,
    /// Trading name shown on marketplace cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Longer-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_description: Option<String>,
    /// Home city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Display price band ("₹₹", "₹₹₹", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    /// Whether KYC verification has completed
    #[serde(default)]
    pub verified: bool,
    /// Average review rating
    #[serde(default)]
    pub rating: f32,
    /// Cover photo for the marketplace card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_url: Option<String>,
    /// Whether this is a planner or a vendor profile
    pub provider_type: UserRole,
    /// Submitted KYC form data; opaque to the backend (workflow rules are
    /// out of scope, the blob is carried for the review tooling)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_data: Option<serde_json::Value>,
}

impl ProviderProfile {
    /// Fresh unverified profile for a newly registered provider
    pub fn new_unverified(provider_id: &str, business_name: &str, provider_type: UserRole) -> Self {
        ProviderProfile {
            provider_id: provider_id.to_string(),
            business_name: Some(business_name.to_string()),
            business_description: None,
            city: None,
            price_range: Some("₹₹".to_string()),
            verified: false,
            rating: 0.0,
            cover_photo_url: None,
            provider_type,
            kyc_data: None,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Lifecycle state of an event listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    /// Still being planned
    Planning,
    /// Locked in
    Confirmed,
    /// Already happened
    Completed,
    /// Called off
    Cancelled,
}

/// Marketplace category of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    /// Concerts and festivals
    Music,
    /// Conferences and summits
    Tech,
    /// Community gatherings
    Social,
    /// Weddings
    Wedding,
    /// Exhibitions and art walks
    Art,
    /// Food and drink
    Food,
    /// Outdoor and adventure
    Adventure,
    /// Date-night style experiences
    Romantic,
    /// Family-friendly
    Family,
    /// Parties
    Party,
}

/// Geographic point attached to an event listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// An event listing in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Stable event identifier
    pub id: String,
    /// Listing title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Scheduled date, RFC 3339
    pub date: String,
    /// Human-readable venue
    pub location: String,
    /// Hero image URL
    pub image_url: String,
    /// Attendee count
    #[serde(default)]
    pub attendees: u32,
    /// Marketplace category
    pub category: EventCategory,
    /// Additional gallery images
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    /// Owning client, if client-created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Coordinating planner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planner_id: Option<String>,
    /// Provider who organizes the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
    /// Lifecycle state
    pub status: EventStatus,
    /// Budget in whole currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    /// Organizer display name
    pub organizer: String,
    /// Display ticket price ("₹1500", "Free")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Map pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// RFC 3339 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Marketplace card for a vendor or planner
///
/// Derived from provider profiles for display; the marketplace keeps a
/// seeded list and enriches it with per-provider service and event counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorCard {
    /// Provider account id
    pub id: String,
    /// Trading name
    pub name: String,
    /// Category label ("Catering", "Photography", ...)
    pub category: String,
    /// Average review rating
    pub rating: f32,
    /// Display price band
    pub price_range: String,
    /// Card image URL
    pub image_url: String,
    /// Whether KYC verification has completed
    pub verified: bool,
    /// Number of services the provider offers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_count: Option<usize>,
    /// Number of events the provider organizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_count: Option<usize>,
}

// ============================================================================
// Bookings, contracts, payments
// ============================================================================

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting the provider's response
    Pending,
    /// Provider accepted, not yet confirmed by payment
    Accepted,
    /// Locked in
    Confirmed,
    /// Work delivered
    Completed,
    /// Called off by the client
    Cancelled,
    /// Rejected by the provider
    Declined,
}

impl BookingStatus {
    /// Whether this booking contributes to the provider's revenue figures
    pub fn counts_toward_revenue(&self) -> bool {
        matches!(
            self,
            BookingStatus::Accepted | BookingStatus::Confirmed | BookingStatus::Completed
        )
    }

    /// Whether this booking still occupies the provider's calendar
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Accepted | BookingStatus::Confirmed
        )
    }
}

/// A booking shared between a client and a provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Stable booking identifier
    pub id: String,
    /// Event the booking is for
    pub event_id: String,
    /// Client who placed the booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Provider being booked
    pub provider_id: String,
    /// Service being booked
    pub service_id: String,
    /// Lifecycle state
    pub status: BookingStatus,
    /// Budget line category ("Catering", "Venue", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Agreed price in whole currency units
    pub agreed_price: i64,
    /// Scheduled start, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<String>,
    /// RFC 3339 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Lifecycle state of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Being drafted
    Draft,
    /// Waiting on signatures
    #[serde(rename = "Pending_Signatures")]
    PendingSignatures,
    /// In force
    Active,
    /// Fulfilled
    Completed,
    /// Voided
    Cancelled,
}

/// One clause of a contract
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractClause {
    /// Clause identifier
    pub id: String,
    /// Clause kind ("deliverables", "payment", "timeline")
    pub key: String,
    /// Clause text
    pub value: String,
    /// Position within the contract
    pub order_index: u32,
}

/// A contract attached to a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Stable contract identifier
    pub id: String,
    /// Booking this contract covers
    pub booking_id: String,
    /// Lifecycle state
    pub status: ContractStatus,
    /// Ordered clauses
    #[serde(default)]
    pub clauses: Vec<ContractClause>,
}

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Submitted, not yet settled
    Pending,
    /// Settled
    Succeeded,
    /// Declined by the gateway
    Failed,
    /// Returned to the payer
    Refunded,
}

/// Instrument used for a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,
    /// UPI transfer
    #[serde(rename = "UPI")]
    Upi,
    /// Installment plan
    #[serde(rename = "EMI")]
    Emi,
    /// Platform wallet
    Wallet,
    /// Direct bank transfer
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

/// A settled or attempted payment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Stable payment identifier
    pub id: String,
    /// Booking the payment settles, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Direct payee, for payments not tied to a booking (e.g. tickets)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Amount in whole currency units
    pub amount: i64,
    /// ISO currency code ("INR", "USD", "EUR")
    pub currency: String,
    /// Settlement state
    pub status: PaymentStatus,
    /// Instrument used
    pub method: PaymentMethod,
    /// RFC 3339 settlement timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
}

// ============================================================================
// Reviews and portfolios
// ============================================================================

/// A client review of a provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Stable review identifier
    pub id: String,
    /// Provider being reviewed
    pub provider_id: String,
    /// Reviewing client
    pub client_id: String,
    /// Reviewer display name
    pub client_name: String,
    /// Reviewer avatar URL
    pub client_avatar: String,
    /// Star rating, 1–5
    pub rating: u8,
    /// Review body
    pub text: String,
    /// RFC 3339 creation timestamp
    pub timestamp: String,
}

/// One item in a provider's portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Stable item identifier
    pub id: String,
    /// Album grouping ("default" unless the provider curates albums)
    pub album_id: String,
    /// "Image" or "Video"
    pub media_type: String,
    /// Media URL
    pub media_url: String,
    /// Caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ============================================================================
// Services and packages (keyed maps: provider id -> offerings)
// ============================================================================

/// A single service a provider offers
///
/// Prices are display strings ("800/plate", "50,000") because providers
/// quote in free-form units; structured pricing lives on bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    /// Stable service identifier
    pub id: String,
    /// Service title
    pub title: String,
    /// Display price
    pub price: String,
    /// Short description
    pub description: String,
    /// Owning provider; filled in when listing across providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

/// A bundled package a provider offers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPackage {
    /// Stable package identifier
    pub id: String,
    /// Package name
    pub name: String,
    /// Display price
    pub price: String,
    /// Short description
    pub description: String,
    /// Comma-separated feature list
    pub features: String,
}

// ============================================================================
// Messaging
// ============================================================================

/// A message in an event's chat room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Stable message identifier
    pub id: String,
    /// Event room the message belongs to
    pub event_id: String,
    /// Sender account id
    pub user_id: String,
    /// Sender display name
    pub user_name: String,
    /// Sender avatar URL
    pub user_avatar: String,
    /// Message body
    pub text: String,
    /// RFC 3339 send timestamp
    pub timestamp: String,
}

/// Variant of a direct message
///
/// Wire discriminator is the `"type"` field: `"text"`,
/// `"video_call_start"`, `"video_call_end"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text message
    Text,
    /// Marker: a video call started
    VideoCallStart,
    /// Marker: a video call ended
    VideoCallEnd,
}

impl MessageKind {
    /// Summary used for the conversation's last-message preview
    pub fn preview<'a>(&self, text: &'a str) -> &'a str {
        match self {
            MessageKind::Text => text,
            MessageKind::VideoCallStart | MessageKind::VideoCallEnd => "Video Call",
        }
    }
}

/// A message in a one-to-one conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    /// Stable message identifier
    pub id: String,
    /// Conversation thread id
    pub conversation_id: String,
    /// Sender account id
    pub sender_id: String,
    /// Message body
    pub text: String,
    /// RFC 3339 send timestamp
    pub timestamp: String,
    /// Message variant
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// One side of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Account id
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    pub avatar: String,
}

/// Preview of the most recent message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    /// Preview text
    pub text: String,
    /// RFC 3339 send timestamp
    pub timestamp: String,
    /// Sender account id
    pub sender_id: String,
}

/// A one-to-one conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Stable thread identifier
    pub id: String,
    /// Both participants
    pub participants: Vec<Participant>,
    /// Most recent message preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
    /// Unread message count for the viewer
    #[serde(default)]
    pub unread_count: u32,
}

// ============================================================================
// Guests, tasks, plans, projects
// ============================================================================

/// RSVP state of a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestStatus {
    /// Attending
    Confirmed,
    /// Not yet replied
    Pending,
    /// Not attending
    Declined,
}

/// An entry on the client's guest list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Stable guest identifier
    pub id: String,
    /// Guest name
    pub name: String,
    /// Contact email
    pub email: String,
    /// RSVP state
    pub status: GuestStatus,
    /// Seating assignment ("Table 5", "-" when unassigned)
    pub table: String,
    /// Relationship tag ("Family", "Friend", "VIP", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Avatar URL
    pub avatar: String,
}

/// Completion state of a client task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not yet done
    Pending,
    /// Done
    Completed,
}

/// A to-do item on the client dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable task identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Completion state
    pub status: TaskStatus,
    /// Display due date
    pub date: String,
}

/// RSVP the client gave for a catalog event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    /// Going
    Attending,
    /// Watching
    Interested,
}

/// A private plan a client builds around an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Stable plan identifier
    pub id: String,
    /// Event the plan is built around
    pub event_id: String,
    /// Plan name
    pub name: String,
    /// Invited friends (display names or emails)
    #[serde(default)]
    pub friends: Vec<String>,
    /// Lifecycle tag ("active")
    pub status: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// A project shared between a client and a planner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable project identifier
    pub id: String,
    /// Project name
    pub name: String,
    /// Client display name
    pub client: String,
    /// Stage label ("Planning", "In Progress", ...)
    pub status: String,
    /// Percent complete, 0–100
    pub progress: u8,
    /// Display target date
    pub date: String,
}

/// A notification on the planner dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Stable alert identifier
    pub id: String,
    /// Alert text
    pub text: String,
    /// Display age ("Just now", "2h ago")
    pub time: String,
    /// Severity tag ("success", "warning")
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Dashboard aggregates and views
// ============================================================================

/// One slice of a budget-allocation chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetric {
    /// Slice label (budget category)
    pub name: String,
    /// Amount in whole currency units
    pub value: i64,
    /// Chart color, hex
    #[serde(default)]
    pub color: String,
}

/// One point of the vendor's weekly income series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomePoint {
    /// Day-of-week label ("Mon" ... "Sun")
    pub name: String,
    /// Income for that day in whole currency units
    pub income: i64,
}

/// Rolled-up vendor metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetrics {
    /// Active booking count
    pub bookings: u32,
    /// Revenue in whole currency units
    pub revenue: i64,
    /// Profile view count
    pub views: u64,
    /// Average rating shown on the dashboard
    #[serde(default)]
    pub rating: f32,
}

/// Vendor dashboard aggregate, persisted whole
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorData {
    /// Weekly income series
    #[serde(default)]
    pub stats: Vec<IncomePoint>,
    /// Pending booking requests (refreshed from the shared bookings)
    #[serde(default)]
    pub requests: Vec<Booking>,
    /// Rolled-up metrics
    #[serde(default)]
    pub metrics: VendorMetrics,
    /// Blocked-out dates, RFC 3339 days
    #[serde(default)]
    pub availability: Vec<String>,
}

/// Planner dashboard aggregate, persisted whole
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerData {
    /// Notification feed, newest first
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// Client dashboard aggregate, persisted whole
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    /// Seeded budget-allocation series (replaced by computed figures once
    /// real bookings exist)
    #[serde(default)]
    pub metrics: Vec<DashboardMetric>,
    /// To-do list, newest first
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// RSVPs keyed by event id
    #[serde(default)]
    pub rsvps: HashMap<String, RsvpStatus>,
}

/// Computed client dashboard view (not persisted)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDashboard {
    /// Budget allocation by category, computed from bookings
    pub metrics: Vec<DashboardMetric>,
    /// Total spend across counted bookings
    pub total_spent: i64,
    /// Guests with a confirmed RSVP
    pub confirmed_guests: usize,
    /// Distinct providers with counted bookings
    pub vendors_hired: usize,
    /// Tasks not yet completed
    pub pending_tasks: usize,
    /// Full task list
    pub upcoming_tasks: Vec<Task>,
    /// RSVPs keyed by event id
    pub rsvps: HashMap<String, RsvpStatus>,
    /// The caller's bookings, all statuses
    pub bookings: Vec<Booking>,
    /// Shared projects
    pub projects: Vec<Project>,
    /// Full guest list
    pub guests: Vec<Guest>,
}

/// Computed planner dashboard view (not persisted)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDashboard {
    /// Notification feed, newest first
    pub alerts: Vec<Alert>,
    /// Shared projects, newest first
    pub projects: Vec<Project>,
}

/// Ephemeral live-location ping; published, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationPing {
    /// Event being attended
    pub event_id: String,
    /// Account sending the ping
    pub user_id: String,
    /// Sender avatar for the map marker
    pub user_avatar: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_wire_shape_is_camel_case() {
        let user = User {
            id: "u-1".into(),
            name: "Ada".into(),
            role: UserRole::Client,
            avatar: "https://example.com/a.png".into(),
            email: Some("ada@example.com".into()),
            password: None,
            interests: vec![],
            created_at: Some("2024-01-01T00:00:00Z".into()),
            provider_profile: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "CLIENT");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn booking_status_wire_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        let s: BookingStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(s, BookingStatus::Pending);
    }

    #[test]
    fn booking_status_revenue_rules() {
        assert!(BookingStatus::Accepted.counts_toward_revenue());
        assert!(BookingStatus::Confirmed.counts_toward_revenue());
        assert!(BookingStatus::Completed.counts_toward_revenue());
        assert!(!BookingStatus::Pending.counts_toward_revenue());
        assert!(!BookingStatus::Declined.counts_toward_revenue());
        assert!(BookingStatus::Pending.is_active());
        assert!(!BookingStatus::Completed.is_active());
    }

    #[test]
    fn direct_message_type_discriminator() {
        let msg = DirectMessage {
            id: "dm-1".into(),
            conversation_id: "conv-1".into(),
            sender_id: "u-1".into(),
            text: String::new(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            kind: MessageKind::VideoCallStart,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "video_call_start");
        let back: DirectMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, MessageKind::VideoCallStart);
    }

    #[test]
    fn message_kind_preview() {
        assert_eq!(MessageKind::Text.preview("hi"), "hi");
        assert_eq!(MessageKind::VideoCallStart.preview("ignored"), "Video Call");
        assert_eq!(MessageKind::VideoCallEnd.preview("ignored"), "Video Call");
    }

    #[test]
    fn into_session_strips_password() {
        let user = User {
            id: "u-1".into(),
            name: "Ada".into(),
            role: UserRole::Client,
            avatar: String::new(),
            email: None,
            password: Some("hunter2".into()),
            interests: vec![],
            created_at: None,
            provider_profile: None,
        };
        assert!(user.into_session().password.is_none());
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"Bank Transfer\""
        );
    }

    #[test]
    fn vendor_data_tolerates_missing_fields() {
        // Aggregates written by older deployments may lack newer fields.
        let data: VendorData = serde_json::from_str(r#"{"stats":[]}"#).unwrap();
        assert!(data.availability.is_empty());
        assert_eq!(data.metrics.views, 0);
    }
}
