//! Core types for the Eventide marketplace backend
//!
//! This crate defines the foundational types used throughout the system:
//! - Collection: the fixed catalog of persisted document keys
//! - Channel: the fixed catalog of realtime notification topics
//! - Error: error type hierarchy
//! - Records: one typed record per persisted collection (users, events,
//!   bookings, reviews, payments, chat messages, dashboard aggregates, ...)
//!
//! Every persisted document keeps the wire shape of the original data:
//! camelCase field names, SCREAMING_SNAKE_CASE role tags, and the versioned
//! `eventide_*_v2` storage keys.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod records;
pub mod time;
pub mod types;

pub use error::{Error, Result};
pub use records::{
    Alert, Booking, BookingStatus, ChatMessage, ClientDashboard, ClientData, Contract,
    ContractClause, ContractStatus, Conversation, DashboardMetric, DirectMessage, EventCategory,
    EventPackage, EventRecord, EventStatus, Guest, GuestStatus, IncomePoint, LastMessage,
    LocationPing, MessageKind, Participant, Payment, PaymentMethod, PaymentStatus, Plan,
    PlannerDashboard, PlannerData, PortfolioItem, Project, ProviderProfile, Review, RsvpStatus,
    ServiceOffering, Task, TaskStatus, User, VendorCard, VendorData, VendorMetrics,
};
pub use types::{Channel, Collection, UserRole};
