//! Domain API for the Eventide marketplace backend
//!
//! [`Backend`] composes a [`Store`](eventide_store::Store) and a
//! [`Relay`](eventide_relay::Relay) into the application operations:
//! sessions, dashboards, bookings, events, reviews, portfolios, payments,
//! services, packages, event chat, direct messages, and guest lists.
//!
//! Every mutating operation follows the same contract:
//!
//! 1. read the affected collection from the store
//! 2. transform it in memory
//! 3. write it back whole
//! 4. publish a notification on the matching channel
//!
//! The publish happens strictly after the write, so a subscriber that
//! re-reads the store on notification always sees the new state. A failed
//! transform writes nothing and publishes nothing.
//!
//! Identity is an explicit collaborator behind [`IdentityProvider`]; the
//! bundled [`LocalDirectory`] authenticates against the users collection.
//! [`BackendConfig`] selects the demo-identity fallback and the payment
//! approval policy.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod backend;
mod catalog;
mod client;
mod commerce;
mod config;
mod events;
mod identity;
mod ids;
mod messaging;
mod planner;
mod seed;
mod vendor;

pub use backend::{Backend, ProfileUpdate};
pub use commerce::PaymentRequest;
pub use config::{BackendConfig, PaymentPolicy};
pub use identity::{IdentityProvider, LocalDirectory};
