//! Eventide: a marketplace backend core
//!
//! Eventide packages the client-side data layer of an event marketplace:
//! a synchronous whole-document JSON [`Store`], a realtime [`Relay`] with
//! cross-context broadcast over a [`Bus`], and a [`Backend`] facade
//! exposing the domain operations (sessions, dashboards, bookings, events,
//! reviews, payments, messaging).
//!
//! ```no_run
//! use eventide::{Backend, Bus, Relay, Store, UserRole};
//!
//! fn main() -> eventide::Result<()> {
//!     let store = Store::builder().directory("./data").open()?;
//!     let bus = Bus::new();
//!     let backend = Backend::new(store, Relay::attached(&bus));
//!     backend.init()?;
//!
//!     let user = backend.login("client@demo.eventide.app", "password", UserRole::Client)?;
//!     let dashboard = backend.client_dashboard(&user.id)?;
//!     println!("spent so far: {}", dashboard.total_spent);
//!     Ok(())
//! }
//! ```
//!
//! This crate is a facade; the implementation lives in the member crates
//! `eventide-core`, `eventide-store`, `eventide-relay` and `eventide-api`.

#![warn(missing_docs)]

pub use eventide_api::{
    Backend, BackendConfig, IdentityProvider, LocalDirectory, PaymentPolicy, PaymentRequest,
    ProfileUpdate,
};
pub use eventide_core::{records, time, Channel, Collection, Error, Result, UserRole};
pub use eventide_relay::{Bus, Frame, Relay, Subscription};
pub use eventide_store::{Store, StoreBuilder};
