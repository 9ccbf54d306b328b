//! Realtime pub/sub relay
//!
//! The relay is the notification fabric of the Eventide backend. The API
//! layer publishes a small payload on a [`Channel`](eventide_core::Channel)
//! after every write; interested views subscribe and re-read the store when
//! a message lands.
//!
//! Two delivery scopes:
//! - local: subscribers on the publishing [`Relay`] are invoked
//!   synchronously, in subscription order, before `publish` returns
//! - cross-context: a shared [`Bus`] fans the frame out to every other
//!   attached relay on a background delivery thread
//!
//! Each relay is an explicit value, created and wired by the caller. There
//! is no global singleton; two relays attached to the same bus model two
//! browser tabs, a relay with no bus models a lone context.
//!
//! Subscriber faults are isolated: a panicking callback is logged and
//! skipped, and delivery continues with the remaining subscribers.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bus;
mod relay;

pub use bus::{Bus, Frame};
pub use relay::{Relay, Subscription};
