//! Synchronous whole-document JSON store
//!
//! Persistence for the Eventide backend is deliberately simple: every
//! collection is one JSON document, read and written whole. There is no
//! query layer, no partial update, no index. The API layer reads a
//! collection, modifies it in memory, and writes it back.
//!
//! Two modes:
//! - in-memory: documents live only in the process (tests, demos)
//! - directory-backed: each collection is one `<key>.json` file,
//!   written through on every `set`
//!
//! Reads are lazy in directory mode. A file is parsed the first time its
//! collection is requested, so an unparseable file surfaces as
//! [`Error::Corruption`](eventide_core::Error::Corruption) from the read
//! path, not at open time.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod store;

pub use store::{Store, StoreBuilder};
