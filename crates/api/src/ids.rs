//! Record id generation
//!
//! Ids keep the shape of the original data (`<prefix>-<millis>`), extended
//! with a per-process sequence number so two inserts in the same
//! millisecond cannot collide.

use eventide_core::time::now_millis;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh record id like `booking-1719415800123-42`
pub fn next_id(prefix: &str) -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, now_millis(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_prefix() {
        assert!(next_id("task").starts_with("task-"));
    }

    #[test]
    fn burst_of_ids_is_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id("x")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
