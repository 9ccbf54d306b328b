//! Vendor-side operations: dashboard, availability, booking responses

use crate::backend::Backend;
use eventide_core::error::{Error, Result};
use eventide_core::records::{
    Booking, BookingStatus, EventRecord, IncomePoint, Review, ServiceOffering, VendorCard,
    VendorData,
};
use eventide_core::types::{Channel, Collection};
use chrono::{DateTime, Datelike};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl Backend {
    /// Assemble the vendor dashboard for `vendor_id`
    ///
    /// Requests, metrics and the weekly income series are recomputed from
    /// the shared bookings on every read, then written back so the
    /// aggregate document stays current. The seeded demo income series is
    /// kept until the vendor has real revenue.
    pub fn vendor_dashboard(&self, vendor_id: &str) -> Result<VendorData> {
        let mut data: VendorData =
            self.store.get(Collection::VendorData, VendorData::default())?;
        let bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        let mine: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.provider_id == vendor_id)
            .collect();

        data.requests = mine
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .map(|b| (*b).clone())
            .collect();

        let counted: Vec<&Booking> = mine
            .iter()
            .copied()
            .filter(|b| b.status.counts_toward_revenue())
            .collect();
        let revenue: i64 = counted.iter().map(|b| b.agreed_price).sum();
        data.metrics.revenue = revenue;
        data.metrics.bookings = mine.iter().filter(|b| b.status.is_active()).count() as u32;
        data.metrics.rating = self.provider_rating(vendor_id)?.unwrap_or(data.metrics.rating);
        if revenue > 0 {
            data.stats = weekly_income(&counted);
        }

        self.store.set(Collection::VendorData, &data)?;
        Ok(data)
    }

    fn provider_rating(&self, provider_id: &str) -> Result<Option<f32>> {
        let reviews: Vec<Review> = self.store.get(Collection::Reviews, Vec::new())?;
        let mine: Vec<&Review> = reviews
            .iter()
            .filter(|r| r.provider_id == provider_id)
            .collect();
        if mine.is_empty() {
            return Ok(None);
        }
        let sum: u32 = mine.iter().map(|r| u32::from(r.rating)).sum();
        Ok(Some(sum as f32 / mine.len() as f32))
    }

    /// Count one profile view; publishes `VENDOR_UPDATE`
    pub fn increment_views(&self, vendor_id: &str) -> Result<u64> {
        let mut data: VendorData =
            self.store.get(Collection::VendorData, VendorData::default())?;
        data.metrics.views += 1;
        let views = data.metrics.views;
        self.store.set(Collection::VendorData, &data)?;
        self.publish(Channel::Vendor, &json!({ "vendorId": vendor_id }));
        Ok(views)
    }

    /// Replace the vendor's blocked-out dates; publishes `VENDOR_UPDATE`
    pub fn update_availability(&self, vendor_id: &str, dates: Vec<String>) -> Result<()> {
        let mut data: VendorData =
            self.store.get(Collection::VendorData, VendorData::default())?;
        data.availability = dates;
        self.store.set(Collection::VendorData, &data)?;
        self.publish(Channel::Vendor, &json!({ "vendorId": vendor_id }));
        Ok(())
    }

    /// Accept or decline a pending booking request
    ///
    /// Updates the shared booking, bumps the vendor metrics on accept, and
    /// notifies both sides (`VENDOR_UPDATE` and `CLIENT_UPDATE`) after the
    /// write lands. The payload carries the new status and the updated
    /// bookings list.
    pub fn respond_to_booking(&self, booking_id: &str, accept: bool) -> Result<Booking> {
        let mut bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| Error::not_found("booking", booking_id))?;
        booking.status = if accept {
            BookingStatus::Accepted
        } else {
            BookingStatus::Declined
        };
        let updated = booking.clone();
        self.store.set(Collection::Bookings, &bookings)?;

        if accept {
            let mut data: VendorData =
                self.store.get(Collection::VendorData, VendorData::default())?;
            data.metrics.bookings += 1;
            data.metrics.revenue += updated.agreed_price;
            self.store.set(Collection::VendorData, &data)?;
        }

        debug!(booking = booking_id, accept, "booking response");
        let payload = json!({
            "bookingId": booking_id,
            "status": updated.status,
            "bookings": bookings,
        });
        self.publish(Channel::Vendor, &payload);
        self.publish(Channel::Client, &payload);
        Ok(updated)
    }

    /// Marketplace vendor cards, enriched with per-provider service and
    /// event counts
    pub fn vendors(&self) -> Result<Vec<VendorCard>> {
        let mut cards: Vec<VendorCard> = self.store.get(Collection::Vendors, Vec::new())?;
        let services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        let events: Vec<EventRecord> = self.store.get(Collection::Events, Vec::new())?;
        for card in cards.iter_mut() {
            card.service_count = Some(services.get(&card.id).map_or(0, Vec::len));
            card.event_count = Some(
                events
                    .iter()
                    .filter(|e| e.organizer_id.as_deref() == Some(card.id.as_str()))
                    .count(),
            );
        }
        Ok(cards)
    }
}

/// Distribute counted bookings over a Mon–Sun income series
fn weekly_income(counted: &[&Booking]) -> Vec<IncomePoint> {
    let mut by_day = [0i64; 7];
    for booking in counted {
        let ts = booking
            .scheduled_start
            .as_deref()
            .or(booking.created_at.as_deref());
        let day = ts
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map_or(0, |dt| dt.weekday().num_days_from_monday() as usize);
        by_day[day] += booking.agreed_price;
    }
    WEEKDAYS
        .iter()
        .zip(by_day)
        .map(|(name, income)| IncomePoint {
            name: name.to_string(),
            income,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::test_backend;
    use crate::ids::next_id;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const VENDOR: &str = "user-demo-vendor";

    fn pending_booking(backend: &Backend, price: i64) -> String {
        let mut bookings: Vec<Booking> =
            backend.store().get(Collection::Bookings, vec![]).unwrap();
        let id = next_id("booking");
        bookings.push(Booking {
            id: id.clone(),
            event_id: "event-seed-1".into(),
            client_id: Some("user-demo-client".into()),
            provider_id: VENDOR.into(),
            service_id: "service-seed-1".into(),
            status: BookingStatus::Pending,
            category: Some("Catering".into()),
            agreed_price: price,
            scheduled_start: Some("2025-11-15T18:00:00Z".into()),
            created_at: None,
        });
        backend.store().set(Collection::Bookings, &bookings).unwrap();
        id
    }

    #[test]
    fn dashboard_lists_pending_requests() {
        let backend = test_backend();
        pending_booking(&backend, 40_000);
        let data = backend.vendor_dashboard(VENDOR).unwrap();
        assert_eq!(data.requests.len(), 1);
        assert_eq!(data.requests[0].status, BookingStatus::Pending);
    }

    #[test]
    fn dashboard_recomputes_revenue_from_bookings() {
        let backend = test_backend();
        let data = backend.vendor_dashboard(VENDOR).unwrap();
        // The seeded confirmed booking is the only counted one.
        assert_eq!(data.metrics.revenue, 85_000);
        assert_eq!(data.metrics.bookings, 1);
        // 2025-12-06 is a Saturday.
        let total: i64 = data.stats.iter().map(|p| p.income).sum();
        assert_eq!(total, 85_000);
        assert_eq!(data.stats[5].name, "Sat");
        assert_eq!(data.stats[5].income, 85_000);
    }

    #[test]
    fn dashboard_rating_comes_from_reviews() {
        let backend = test_backend();
        let data = backend.vendor_dashboard(VENDOR).unwrap();
        // Seeded reviews are 5 and 4 stars.
        assert!((data.metrics.rating - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn accept_updates_booking_and_metrics_and_notifies_both_sides() {
        let backend = test_backend();
        let id = pending_booking(&backend, 40_000);

        let vendor_seen = Arc::new(Mutex::new(Vec::new()));
        let client_seen = Arc::new(Mutex::new(0u32));
        {
            let v = vendor_seen.clone();
            backend
                .relay()
                .subscribe(Channel::Vendor, move |p| v.lock().push(p.clone()));
            let c = client_seen.clone();
            backend.relay().subscribe(Channel::Client, move |_| *c.lock() += 1);
        }

        let updated = backend.respond_to_booking(&id, true).unwrap();
        assert_eq!(updated.status, BookingStatus::Accepted);
        {
            let vendor_seen = vendor_seen.lock();
            assert_eq!(vendor_seen.len(), 1);
            assert_eq!(vendor_seen[0]["status"], "accepted");
            // Both sides get the updated list along with the status change.
            let published = vendor_seen[0]["bookings"].as_array().unwrap();
            assert!(published
                .iter()
                .any(|b| b["id"] == id.as_str() && b["status"] == "accepted"));
        }
        assert_eq!(*client_seen.lock(), 1);

        let data: VendorData = backend
            .store()
            .get(Collection::VendorData, VendorData::default())
            .unwrap();
        assert_eq!(data.metrics.revenue, 85_000 + 40_000);
    }

    #[test]
    fn decline_does_not_touch_metrics() {
        let backend = test_backend();
        let id = pending_booking(&backend, 40_000);
        let before: VendorData = backend
            .store()
            .get(Collection::VendorData, VendorData::default())
            .unwrap();

        let updated = backend.respond_to_booking(&id, false).unwrap();
        assert_eq!(updated.status, BookingStatus::Declined);

        let after: VendorData = backend
            .store()
            .get(Collection::VendorData, VendorData::default())
            .unwrap();
        assert_eq!(after.metrics.revenue, before.metrics.revenue);
    }

    #[test]
    fn respond_to_unknown_booking_fails_without_writes() {
        let backend = test_backend();
        let before: Vec<Booking> = backend.store().get(Collection::Bookings, vec![]).unwrap();
        let err = backend.respond_to_booking("booking-nope", true).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        let after: Vec<Booking> = backend.store().get(Collection::Bookings, vec![]).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn increment_views_counts_up() {
        let backend = test_backend();
        let v1 = backend.increment_views(VENDOR).unwrap();
        let v2 = backend.increment_views(VENDOR).unwrap();
        assert_eq!(v2, v1 + 1);
    }

    #[test]
    fn availability_round_trips() {
        let backend = test_backend();
        backend
            .update_availability(VENDOR, vec!["2025-12-24".into(), "2025-12-25".into()])
            .unwrap();
        let data = backend.vendor_dashboard(VENDOR).unwrap();
        assert_eq!(data.availability.len(), 2);
    }

    #[test]
    fn vendor_cards_are_enriched_with_counts() {
        let backend = test_backend();
        let cards = backend.vendors().unwrap();
        let demo = cards.iter().find(|c| c.id == VENDOR).unwrap();
        assert_eq!(demo.service_count, Some(2));
        assert_eq!(demo.event_count, Some(2));
        let other = cards.iter().find(|c| c.id == "vendor-lumen").unwrap();
        assert_eq!(other.service_count, Some(0));
        assert_eq!(other.event_count, Some(0));
    }
}
