//! Bookings, contracts and the mock payment gateway

use crate::backend::Backend;
use crate::ids::next_id;
use eventide_core::error::{Error, Result};
use eventide_core::records::{
    Booking, BookingStatus, Contract, Payment, PaymentMethod, PaymentStatus,
};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection};
use serde_json::json;
use tracing::{debug, info};

/// A charge submitted to the mock gateway
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Booking this charge settles, if any
    pub booking_id: Option<String>,
    /// Direct payee for charges not tied to a booking (e.g. tickets)
    pub provider_id: Option<String>,
    /// Amount in whole currency units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Instrument used
    pub method: PaymentMethod,
}

impl Backend {
    // ========================================================================
    // Bookings
    // ========================================================================

    /// Request a booking as the signed-in client
    ///
    /// Appends a pending booking to the shared list and publishes
    /// `VENDOR_UPDATE` carrying the new booking's id and the updated list,
    /// so the provider's dashboard can refresh without a store round trip.
    pub fn request_booking(
        &self,
        event_id: &str,
        provider_id: &str,
        service_id: &str,
        category: Option<String>,
        agreed_price: i64,
        scheduled_start: Option<String>,
    ) -> Result<Booking> {
        let client = self.require_session()?;
        let booking = Booking {
            id: next_id("booking"),
            event_id: event_id.to_string(),
            client_id: Some(client.id),
            provider_id: provider_id.to_string(),
            service_id: service_id.to_string(),
            status: BookingStatus::Pending,
            category,
            agreed_price,
            scheduled_start,
            created_at: Some(now_rfc3339()),
        };
        let mut bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        bookings.push(booking.clone());
        self.store.set(Collection::Bookings, &bookings)?;
        info!(booking = %booking.id, provider = provider_id, "booking requested");
        self.publish(
            Channel::Vendor,
            &json!({ "bookingId": booking.id, "bookings": bookings }),
        );
        Ok(booking)
    }

    /// Bookings where `user_id` is the client
    pub fn bookings_for(&self, user_id: &str) -> Result<Vec<Booking>> {
        let bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        Ok(bookings
            .into_iter()
            .filter(|b| b.client_id.as_deref() == Some(user_id))
            .collect())
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    /// The contract attached to a booking, if one exists
    pub fn contract_for_booking(&self, booking_id: &str) -> Result<Option<Contract>> {
        let contracts: Vec<Contract> = self.store.get(Collection::Contracts, Vec::new())?;
        Ok(contracts.into_iter().find(|c| c.booking_id == booking_id))
    }

    // ========================================================================
    // Payments
    // ========================================================================

    /// Submit a charge to the mock gateway
    ///
    /// Approval is decided by the configured payment policy. A declined
    /// charge is [`Error::PaymentDeclined`]; it writes nothing and
    /// publishes nothing. An approved charge is appended to the payments
    /// collection and `VENDOR_UPDATE` is published.
    pub fn create_payment(&self, request: PaymentRequest) -> Result<Payment> {
        if request.amount <= 0 {
            return Err(Error::InvalidOperation(format!(
                "invalid amount: {}",
                request.amount
            )));
        }
        if !self.config.payment_policy.approve() {
            debug!(amount = request.amount, "payment declined by gateway");
            return Err(Error::PaymentDeclined);
        }
        let payment = Payment {
            id: next_id("pay"),
            booking_id: request.booking_id,
            provider_id: request.provider_id,
            amount: request.amount,
            currency: request.currency,
            status: PaymentStatus::Succeeded,
            method: request.method,
            payment_date: Some(now_rfc3339()),
        };
        let mut payments: Vec<Payment> = self.store.get(Collection::Payments, Vec::new())?;
        payments.push(payment.clone());
        self.store.set(Collection::Payments, &payments)?;
        info!(payment = %payment.id, amount = payment.amount, "payment settled");
        self.publish(Channel::Vendor, &json!({ "paymentId": payment.id }));
        Ok(payment)
    }

    /// Payments made by `user_id`, joined through their bookings
    pub fn payments(&self, user_id: &str) -> Result<Vec<Payment>> {
        let payments: Vec<Payment> = self.store.get(Collection::Payments, Vec::new())?;
        let bookings = self.bookings_for(user_id)?;
        Ok(payments
            .into_iter()
            .filter(|p| {
                p.booking_id
                    .as_deref()
                    .is_some_and(|id| bookings.iter().any(|b| b.id == id))
            })
            .collect())
    }

    /// Payments received by `vendor_id`, directly or through their bookings
    pub fn vendor_payments(&self, vendor_id: &str) -> Result<Vec<Payment>> {
        let payments: Vec<Payment> = self.store.get(Collection::Payments, Vec::new())?;
        let bookings: Vec<Booking> = self.store.get(Collection::Bookings, Vec::new())?;
        Ok(payments
            .into_iter()
            .filter(|p| {
                p.provider_id.as_deref() == Some(vendor_id)
                    || p.booking_id.as_deref().is_some_and(|id| {
                        bookings
                            .iter()
                            .any(|b| b.id == id && b.provider_id == vendor_id)
                    })
            })
            .collect())
    }
}
