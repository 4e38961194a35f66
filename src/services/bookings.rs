//! Booking lifecycle management
//!
//! Orchestrates availability, pricing and promo redemption into a single
//! effectively-atomic create, and owns the status / payment-status state
//! machines. Creation runs under a per-cabin advisory lock so two concurrent
//! requests for overlapping nights cannot both pass the availability check;
//! the GiST exclusion constraint in the schema backstops the same invariant
//! at the database level.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, CreateBooking, PriceBreakdown, UpdateBooking},
        enums::{BookingStatus, PaymentStatus},
        promo::PromoCode,
    },
    repository::{
        bookings::{BookingsRepository, NewBooking, REFERENCE_UNIQUE_CONSTRAINT},
        promos::PromosRepository,
        Repository,
    },
    services::{availability, email::EmailService, pricing, promos},
};

/// Inbound payment-succeeded event from the payment collaborator. Delivery is
/// at-least-once; handling must be idempotent.
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct PaymentEvent {
    pub booking_reference: String,
    #[schema(value_type = f64)]
    pub amount_paid: Decimal,
    pub succeeded: bool,
}

/// Booking-reference prefix; the suffix is 6 random characters from an
/// unambiguous upper-case alphabet.
const REFERENCE_PREFIX: &str = "AF";
const REFERENCE_SUFFIX_LEN: usize = 6;
const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ0123456789";

/// Attempts at the whole create transaction before giving up on reference
/// collisions. With 34^6 suffixes a second collision in a row is effectively
/// a broken RNG.
const CREATE_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    email: EmailService,
}

impl BookingsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// Get a booking by its reference
    pub async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        self.repository.bookings.get_by_reference(reference).await
    }

    /// List all bookings (admin)
    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list().await
    }

    /// Booked nights for a cabin, recomputed from current non-cancelled
    /// bookings on every query
    pub async fn unavailable_dates(&self, cabin_id: i32) -> AppResult<BTreeSet<NaiveDate>> {
        self.repository.cabins.get_by_id(cabin_id).await?;
        let existing = self.repository.bookings.find_active_by_cabin(cabin_id).await?;
        Ok(availability::unavailable_dates(&existing))
    }

    /// Create a booking: validate, check availability, price, redeem the
    /// promo if any, and persist — all in one transaction per attempt. Either
    /// the booking row lands with its discount and the promo slot consumed,
    /// or nothing is written.
    pub async fn create(&self, request: CreateBooking) -> AppResult<Booking> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let nights = availability::nights_between(request.check_in, request.check_out);
        if nights < 1 {
            return Err(AppError::Validation(
                "check_out must be after check_in".to_string(),
            ));
        }
        let nights = nights as i32;

        let settings = self.repository.settings.get().await?;
        if nights < settings.min_nights || nights > settings.max_nights {
            return Err(AppError::Validation(format!(
                "Stay must be between {} and {} nights",
                settings.min_nights, settings.max_nights
            )));
        }

        let cabin = self.repository.cabins.get_by_id(request.cabin_id).await?;
        if !cabin.is_active {
            return Err(AppError::NotFound(format!("Cabin {} is not bookable", cabin.name)));
        }
        if request.guests > cabin.max_guests {
            return Err(AppError::Validation(format!(
                "{} sleeps at most {} guests",
                cabin.name, cabin.max_guests
            )));
        }

        // Validate the promo up front for a fast, typed rejection. The cap is
        // enforced again by the conditional increment inside the transaction.
        let promo: Option<PromoCode> = match &request.promo_code {
            Some(code) => {
                let found = self
                    .repository
                    .promos
                    .find_by_code(code)
                    .await?
                    .ok_or(AppError::Promo(crate::models::PromoRejection::NotFound))?;
                promos::evaluate(&found, chrono::Utc::now()).map_err(AppError::Promo)?;
                Some(found)
            }
            None => None,
        };

        let price = pricing::compute_price(cabin.nightly_rate, nights, &settings, promo.as_ref());

        let mut last_err = None;
        for _ in 0..CREATE_ATTEMPTS {
            let reference = generate_reference();
            match self
                .try_create(&request, &cabin.name, nights, &price, promo.as_ref(), &reference)
                .await
            {
                Ok(booking) => {
                    tracing::info!(
                        reference = %booking.booking_reference,
                        cabin = booking.cabin_id,
                        total = %booking.total,
                        "Booking created"
                    );
                    if let Err(e) = self.email.send_booking_created(&booking).await {
                        tracing::warn!("Failed to send booking email for {}: {}", booking.booking_reference, e);
                    }
                    return Ok(booking);
                }
                Err(e) if is_reference_collision(&e) => {
                    tracing::warn!("Booking reference {} collided, regenerating", reference);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| AppError::Internal("Booking creation failed".to_string())))
    }

    /// One transactional create attempt with a fixed reference
    async fn try_create(
        &self,
        request: &CreateBooking,
        cabin_name: &str,
        nights: i32,
        price: &PriceBreakdown,
        promo: Option<&PromoCode>,
        reference: &str,
    ) -> AppResult<Booking> {
        let mut tx = self.repository.pool.begin().await?;

        BookingsRepository::lock_cabin(&mut *tx, request.cabin_id).await?;

        if BookingsRepository::overlap_exists(
            &mut *tx,
            request.cabin_id,
            request.check_in,
            request.check_out,
            None,
        )
        .await?
        {
            return Err(AppError::DateConflict {
                cabin_id: request.cabin_id,
                check_in: request.check_in,
                check_out: request.check_out,
            });
        }

        // Redeem before insert so losing the cap race aborts the whole
        // attempt and the guest is never quietly charged full price.
        if let Some(promo) = promo {
            if !PromosRepository::increment_usage(&mut *tx, promo.id).await? {
                return Err(AppError::Promo(
                    crate::models::PromoRejection::UsageLimitReached,
                ));
            }
        }

        let booking = BookingsRepository::insert(
            &mut *tx,
            &NewBooking {
                booking_reference: reference,
                cabin_id: request.cabin_id,
                cabin_name,
                check_in: request.check_in,
                check_out: request.check_out,
                nights,
                guests: request.guests,
                guest_name: &request.guest_name,
                guest_email: &request.guest_email,
                guest_phone: request.guest_phone.as_deref(),
                special_requests: request.special_requests.as_deref(),
                price,
                promo_code: promo.map(|p| p.code.as_str()),
                language: request.language,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Confirm a pending booking. Idempotent: confirming twice is a no-op;
    /// only a cancelled booking refuses.
    pub async fn confirm(&self, reference: &str) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_reference(reference).await?;
        match booking.status {
            BookingStatus::Confirmed => Ok(booking),
            BookingStatus::Cancelled => Err(AppError::InvalidTransition(
                "Cannot confirm a cancelled booking".to_string(),
            )),
            BookingStatus::Pending => {
                let booking = self.repository.bookings.set_status(booking.id, BookingStatus::Confirmed).await?;
                if let Err(e) = self.email.send_booking_confirmed(&booking).await {
                    tracing::warn!("Failed to send confirmation email for {}: {}", reference, e);
                }
                Ok(booking)
            }
        }
    }

    /// Cancel a booking. Terminal; does not touch payment_status — refunds
    /// are a separate explicit transition.
    pub async fn cancel(&self, reference: &str) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_reference(reference).await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::InvalidTransition(
                "Booking is already cancelled".to_string(),
            ));
        }
        let booking = self.repository.bookings.set_status(booking.id, BookingStatus::Cancelled).await?;
        tracing::info!(reference = %reference, "Booking cancelled");
        if let Err(e) = self.email.send_booking_cancelled(&booking).await {
            tracing::warn!("Failed to send cancellation email for {}: {}", reference, e);
        }
        Ok(booking)
    }

    /// Refund a paid booking
    pub async fn refund(&self, reference: &str) -> AppResult<Booking> {
        match self
            .repository
            .bookings
            .advance_payment_status(reference, PaymentStatus::Paid, PaymentStatus::Refunded)
            .await?
        {
            Some(booking) => {
                tracing::info!(reference = %reference, "Booking refunded");
                Ok(booking)
            }
            None => {
                let booking = self.repository.bookings.get_by_reference(reference).await?;
                Err(AppError::InvalidTransition(format!(
                    "Cannot refund a booking with payment status {}",
                    booking.payment_status
                )))
            }
        }
    }

    /// Apply an external payment-succeeded event. Idempotent under webhook
    /// replay: only the pending -> paid edge has side effects, and the
    /// booking status is advanced but never regressed.
    pub async fn handle_payment_event(&self, event: PaymentEvent) -> AppResult<()> {
        if !event.succeeded {
            tracing::info!(
                reference = %event.booking_reference,
                "Ignoring unsuccessful payment event"
            );
            return Ok(());
        }

        match self
            .repository
            .bookings
            .advance_payment_status(
                &event.booking_reference,
                PaymentStatus::Pending,
                PaymentStatus::Paid,
            )
            .await?
        {
            Some(booking) => {
                if event.amount_paid != booking.total {
                    tracing::warn!(
                        reference = %booking.booking_reference,
                        expected = %booking.total,
                        paid = %event.amount_paid,
                        "Payment amount does not match booking total"
                    );
                }
                // Payment also confirms a still-pending booking; an
                // admin-set status is left alone.
                self.confirm(&event.booking_reference).await?;
                Ok(())
            }
            None => {
                // Replayed event, or booking unknown. Distinguish so a bad
                // reference is still a 404 for the gateway's dead-letter log.
                let booking = self
                    .repository
                    .bookings
                    .get_by_reference(&event.booking_reference)
                    .await?;
                tracing::info!(
                    reference = %booking.booking_reference,
                    status = %booking.payment_status,
                    "Payment event replay ignored"
                );
                Ok(())
            }
        }
    }

    /// Admin field correction. A date change re-validates availability
    /// against the new range (excluding this booking) under the cabin lock;
    /// admins cannot create overlaps through this path.
    pub async fn admin_update(&self, reference: &str, update: UpdateBooking) -> AppResult<Booking> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let booking = self.repository.bookings.get_by_reference(reference).await?;

        let (check_in, check_out, nights) = if update.changes_dates() {
            let check_in = update.check_in.unwrap_or(booking.check_in);
            let check_out = update.check_out.unwrap_or(booking.check_out);
            let nights = availability::nights_between(check_in, check_out);
            if nights < 1 {
                return Err(AppError::Validation(
                    "check_out must be after check_in".to_string(),
                ));
            }
            (Some(check_in), Some(check_out), Some(nights as i32))
        } else {
            (None, None, None)
        };

        let mut tx = self.repository.pool.begin().await?;

        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            BookingsRepository::lock_cabin(&mut *tx, booking.cabin_id).await?;
            if BookingsRepository::overlap_exists(
                &mut *tx,
                booking.cabin_id,
                check_in,
                check_out,
                Some(booking.id),
            )
            .await?
            {
                return Err(AppError::DateConflict {
                    cabin_id: booking.cabin_id,
                    check_in,
                    check_out,
                });
            }
        }

        let updated = BookingsRepository::update_fields(
            &mut *tx,
            booking.id,
            update.guest_name.as_deref(),
            update.guest_email.as_deref(),
            update.guest_phone.as_deref(),
            update.special_requests.as_deref(),
            check_in,
            check_out,
            nights,
            update.guests,
            update.status,
            update.payment_status,
        )
        .await?;

        tx.commit().await?;
        tracing::info!(reference = %reference, "Booking updated by admin");
        Ok(updated)
    }

    /// Irreversible admin delete
    pub async fn delete(&self, reference: &str) -> AppResult<()> {
        let booking = self.repository.bookings.get_by_reference(reference).await?;
        self.repository.bookings.delete(booking.id).await?;
        tracing::info!(reference = %reference, "Booking deleted by admin");
        Ok(())
    }
}

/// Generate a candidate booking reference, e.g. `AF3K9ZQ2`
fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERENCE_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_CHARSET.len());
            REFERENCE_CHARSET[idx] as char
        })
        .collect();
    format!("{}{}", REFERENCE_PREFIX, suffix)
}

/// Whether an insert failure was the reference uniqueness constraint (retry
/// with a fresh reference) rather than anything else.
fn is_reference_collision(error: &AppError) -> bool {
    match error {
        AppError::Database(sqlx::Error::Database(db)) => {
            db.constraint() == Some(REFERENCE_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_has_prefix_and_length() {
        for _ in 0..100 {
            let reference = generate_reference();
            assert_eq!(reference.len(), 8);
            assert!(reference.starts_with(REFERENCE_PREFIX));
            assert!(reference
                .bytes()
                .skip(2)
                .all(|b| REFERENCE_CHARSET.contains(&b)));
        }
    }

    #[test]
    fn references_are_not_constant() {
        let a = generate_reference();
        let b = generate_reference();
        let c = generate_reference();
        assert!(a != b || b != c);
    }
}
