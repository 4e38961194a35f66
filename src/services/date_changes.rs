//! Date-change request management
//!
//! Guests propose new dates for an existing booking; an admin approves or
//! rejects. Approval re-checks availability against the requested range at
//! decision time (the booking's own nights are excluded, since it is the one
//! being moved) and flips the request and rewrites the booking dates in a
//! single transaction: both or neither.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        date_change::{DateChangeRequest, ProposeDateChange},
        enums::{BookingStatus, DateChangeStatus},
    },
    repository::{
        bookings::BookingsRepository, date_changes::DateChangesRepository, Repository,
    },
    services::{availability, email::EmailService},
};

#[derive(Clone)]
pub struct DateChangesService {
    repository: Repository,
    email: EmailService,
}

impl DateChangesService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// List requests, optionally by status (admin)
    pub async fn list(&self, status: Option<DateChangeStatus>) -> AppResult<Vec<DateChangeRequest>> {
        self.repository.date_changes.list(status).await
    }

    /// Guest proposal: snapshot the booking's current dates and store the
    /// request as pending. Availability is deliberately not checked here —
    /// it is re-checked at approval time, when it actually matters.
    pub async fn propose(&self, request: ProposeDateChange) -> AppResult<DateChangeRequest> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if availability::nights_between(request.requested_check_in, request.requested_check_out) < 1
        {
            return Err(AppError::Validation(
                "requested_check_out must be after requested_check_in".to_string(),
            ));
        }

        let booking = self
            .repository
            .bookings
            .get_by_reference(&request.booking_reference)
            .await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::InvalidTransition(
                "Cannot move a cancelled booking".to_string(),
            ));
        }

        let created = self
            .repository
            .date_changes
            .insert(
                &booking.booking_reference,
                booking.check_in,
                booking.check_out,
                request.requested_check_in,
                request.requested_check_out,
                request.message.as_deref(),
            )
            .await?;

        tracing::info!(
            reference = %booking.booking_reference,
            request = created.id,
            "Date-change request created"
        );
        if let Err(e) = self
            .email
            .send_admin_date_change_alert(&booking.booking_reference)
            .await
        {
            tracing::warn!("Failed to send admin alert for request {}: {}", created.id, e);
        }
        Ok(created)
    }

    /// Approve a pending request. On a date conflict the transaction is
    /// dropped, the request stays pending and the admin gets a 409.
    pub async fn approve(&self, request_id: i32) -> AppResult<DateChangeRequest> {
        let request = self.repository.date_changes.get_by_id(request_id).await?;
        if request.status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "Request {} has already been decided",
                request_id
            )));
        }

        let booking = self
            .repository
            .bookings
            .get_by_reference(&request.booking_reference)
            .await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::InvalidTransition(
                "Cannot move a cancelled booking".to_string(),
            ));
        }

        let nights = availability::nights_between(
            request.requested_check_in,
            request.requested_check_out,
        ) as i32;

        let mut tx = self.repository.pool.begin().await?;

        BookingsRepository::lock_cabin(&mut *tx, booking.cabin_id).await?;

        if BookingsRepository::overlap_exists(
            &mut *tx,
            booking.cabin_id,
            request.requested_check_in,
            request.requested_check_out,
            Some(booking.id),
        )
        .await?
        {
            return Err(AppError::DateConflict {
                cabin_id: booking.cabin_id,
                check_in: request.requested_check_in,
                check_out: request.requested_check_out,
            });
        }

        if !DateChangesRepository::decide(&mut *tx, request_id, DateChangeStatus::Approved).await? {
            return Err(AppError::ConcurrencyConflict(format!(
                "Request {} was decided by someone else",
                request_id
            )));
        }

        BookingsRepository::update_dates(
            &mut *tx,
            booking.id,
            request.requested_check_in,
            request.requested_check_out,
            nights,
        )
        .await?;

        tx.commit().await?;
        tracing::info!(
            reference = %booking.booking_reference,
            request = request_id,
            "Date-change request approved"
        );

        let updated_booking = self.repository.bookings.get_by_id(booking.id).await?;
        if let Err(e) = self.email.send_date_change_decision(&updated_booking, true).await {
            tracing::warn!("Failed to send approval email for request {}: {}", request_id, e);
        }

        self.repository.date_changes.get_by_id(request_id).await
    }

    /// Reject a pending request; the booking is untouched
    pub async fn reject(&self, request_id: i32) -> AppResult<DateChangeRequest> {
        let request = self.repository.date_changes.get_by_id(request_id).await?;
        if request.status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "Request {} has already been decided",
                request_id
            )));
        }

        let mut conn = self.repository.pool.acquire().await?;
        if !DateChangesRepository::decide(&mut *conn, request_id, DateChangeStatus::Rejected).await? {
            return Err(AppError::ConcurrencyConflict(format!(
                "Request {} was decided by someone else",
                request_id
            )));
        }
        drop(conn);

        tracing::info!(request = request_id, "Date-change request rejected");

        if let Ok(booking) = self
            .repository
            .bookings
            .get_by_reference(&request.booking_reference)
            .await
        {
            if let Err(e) = self.email.send_date_change_decision(&booking, false).await {
                tracing::warn!("Failed to send rejection email for request {}: {}", request_id, e);
            }
        }

        self.repository.date_changes.get_by_id(request_id).await
    }
}
