//! Bookings repository for database operations

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, PriceBreakdown},
        enums::{BookingStatus, Language, PaymentStatus},
    },
};

/// Row data for a booking insert. The reference is generated by the caller
/// and retried there on a uniqueness violation.
pub struct NewBooking<'a> {
    pub booking_reference: &'a str,
    pub cabin_id: i32,
    pub cabin_name: &'a str,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub guests: i32,
    pub guest_name: &'a str,
    pub guest_email: &'a str,
    pub guest_phone: Option<&'a str>,
    pub special_requests: Option<&'a str>,
    pub price: &'a PriceBreakdown,
    pub promo_code: Option<&'a str>,
    pub language: Language,
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by reference
    pub async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", reference)))
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// List all bookings, newest first
    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Non-cancelled bookings for a cabin, used to derive the unavailable-dates
    /// calendar
    pub async fn find_active_by_cabin(&self, cabin_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE cabin_id = $1 AND status != 'cancelled'
            ORDER BY check_in
            "#,
        )
        .bind(cabin_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Take the per-cabin advisory lock for the current transaction.
    /// Serializes availability check + insert against concurrent creates for
    /// the same cabin; released automatically at commit/rollback.
    pub async fn lock_cabin(conn: &mut PgConnection, cabin_id: i32) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(0x0cab_i32)
            .bind(cabin_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Whether any night in `[check_in, check_out)` overlaps a non-cancelled
    /// booking for the cabin. `exclude_booking` skips the booking being moved
    /// (date-change approval, admin date edits).
    pub async fn overlap_exists(
        conn: &mut PgConnection,
        cabin_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE cabin_id = $1
                  AND status != 'cancelled'
                  AND check_in < $3
                  AND check_out > $2
                  AND ($4::int IS NULL OR id != $4)
            )
            "#,
        )
        .bind(cabin_id)
        .bind(check_in)
        .bind(check_out)
        .bind(exclude_booking)
        .fetch_one(conn)
        .await?;
        Ok(exists)
    }

    /// Insert a booking inside the caller's transaction. Maps the exclusion
    /// constraint to ConcurrencyConflict and the reference uniqueness
    /// violation to a retriable error the caller distinguishes by constraint
    /// name.
    pub async fn insert(conn: &mut PgConnection, new: &NewBooking<'_>) -> AppResult<Booking> {
        let result = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                booking_reference, cabin_id, cabin_name, check_in, check_out,
                nights, guests, guest_name, guest_email, guest_phone,
                special_requests, base_price, cleaning_fee, service_fee, tax,
                discount, total, promo_code, status, payment_status, language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, 'pending', 'pending', $19)
            RETURNING *
            "#,
        )
        .bind(new.booking_reference)
        .bind(new.cabin_id)
        .bind(new.cabin_name)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.nights)
        .bind(new.guests)
        .bind(new.guest_name)
        .bind(new.guest_email)
        .bind(new.guest_phone)
        .bind(new.special_requests)
        .bind(new.price.subtotal)
        .bind(new.price.cleaning_fee)
        .bind(new.price.service_fee)
        .bind(new.price.tax)
        .bind(new.price.discount)
        .bind(new.price.total)
        .bind(new.promo_code)
        .bind(new.language)
        .fetch_one(conn)
        .await;

        result.map_err(map_insert_error)
    }

    /// Overwrite a booking's dates inside the caller's transaction
    pub async fn update_dates(
        conn: &mut PgConnection,
        id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        nights: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET check_in = $2, check_out = $3, nights = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(check_in)
        .bind(check_out)
        .bind(nights)
        .execute(conn)
        .await
        .map_err(map_insert_error)?;
        Ok(())
    }

    /// Set booking status
    pub async fn set_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(booking)
    }

    /// Conditionally advance payment status. Returns the updated booking only
    /// if a row actually moved from `from` to `to`; None means the booking is
    /// already past that state (replayed event) or does not exist.
    pub async fn advance_payment_status(
        &self,
        reference: &str,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET payment_status = $3, updated_at = NOW()
            WHERE booking_reference = $1 AND payment_status = $2
            RETURNING *
            "#,
        )
        .bind(reference)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Apply an admin field overwrite. Dates must already be validated by the
    /// caller; COALESCE keeps unspecified fields untouched.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: i32,
        guest_name: Option<&str>,
        guest_email: Option<&str>,
        guest_phone: Option<&str>,
        special_requests: Option<&str>,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        nights: Option<i32>,
        guests: Option<i32>,
        status: Option<BookingStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET
                guest_name = COALESCE($2, guest_name),
                guest_email = COALESCE($3, guest_email),
                guest_phone = COALESCE($4, guest_phone),
                special_requests = COALESCE($5, special_requests),
                check_in = COALESCE($6, check_in),
                check_out = COALESCE($7, check_out),
                nights = COALESCE($8, nights),
                guests = COALESCE($9, guests),
                status = COALESCE($10, status),
                payment_status = COALESCE($11, payment_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(guest_name)
        .bind(guest_email)
        .bind(guest_phone)
        .bind(special_requests)
        .bind(check_in)
        .bind(check_out)
        .bind(nights)
        .bind(guests)
        .bind(status)
        .bind(payment_status)
        .fetch_optional(conn)
        .await
        .map_err(map_insert_error)?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(booking)
    }

    /// Irreversible admin delete
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking with id {} not found", id)));
        }
        Ok(())
    }
}

/// Name of the unique constraint on booking_reference, used by the service
/// layer to decide whether an insert failure is retriable with a fresh
/// reference.
pub const REFERENCE_UNIQUE_CONSTRAINT: &str = "bookings_booking_reference_key";

/// Translate insert/update failures: the GiST exclusion constraint firing
/// means we lost a date race to a concurrent writer.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some("23P01") {
            return AppError::ConcurrencyConflict(
                "These dates were just booked by someone else".to_string(),
            );
        }
    }
    AppError::Database(e)
}
