//! Availability checking
//!
//! Pure date-range logic over half-open `[check_in, check_out)` intervals:
//! the checkout day itself is free for a new check-in. The occupied ranges
//! come from the current non-cancelled bookings of a cabin; nothing here is
//! cached across requests.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::models::{booking::Booking, enums::BookingStatus};

/// Whole nights between check-in and check-out. Negative or zero means the
/// range is malformed.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Half-open interval overlap: `[a_in, a_out)` shares at least one night with
/// `[b_in, b_out)`
fn ranges_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && b_in < a_out
}

/// Whether the candidate range is free given the cabin's existing bookings.
///
/// Cancelled bookings never block; `exclude_booking` skips the booking being
/// moved so its own nights do not conflict with themselves. Malformed ranges
/// (`check_out <= check_in`) are reported unavailable rather than panicking;
/// callers validate and surface the proper error before relying on this.
pub fn is_range_available(
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &[Booking],
    exclude_booking: Option<i32>,
) -> bool {
    if check_out <= check_in {
        return false;
    }
    !existing.iter().any(|b| {
        b.status != BookingStatus::Cancelled
            && Some(b.id) != exclude_booking
            && ranges_overlap(check_in, check_out, b.check_in, b.check_out)
    })
}

/// Every booked night across the given bookings, for the calendar feed.
/// Derived on each query from current non-cancelled bookings.
pub fn unavailable_dates(existing: &[Booking]) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    for booking in existing {
        if booking.status == BookingStatus::Cancelled {
            continue;
        }
        let mut night = booking.check_in;
        while night < booking.check_out {
            dates.insert(night);
            night += Duration::days(1);
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::models::enums::{Language, PaymentStatus};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(id: i32, check_in: &str, check_out: &str, status: BookingStatus) -> Booking {
        let check_in = date(check_in);
        let check_out = date(check_out);
        Booking {
            id,
            booking_reference: format!("AF00000{}", id),
            cabin_id: 1,
            cabin_name: "Afina".to_string(),
            check_in,
            check_out,
            nights: nights_between(check_in, check_out) as i32,
            guests: 2,
            guest_name: "Guest".to_string(),
            guest_email: "guest@example.com".to_string(),
            guest_phone: None,
            special_requests: None,
            base_price: dec!(900),
            cleaning_fee: dec!(50),
            service_fee: dec!(90),
            tax: dec!(171),
            discount: dec!(0),
            total: dec!(1211),
            promo_code: None,
            status,
            payment_status: PaymentStatus::Pending,
            language: Language::En,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overlapping_range_rejected() {
        let existing = vec![booking(1, "2025-06-01", "2025-06-05", BookingStatus::Confirmed)];
        assert!(!is_range_available(
            date("2025-06-04"),
            date("2025-06-07"),
            &existing,
            None
        ));
    }

    #[test]
    fn checkout_day_free_for_new_checkin() {
        let existing = vec![booking(1, "2025-06-01", "2025-06-05", BookingStatus::Confirmed)];
        assert!(is_range_available(
            date("2025-06-05"),
            date("2025-06-08"),
            &existing,
            None
        ));
    }

    #[test]
    fn range_ending_on_checkin_day_accepted() {
        let existing = vec![booking(1, "2025-06-01", "2025-06-05", BookingStatus::Confirmed)];
        assert!(is_range_available(
            date("2025-05-28"),
            date("2025-06-01"),
            &existing,
            None
        ));
    }

    #[test]
    fn contained_range_rejected() {
        let existing = vec![booking(1, "2025-06-01", "2025-06-10", BookingStatus::Pending)];
        assert!(!is_range_available(
            date("2025-06-03"),
            date("2025-06-04"),
            &existing,
            None
        ));
    }

    #[test]
    fn cancelled_bookings_do_not_block() {
        let existing = vec![booking(1, "2025-06-01", "2025-06-05", BookingStatus::Cancelled)];
        assert!(is_range_available(
            date("2025-06-02"),
            date("2025-06-04"),
            &existing,
            None
        ));
    }

    #[test]
    fn excluded_booking_does_not_block_itself() {
        let existing = vec![booking(7, "2025-06-01", "2025-06-05", BookingStatus::Confirmed)];
        assert!(is_range_available(
            date("2025-06-02"),
            date("2025-06-06"),
            &existing,
            Some(7)
        ));
        assert!(!is_range_available(
            date("2025-06-02"),
            date("2025-06-06"),
            &existing,
            None
        ));
    }

    #[test]
    fn malformed_range_unavailable() {
        assert!(!is_range_available(date("2025-06-05"), date("2025-06-05"), &[], None));
        assert!(!is_range_available(date("2025-06-06"), date("2025-06-05"), &[], None));
    }

    #[test]
    fn unavailable_dates_are_booked_nights_only() {
        let existing = vec![
            booking(1, "2025-06-01", "2025-06-03", BookingStatus::Confirmed),
            booking(2, "2025-06-10", "2025-06-11", BookingStatus::Pending),
            booking(3, "2025-06-20", "2025-06-25", BookingStatus::Cancelled),
        ];
        let dates = unavailable_dates(&existing);
        let expected: BTreeSet<NaiveDate> = [
            date("2025-06-01"),
            date("2025-06-02"),
            date("2025-06-10"),
        ]
        .into_iter()
        .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn nights_counting() {
        assert_eq!(nights_between(date("2025-06-01"), date("2025-06-05")), 4);
        assert_eq!(nights_between(date("2025-06-01"), date("2025-06-02")), 1);
        assert_eq!(nights_between(date("2025-06-01"), date("2025-06-01")), 0);
    }
}
