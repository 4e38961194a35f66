//! Pricing engine
//!
//! Pure price computation for a stay: nightly subtotal, cleaning fee,
//! percentage-based service fee and tax from system settings, and an optional
//! promo discount. No I/O; identical inputs always produce identical output,
//! which keeps receipts reproducible.

use rust_decimal::Decimal;

use crate::models::{
    booking::PriceBreakdown,
    enums::DiscountType,
    promo::PromoCode,
    settings::SystemSettings,
};

/// Compute the full price breakdown for a stay.
///
/// Percentages in settings are whole numbers (19 means 19%). The caller is
/// responsible for rejecting `nights < 1` and negative rates before pricing;
/// the promo, if supplied, must already have passed validation. The discount
/// is clamped so the total never goes negative.
pub fn compute_price(
    nightly_rate: Decimal,
    nights: i32,
    settings: &SystemSettings,
    promo: Option<&PromoCode>,
) -> PriceBreakdown {
    let subtotal = nightly_rate * Decimal::from(nights);
    let service_fee = subtotal * settings.service_fee_percent / Decimal::ONE_HUNDRED;
    let tax = subtotal * settings.tax_percent / Decimal::ONE_HUNDRED;
    let total_before_discount = subtotal + settings.cleaning_fee + service_fee + tax;

    let discount = promo
        .map(|p| discount_for(p, total_before_discount))
        .unwrap_or(Decimal::ZERO);

    PriceBreakdown {
        subtotal,
        cleaning_fee: settings.cleaning_fee,
        service_fee,
        tax,
        total_before_discount,
        discount,
        total: total_before_discount - discount,
    }
}

/// Discount a promo grants on a pre-discount total, clamped to the total
fn discount_for(promo: &PromoCode, total: Decimal) -> Decimal {
    let raw = match promo.discount_type {
        DiscountType::Percentage => total * promo.discount_value / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => promo.discount_value,
    };
    raw.min(total).max(Decimal::ZERO)
}

/// Deposit due at booking time, per the settings' deposit_percent
pub fn deposit_due(total: Decimal, settings: &SystemSettings) -> Decimal {
    if settings.deposit_percent.is_zero() {
        total
    } else {
        total * settings.deposit_percent / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rust_decimal_macros::dec;

    fn settings() -> SystemSettings {
        SystemSettings {
            cleaning_fee: dec!(50),
            service_fee_percent: dec!(10),
            tax_percent: dec!(19),
            min_nights: 1,
            max_nights: 30,
            check_in_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            check_out_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            deposit_percent: dec!(0),
            payment_methods: vec!["card".to_string()],
        }
    }

    fn promo(discount_type: DiscountType, value: Decimal) -> PromoCode {
        PromoCode {
            id: 1,
            code: "SAVE10".to_string(),
            discount_type,
            discount_value: value,
            max_uses: None,
            current_uses: 0,
            valid_from: Utc::now(),
            valid_until: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn three_nights_no_promo() {
        let price = compute_price(dec!(300), 3, &settings(), None);
        assert_eq!(price.subtotal, dec!(900));
        assert_eq!(price.service_fee, dec!(90));
        assert_eq!(price.tax, dec!(171));
        assert_eq!(price.cleaning_fee, dec!(50));
        assert_eq!(price.discount, dec!(0));
        assert_eq!(price.total, dec!(1211));
    }

    #[test]
    fn percentage_promo() {
        let p = promo(DiscountType::Percentage, dec!(10));
        let price = compute_price(dec!(300), 3, &settings(), Some(&p));
        assert_eq!(price.discount, dec!(121.1));
        assert_eq!(price.total, dec!(1089.9));
    }

    #[test]
    fn fixed_promo() {
        let p = promo(DiscountType::Fixed, dec!(200));
        let price = compute_price(dec!(300), 3, &settings(), Some(&p));
        assert_eq!(price.discount, dec!(200));
        assert_eq!(price.total, dec!(1011));
    }

    #[test]
    fn fixed_promo_clamped_to_total() {
        let p = promo(DiscountType::Fixed, dec!(10000));
        let price = compute_price(dec!(100), 1, &settings(), Some(&p));
        assert_eq!(price.discount, price.total_before_discount);
        assert_eq!(price.total, dec!(0));
    }

    #[test]
    fn single_night_boundary() {
        let price = compute_price(dec!(300), 1, &settings(), None);
        assert_eq!(price.subtotal, dec!(300));
        assert_eq!(price.total, dec!(300) + dec!(50) + dec!(30) + dec!(57));
    }

    #[test]
    fn deterministic() {
        let p = promo(DiscountType::Percentage, dec!(15));
        let a = compute_price(dec!(425.50), 7, &settings(), Some(&p));
        let b = compute_price(dec!(425.50), 7, &settings(), Some(&p));
        assert_eq!(a, b);
    }

    #[test]
    fn deposit_full_when_zero_percent() {
        assert_eq!(deposit_due(dec!(1211), &settings()), dec!(1211));
        let mut s = settings();
        s.deposit_percent = dec!(30);
        assert_eq!(deposit_due(dec!(1000), &s), dec!(300));
    }
}
