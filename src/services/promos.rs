//! Promo code validation and administration
//!
//! Validation runs the checks in a fixed order and reports the first failure:
//! existence, kill-switch, start of window, end of window, usage cap. A
//! failed validation never mutates state; the usage counter only moves via
//! the conditional increment inside a booking-create transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::promo::{CreatePromoCode, PromoCode, PromoRejection, UpdatePromoCode},
    repository::Repository,
};

/// Pure policy check against a loaded promo row. Ordering matters: the
/// reason returned is the first gate the code fails.
pub fn evaluate(promo: &PromoCode, now: DateTime<Utc>) -> Result<(), PromoRejection> {
    if !promo.is_active {
        return Err(PromoRejection::Disabled);
    }
    if now < promo.valid_from {
        return Err(PromoRejection::NotYetValid);
    }
    if let Some(valid_until) = promo.valid_until {
        if now > valid_until {
            return Err(PromoRejection::Expired);
        }
    }
    if let Some(max_uses) = promo.max_uses {
        if promo.current_uses >= max_uses {
            return Err(PromoRejection::UsageLimitReached);
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct PromosService {
    repository: Repository,
}

impl PromosService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Look up and validate a code. Returns the promo row on success so the
    /// caller can price the discount.
    pub async fn validate(&self, code: &str) -> AppResult<PromoCode> {
        let promo = self
            .repository
            .promos
            .find_by_code(code)
            .await?
            .ok_or(AppError::Promo(PromoRejection::NotFound))?;

        evaluate(&promo, Utc::now()).map_err(AppError::Promo)?;
        Ok(promo)
    }

    /// List all promo codes (admin)
    pub async fn list(&self) -> AppResult<Vec<PromoCode>> {
        self.repository.promos.list().await
    }

    /// Create a promo code (admin)
    pub async fn create(&self, request: CreatePromoCode) -> AppResult<PromoCode> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        check_discount(request.discount_type, request.discount_value)?;

        let promo = self.repository.promos.insert(&request).await?;
        tracing::info!("Created promo code {}", promo.code);
        Ok(promo)
    }

    /// Update a promo code (admin)
    pub async fn update(&self, id: i32, request: UpdatePromoCode) -> AppResult<PromoCode> {
        let current = self.repository.promos.get_by_id(id).await?;
        let discount_type = request.discount_type.unwrap_or(current.discount_type);
        let discount_value = request.discount_value.unwrap_or(current.discount_value);
        check_discount(discount_type, discount_value)?;

        if let Some(max_uses) = request.max_uses {
            if max_uses < current.current_uses {
                return Err(AppError::Validation(format!(
                    "max_uses {} is below the {} redemptions already made",
                    max_uses, current.current_uses
                )));
            }
        }

        self.repository.promos.update(id, &request).await
    }

    /// Delete a promo code (admin)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.promos.delete(id).await?;
        tracing::info!("Deleted promo code id {}", id);
        Ok(())
    }
}

fn check_discount(
    discount_type: crate::models::enums::DiscountType,
    value: Decimal,
) -> AppResult<()> {
    use crate::models::enums::DiscountType;
    match discount_type {
        DiscountType::Percentage => {
            if value < Decimal::ONE || value > Decimal::ONE_HUNDRED {
                return Err(AppError::Validation(
                    "Percentage discount must be between 1 and 100".to_string(),
                ));
            }
        }
        DiscountType::Fixed => {
            if value <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "Fixed discount must be positive".to_string(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use crate::models::enums::DiscountType;

    fn promo() -> PromoCode {
        let now = Utc::now();
        PromoCode {
            id: 1,
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            max_uses: Some(5),
            current_uses: 0,
            valid_from: now - Duration::days(1),
            valid_until: Some(now + Duration::days(30)),
            is_active: true,
            created_at: now - Duration::days(1),
        }
    }

    #[test]
    fn valid_code_passes() {
        assert_eq!(evaluate(&promo(), Utc::now()), Ok(()));
    }

    #[test]
    fn disabled_wins_over_everything() {
        let mut p = promo();
        p.is_active = false;
        p.current_uses = 5;
        p.valid_until = Some(Utc::now() - Duration::days(1));
        assert_eq!(evaluate(&p, Utc::now()), Err(PromoRejection::Disabled));
    }

    #[test]
    fn not_yet_valid_before_window() {
        let mut p = promo();
        p.valid_from = Utc::now() + Duration::days(2);
        assert_eq!(evaluate(&p, Utc::now()), Err(PromoRejection::NotYetValid));
    }

    #[test]
    fn expired_after_window() {
        let mut p = promo();
        p.valid_until = Some(Utc::now() - Duration::hours(1));
        assert_eq!(evaluate(&p, Utc::now()), Err(PromoRejection::Expired));
    }

    #[test]
    fn no_upper_bound_when_valid_until_absent() {
        let mut p = promo();
        p.valid_until = None;
        assert_eq!(evaluate(&p, Utc::now() + Duration::days(3650)), Ok(()));
    }

    #[test]
    fn usage_cap_reached() {
        let mut p = promo();
        p.current_uses = 5;
        assert_eq!(evaluate(&p, Utc::now()), Err(PromoRejection::UsageLimitReached));
    }

    #[test]
    fn uncapped_code_never_exhausts() {
        let mut p = promo();
        p.max_uses = None;
        p.current_uses = 1_000_000;
        assert_eq!(evaluate(&p, Utc::now()), Ok(()));
    }
}
