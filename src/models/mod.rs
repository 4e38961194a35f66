//! Data models for Cabana

pub mod booking;
pub mod cabin;
pub mod date_change;
pub mod enums;
pub mod promo;
pub mod settings;

// Re-export commonly used types
pub use booking::{Booking, PriceBreakdown};
pub use cabin::Cabin;
pub use date_change::DateChangeRequest;
pub use enums::{BookingStatus, DateChangeStatus, DiscountType, Language, PaymentStatus};
pub use promo::{PromoCode, PromoRejection};
pub use settings::SystemSettings;
