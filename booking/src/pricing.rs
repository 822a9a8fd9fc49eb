//! Pricing engine for the booking flow.
//!
//! A pure function from (experience, discount, tax rate) to a
//! [`PricingBreakdown`]. No side effects and no error conditions:
//! out-of-range inputs are accepted as-is, and the only clamping applied is
//! the final floor at zero on the total.

use crate::types::{DiscountKind, Experience, PricingBreakdown, PromoDiscount};

/// Tax rate applied to every booking unless configured otherwise
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Computes the pricing breakdown for the given selection
///
/// With no experience selected this returns the zero breakdown. Otherwise
/// `base_price` is the experience unit price, `taxes = base_price * tax_rate`,
/// and `total = max(0, base_price + taxes - discount)`.
///
/// The tax rate is a configuration constant supplied by the environment at
/// construction, not chosen per call.
#[must_use]
pub fn compute_pricing(
    experience: Option<&Experience>,
    discount: f64,
    tax_rate: f64,
) -> PricingBreakdown {
    let Some(experience) = experience else {
        return PricingBreakdown::default();
    };

    let base_price = experience.price;
    let taxes = base_price * tax_rate;
    let total = (base_price + taxes - discount).max(0.0);

    PricingBreakdown {
        base_price,
        taxes,
        discount,
        total,
    }
}

/// Converts a validated promo discount into an absolute amount
///
/// Percentage discounts are resolved against the base price current at apply
/// time; the conversion happens exactly once, here.
#[must_use]
pub fn absolute_discount(discount: PromoDiscount, base_price: f64) -> f64 {
    match discount.kind {
        DiscountKind::Percent => base_price * discount.value,
        DiscountKind::Flat => discount.value,
    }
}
