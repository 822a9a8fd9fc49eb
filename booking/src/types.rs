//! Domain types for the booking flow.
//!
//! Everything the flow tracks lives here: the catalogue item being booked,
//! the chosen slot, the customer's contact details, the derived pricing
//! breakdown, and the page the user is currently on. The in-progress
//! [`Booking`] aggregates all of it.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalogue experience
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperienceId(u32);

impl ExperienceId {
    /// Creates an `ExperienceId` from a raw id
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable catalogue item (tour, class, activity)
///
/// Immutable once fetched from the catalogue; the booking keeps its own copy
/// after selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Unique identifier
    pub id: ExperienceId,
    /// Display title
    pub title: String,
    /// Human-readable location ("Kyoto, Japan")
    pub location: String,
    /// Long-form description
    pub description: String,
    /// Unit price (non-negative)
    pub price: f64,
    /// Average rating
    pub rating: f64,
    /// Number of reviews behind the rating
    pub reviews: u32,
    /// Whether the host is a superhost
    pub superhost: bool,
    /// Ordered image references
    pub images: Vec<String>,
}

/// A bookable (time, availability) pair for a given date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Display time ("10:00 AM")
    pub time: String,
    /// Whether this slot can currently be booked
    pub available: bool,
}

/// An ordered sequence of time slots under one calendar date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlots {
    /// Calendar date, ISO `YYYY-MM-DD`
    pub date: String,
    /// Slots offered on that date
    pub slots: Vec<TimeSlot>,
}

/// Contact details collected on the checkout form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Customer's full name
    pub full_name: String,
    /// Customer's email address
    pub email: String,
    /// Customer's phone number
    pub phone: String,
}

impl UserDetails {
    /// Merges the present fields of a patch into these details
    ///
    /// Fields the patch does not carry are left unchanged.
    pub fn merge(&mut self, patch: UserDetailsPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }
}

/// Partial update to [`UserDetails`]
///
/// Each checkout form field dispatches its own patch as the user types;
/// absent fields mean "leave as is".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailsPatch {
    /// New full name, if changed
    pub full_name: Option<String>,
    /// New email, if changed
    pub email: Option<String>,
    /// New phone, if changed
    pub phone: Option<String>,
}

/// The derived pricing tuple for the current booking
///
/// `discount` is always an absolute currency amount; percentage promo codes
/// are converted once at apply time against the base price of that moment.
/// `total` is never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// The experience unit price
    pub base_price: f64,
    /// Taxes on the base price
    pub taxes: f64,
    /// Absolute discount amount (>= 0)
    pub discount: f64,
    /// `max(0, base_price + taxes - discount)`
    pub total: f64,
}

/// How a promo discount value is expressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountKind {
    /// Value is a fraction of the base price (0.10 = 10%)
    Percent,
    /// Value is an absolute currency amount
    Flat,
}

/// A validated promo discount as returned by the promo collaborator
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromoDiscount {
    /// Discount value, interpreted per `kind`
    pub value: f64,
    /// Whether the value is a percentage or a flat amount
    pub kind: DiscountKind,
}

/// Response from the booking submission collaborator
///
/// `success: false` is a business failure, distinct from a transport error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Whether the reservation was accepted
    pub success: bool,
    /// Confirmation id (empty when not accepted)
    pub booking_id: String,
}

/// The single in-progress reservation
///
/// Created empty at startup, fully reset whenever a new experience is
/// selected, progressively filled through the flow, and reset back to empty
/// on return to the catalogue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Selected experience (None before selection)
    pub experience: Option<Experience>,
    /// Selected calendar date, ISO `YYYY-MM-DD`
    pub date: Option<String>,
    /// Selected time within the date
    pub time: Option<String>,
    /// Contact details from the checkout form
    pub user_details: UserDetails,
    /// Applied promo code (empty = none)
    pub promo_code: String,
    /// Derived pricing for the current selection
    pub pricing: PricingBreakdown,
}

impl Booking {
    /// Whether both a date and a time have been chosen
    #[must_use]
    pub const fn slot_selected(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }

    /// Whether the booking can be submitted (experience and slot present)
    #[must_use]
    pub const fn submittable(&self) -> bool {
        self.experience.is_some() && self.slot_selected()
    }
}

/// Terminal outcome shown on the result screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    /// The reservation was confirmed
    Success,
    /// The reservation was not made
    Failure,
}

/// The current screen and its required parameters
///
/// Pages other than `Home` are only produced by store transitions that
/// guarantee their prerequisite state exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    /// Catalogue listing
    #[default]
    Home,
    /// Item detail and slot picker
    Details {
        /// The experience being viewed
        experience_id: ExperienceId,
    },
    /// Contact details, promo code, and confirmation
    Checkout,
    /// Terminal success/failure screen
    Result {
        /// How the submission ended
        outcome: BookingOutcome,
    },
}

/// Identifies one in-flight asynchronous operation
///
/// Every promo validation or submission issues a fresh token; the resolution
/// carries it back, and resolutions whose token is no longer current are
/// discarded instead of overwriting newer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Creates a token from a raw sequence number
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_details_merge_keeps_absent_fields() {
        let mut details = UserDetails {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        };

        details.merge(UserDetailsPatch {
            email: Some("ada@newdomain.com".to_string()),
            ..UserDetailsPatch::default()
        });

        assert_eq!(details.full_name, "Ada Lovelace");
        assert_eq!(details.email, "ada@newdomain.com");
        assert_eq!(details.phone, "555-0100");
    }

    #[test]
    fn empty_booking_is_not_submittable() {
        let booking = Booking::default();
        assert!(!booking.slot_selected());
        assert!(!booking.submittable());
        assert_eq!(booking.promo_code, "");
        assert_eq!(booking.pricing, PricingBreakdown::default());
    }

    #[test]
    fn booking_with_slot_but_no_experience_is_not_submittable() {
        let booking = Booking {
            date: Some("2026-03-14".to_string()),
            time: Some("10:00 AM".to_string()),
            ..Booking::default()
        };
        assert!(booking.slot_selected());
        assert!(!booking.submittable());
    }

    #[test]
    fn default_page_is_home() {
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn experience_id_display() {
        assert_eq!(ExperienceId::new(3).to_string(), "3");
    }
}
