//! External collaborator contracts and their simulated stand-ins.
//!
//! The core flow depends on four collaborators: the catalogue, slot
//! availability, promo validation, and booking submission. Each is a trait
//! here; the implementations in this module are in-process simulations with
//! artificial latency and configurable failure rates. A real deployment
//! would put networked services behind the same traits.
//!
//! # Dyn Compatibility
//!
//! The traits use explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn PromoService>`). This is
//! required for the effect system, where reducers create effects that capture
//! the collaborator.

use crate::types::{
    Booking, DateSlots, DiscountKind, Experience, ExperienceId, PromoDiscount, SubmissionReceipt,
    TimeSlot,
};
use bookflow_core::environment::Clock;
use chrono::Days;
use rand::Rng;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure modes of promo code validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoError {
    /// The code is not recognized
    #[error("Invalid promo code")]
    InvalidCode,
}

/// Transport-level failure of booking submission
///
/// Distinct from a `success: false` receipt, which is a business answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The call itself failed (network, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Catalogue of bookable experiences
pub trait CatalogService: Send + Sync {
    /// Fetch the full ordered catalogue
    fn fetch_catalogue(&self) -> Pin<Box<dyn Future<Output = Vec<Experience>> + Send + '_>>;

    /// Fetch a single experience by id
    ///
    /// An unknown id yields `None`, not an error.
    fn fetch_experience(
        &self,
        id: ExperienceId,
    ) -> Pin<Box<dyn Future<Output = Option<Experience>> + Send + '_>>;
}

/// Slot availability for a given experience
pub trait AvailabilityService: Send + Sync {
    /// Fetch the ordered date/slot grid for an experience
    fn fetch_slots(
        &self,
        id: ExperienceId,
    ) -> Pin<Box<dyn Future<Output = Vec<DateSlots>> + Send + '_>>;
}

/// Promo code validation
pub trait PromoService: Send + Sync {
    /// Validate a code and return its discount
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::InvalidCode`] when the code is unrecognized.
    fn validate_code(
        &self,
        code: &str,
    ) -> Pin<Box<dyn Future<Output = Result<PromoDiscount, PromoError>> + Send + '_>>;
}

/// Booking submission
pub trait BookingGateway: Send + Sync {
    /// Submit a full booking snapshot for confirmation
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Transport`] on a transport-level failure. A
    /// rejected reservation is NOT an error: it comes back as a receipt with
    /// `success: false`.
    fn submit(
        &self,
        booking: &Booking,
    ) -> Pin<Box<dyn Future<Output = Result<SubmissionReceipt, SubmitError>> + Send + '_>>;
}

/// In-memory catalogue with artificial latency
pub struct InMemoryCatalog {
    experiences: Vec<Experience>,
    latency: Duration,
}

impl InMemoryCatalog {
    /// Creates a catalogue over the given experiences
    #[must_use]
    pub const fn new(experiences: Vec<Experience>, latency: Duration) -> Self {
        Self {
            experiences,
            latency,
        }
    }

    /// Creates the demo catalogue of four experiences
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self::new(sample_experiences(), Duration::from_millis(500))
    }
}

impl CatalogService for InMemoryCatalog {
    fn fetch_catalogue(&self) -> Pin<Box<dyn Future<Output = Vec<Experience>> + Send + '_>> {
        Box::pin(async {
            tokio::time::sleep(self.latency).await;
            self.experiences.clone()
        })
    }

    fn fetch_experience(
        &self,
        id: ExperienceId,
    ) -> Pin<Box<dyn Future<Output = Option<Experience>> + Send + '_>> {
        Box::pin(async move {
            tokio::time::sleep(self.latency).await;
            self.experiences.iter().find(|e| e.id == id).cloned()
        })
    }
}

/// Simulated availability: seven days of three slots each
///
/// Dates start at "today" according to the injected clock; availability of
/// each slot is drawn per request from the configured odds, so refreshing
/// the detail screen reshuffles what can be booked.
pub struct SimulatedAvailability {
    clock: Arc<dyn Clock>,
    latency: Duration,
    /// Probability that each of the day's slots is available, in slot order
    availability_odds: [f64; 3],
}

/// Display times offered on every date
const SLOT_TIMES: [&str; 3] = ["10:00 AM", "01:00 PM", "04:00 PM"];

impl SimulatedAvailability {
    /// Creates a simulated availability service
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, latency: Duration, availability_odds: [f64; 3]) -> Self {
        Self {
            clock,
            latency,
            availability_odds,
        }
    }

    /// Demo configuration: morning slots usually free, lunchtime a coin flip
    #[must_use]
    pub fn with_sample_odds(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Duration::from_millis(500), [0.8, 0.5, 0.7])
    }

    /// Fully available grid for deterministic tests
    #[must_use]
    pub fn always_available(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Duration::ZERO, [1.0, 1.0, 1.0])
    }
}

impl AvailabilityService for SimulatedAvailability {
    fn fetch_slots(
        &self,
        _id: ExperienceId,
    ) -> Pin<Box<dyn Future<Output = Vec<DateSlots>> + Send + '_>> {
        Box::pin(async move {
            tokio::time::sleep(self.latency).await;

            let today = self.clock.now().date_naive();
            let mut rng = rand::thread_rng();

            (0..7)
                .filter_map(|offset| today.checked_add_days(Days::new(offset)))
                .map(|date| DateSlots {
                    date: date.format("%Y-%m-%d").to_string(),
                    slots: SLOT_TIMES
                        .iter()
                        .zip(self.availability_odds)
                        .map(|(time, odds)| TimeSlot {
                            time: (*time).to_string(),
                            available: rng.gen_bool(odds.clamp(0.0, 1.0)),
                        })
                        .collect(),
                })
                .collect()
        })
    }
}

/// Promo validation against an in-memory code table
pub struct SimulatedPromoService {
    codes: HashMap<String, PromoDiscount>,
    latency: Duration,
}

impl SimulatedPromoService {
    /// Creates a promo service over the given code table
    ///
    /// Keys are matched against the uppercased input code.
    #[must_use]
    pub const fn new(codes: HashMap<String, PromoDiscount>, latency: Duration) -> Self {
        Self { codes, latency }
    }

    /// The demo code table: `SAVE10` (10% off) and `FLAT50` ($50 off)
    #[must_use]
    pub fn with_standard_codes() -> Self {
        let mut codes = HashMap::new();
        codes.insert(
            "SAVE10".to_string(),
            PromoDiscount {
                value: 0.10,
                kind: DiscountKind::Percent,
            },
        );
        codes.insert(
            "FLAT50".to_string(),
            PromoDiscount {
                value: 50.0,
                kind: DiscountKind::Flat,
            },
        );
        Self::new(codes, Duration::from_millis(300))
    }

    /// Zero-latency variant of [`Self::with_standard_codes`] for tests
    #[must_use]
    pub fn instant() -> Self {
        let mut service = Self::with_standard_codes();
        service.latency = Duration::ZERO;
        service
    }
}

impl PromoService for SimulatedPromoService {
    fn validate_code(
        &self,
        code: &str,
    ) -> Pin<Box<dyn Future<Output = Result<PromoDiscount, PromoError>> + Send + '_>> {
        let key = code.to_uppercase();
        Box::pin(async move {
            tokio::time::sleep(self.latency).await;
            self.codes.get(&key).copied().ok_or(PromoError::InvalidCode)
        })
    }
}

/// Simulated submission gateway with configurable failure rates
pub struct SimulatedBookingGateway {
    /// Probability of a `success: false` business answer
    decline_rate: f64,
    /// Probability of a transport-level failure
    transport_failure_rate: f64,
    latency: Duration,
}

impl SimulatedBookingGateway {
    /// Creates a gateway with the given rates
    #[must_use]
    pub const fn new(decline_rate: f64, transport_failure_rate: f64, latency: Duration) -> Self {
        Self {
            decline_rate,
            transport_failure_rate,
            latency,
        }
    }

    /// Demo configuration: roughly one in ten submissions is declined
    #[must_use]
    pub const fn with_sample_rates() -> Self {
        Self::new(0.1, 0.0, Duration::from_millis(1000))
    }

    /// Always-accepting zero-latency gateway for deterministic tests
    #[must_use]
    pub const fn reliable() -> Self {
        Self::new(0.0, 0.0, Duration::ZERO)
    }

    /// Always-declining gateway (business failure path)
    #[must_use]
    pub const fn always_declining() -> Self {
        Self::new(1.0, 0.0, Duration::ZERO)
    }

    /// Gateway that always fails at the transport level
    #[must_use]
    pub const fn always_unreachable() -> Self {
        Self::new(0.0, 1.0, Duration::ZERO)
    }
}

impl BookingGateway for SimulatedBookingGateway {
    fn submit(
        &self,
        booking: &Booking,
    ) -> Pin<Box<dyn Future<Output = Result<SubmissionReceipt, SubmitError>> + Send + '_>> {
        tracing::debug!(
            experience = booking.experience.as_ref().map(|e| e.id.get()),
            date = booking.date.as_deref(),
            time = booking.time.as_deref(),
            total = booking.pricing.total,
            "Submitting booking"
        );

        Box::pin(async move {
            tokio::time::sleep(self.latency).await;

            let mut rng = rand::thread_rng();
            if rng.gen_bool(self.transport_failure_rate.clamp(0.0, 1.0)) {
                return Err(SubmitError::Transport("connection reset".to_string()));
            }

            if rng.gen_bool(self.decline_rate.clamp(0.0, 1.0)) {
                return Ok(SubmissionReceipt {
                    success: false,
                    booking_id: String::new(),
                });
            }

            Ok(SubmissionReceipt {
                success: true,
                booking_id: format!("BK-{}", uuid::Uuid::new_v4()),
            })
        })
    }
}

/// The four demo experiences
#[must_use]
pub fn sample_experiences() -> Vec<Experience> {
    vec![
        Experience {
            id: ExperienceId::new(1),
            title: "Kyoto's Sagano Bamboo Forest".to_string(),
            location: "Kyoto, Japan".to_string(),
            description: "Immerse yourself in the ethereal beauty of the Sagano Bamboo Forest. \
                This guided tour will take you through the towering bamboo groves, revealing \
                hidden shrines and tranquil gardens."
                .to_string(),
            price: 120.0,
            rating: 4.9,
            reviews: 245,
            superhost: true,
            images: vec![
                "https://picsum.photos/seed/kyoto1/800/600".to_string(),
                "https://picsum.photos/seed/kyoto2/800/600".to_string(),
                "https://picsum.photos/seed/kyoto3/800/600".to_string(),
            ],
        },
        Experience {
            id: ExperienceId::new(2),
            title: "Northern Lights Adventure in Iceland".to_string(),
            location: "Reykjavik, Iceland".to_string(),
            description: "Chase the mesmerizing Aurora Borealis on this unforgettable night \
                tour. Expert guides take you to the best viewing spots away from city lights, \
                with warm drinks along the way."
                .to_string(),
            price: 250.0,
            rating: 4.8,
            reviews: 412,
            superhost: false,
            images: vec![
                "https://picsum.photos/seed/iceland1/800/600".to_string(),
                "https://picsum.photos/seed/iceland2/800/600".to_string(),
                "https://picsum.photos/seed/iceland3/800/600".to_string(),
            ],
        },
        Experience {
            id: ExperienceId::new(3),
            title: "Historic Rome Walking Tour".to_string(),
            location: "Rome, Italy".to_string(),
            description: "Step back in time as you explore the ancient wonders of Rome. This \
                tour covers the Colosseum, Roman Forum, and Palatine Hill with a knowledgeable \
                historian."
                .to_string(),
            price: 95.0,
            rating: 4.9,
            reviews: 789,
            superhost: true,
            images: vec![
                "https://picsum.photos/seed/rome1/800/600".to_string(),
                "https://picsum.photos/seed/rome2/800/600".to_string(),
                "https://picsum.photos/seed/rome3/800/600".to_string(),
            ],
        },
        Experience {
            id: ExperienceId::new(4),
            title: "Parisian Cooking Class: Macarons".to_string(),
            location: "Paris, France".to_string(),
            description: "Learn the secrets of making perfect French macarons from a Parisian \
                pastry chef. In this hands-on class you create the delicate treats from scratch \
                and take your results home."
                .to_string(),
            price: 150.0,
            rating: 4.7,
            reviews: 180,
            superhost: true,
            images: vec![
                "https://picsum.photos/seed/paris1/800/600".to_string(),
                "https://picsum.photos/seed/paris2/800/600".to_string(),
                "https://picsum.photos/seed/paris3/800/600".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookflow_testing::test_clock;

    fn instant_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(sample_experiences(), Duration::ZERO)
    }

    #[tokio::test]
    async fn catalogue_lists_all_sample_experiences() {
        let catalog = instant_catalog();
        let experiences = catalog.fetch_catalogue().await;

        assert_eq!(experiences.len(), 4);
        assert_eq!(experiences[0].title, "Kyoto's Sagano Bamboo Forest");
    }

    #[tokio::test]
    async fn fetch_experience_by_id() {
        let catalog = instant_catalog();

        let found = catalog.fetch_experience(ExperienceId::new(3)).await;
        assert_eq!(found.map(|e| e.location), Some("Rome, Italy".to_string()));

        let missing = catalog.fetch_experience(ExperienceId::new(99)).await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn slots_cover_a_week_from_today() {
        let clock = Arc::new(test_clock());
        let availability = SimulatedAvailability::always_available(clock);

        let slots = availability.fetch_slots(ExperienceId::new(1)).await;

        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].date, "2026-01-01");
        assert_eq!(slots[6].date, "2026-01-07");
        for day in &slots {
            assert_eq!(day.slots.len(), 3);
            assert!(day.slots.iter().all(|s| s.available));
        }
    }

    #[tokio::test]
    async fn promo_lookup_is_case_insensitive() {
        let promo = SimulatedPromoService::instant();

        let discount = promo.validate_code("save10").await;
        assert_eq!(
            discount,
            Ok(PromoDiscount {
                value: 0.10,
                kind: DiscountKind::Percent,
            })
        );
    }

    #[tokio::test]
    async fn unknown_promo_code_is_rejected() {
        let promo = SimulatedPromoService::instant();

        let result = promo.validate_code("NOTACODE").await;
        assert_eq!(result, Err(PromoError::InvalidCode));
    }

    #[tokio::test]
    async fn reliable_gateway_confirms_with_an_id() {
        let gateway = SimulatedBookingGateway::reliable();

        let receipt = gateway.submit(&Booking::default()).await.unwrap();
        assert!(receipt.success);
        assert!(receipt.booking_id.starts_with("BK-"));
    }

    #[tokio::test]
    async fn declining_gateway_answers_without_error() {
        let gateway = SimulatedBookingGateway::always_declining();

        let receipt = gateway.submit(&Booking::default()).await;
        assert_eq!(
            receipt,
            Ok(SubmissionReceipt {
                success: false,
                booking_id: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn unreachable_gateway_fails_at_transport_level() {
        let gateway = SimulatedBookingGateway::always_unreachable();

        let result = gateway.submit(&Booking::default()).await;
        assert!(matches!(result, Err(SubmitError::Transport(_))));
    }
}
