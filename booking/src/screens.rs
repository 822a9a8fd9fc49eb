//! Screen controllers: the glue between the store and a rendering surface.
//!
//! Each controller reads flow state, fetches what its screen needs from the
//! collaborators, and dispatches store actions in response to user input.
//! All state mutation and navigation goes through the store; the controllers
//! themselves hold no booking data beyond transient fetch results.

use crate::actions::BookingAction;
use crate::reducer::{BookingEnvironment, BookingReducer};
use crate::services::{AvailabilityService, CatalogService};
use crate::state::FlowState;
use crate::types::{
    BookingOutcome, DateSlots, Experience, ExperienceId, Page, UserDetailsPatch,
};
use crate::validation::{FormErrors, validate_details};
use bookflow_runtime::{Store, StoreError};
use std::sync::Arc;

/// The store type driving the booking flow
pub type BookingStore = Store<FlowState, BookingAction, BookingEnvironment, BookingReducer>;

/// Which screen renders the current page
///
/// The mapping is total: every page has exactly one screen, checked
/// exhaustively at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Catalogue listing
    Home,
    /// Item detail and slot picker
    Details {
        /// The experience being viewed
        experience_id: ExperienceId,
    },
    /// Contact form, promo input, confirmation
    Checkout,
    /// Terminal success/failure screen
    Result {
        /// How the submission ended
        outcome: BookingOutcome,
    },
}

/// Maps a page to the screen that renders it
#[must_use]
pub const fn screen_for(page: Page) -> Screen {
    match page {
        Page::Home => Screen::Home,
        Page::Details { experience_id } => Screen::Details { experience_id },
        Page::Checkout => Screen::Checkout,
        Page::Result { outcome } => Screen::Result { outcome },
    }
}

/// Catalogue listing screen
pub struct HomeScreen {
    store: Arc<BookingStore>,
    catalog: Arc<dyn CatalogService>,
}

impl HomeScreen {
    /// Creates the home screen controller
    #[must_use]
    pub fn new(store: Arc<BookingStore>, catalog: Arc<dyn CatalogService>) -> Self {
        Self { store, catalog }
    }

    /// Loads the catalogue for rendering
    pub async fn load(&self) -> Vec<Experience> {
        self.catalog.fetch_catalogue().await
    }

    /// Selects an experience and moves to its detail screen
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn choose(&self, experience: Experience) -> Result<(), StoreError> {
        self.store
            .send(BookingAction::SelectExperience { experience })
            .await
            .map(|_| ())
    }
}

/// Item detail and slot picker screen
pub struct DetailsScreen {
    store: Arc<BookingStore>,
    catalog: Arc<dyn CatalogService>,
    availability: Arc<dyn AvailabilityService>,
}

impl DetailsScreen {
    /// Creates the details screen controller
    #[must_use]
    pub fn new(
        store: Arc<BookingStore>,
        catalog: Arc<dyn CatalogService>,
        availability: Arc<dyn AvailabilityService>,
    ) -> Self {
        Self {
            store,
            catalog,
            availability,
        }
    }

    /// Loads the experience and its slot grid
    ///
    /// Supports deep entry by id: the experience is fetched rather than
    /// assumed from prior catalogue state. Returns `None` for an unknown id.
    pub async fn load(&self, id: ExperienceId) -> Option<(Experience, Vec<DateSlots>)> {
        let experience = self.catalog.fetch_experience(id).await?;
        let slots = self.availability.fetch_slots(id).await;
        Some((experience, slots))
    }

    /// Picks a slot if it is offered and available
    ///
    /// Availability is checked here, against the fetched grid, before the
    /// store is involved; the store itself does not re-validate it. Returns
    /// whether the slot was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn pick_slot(
        &self,
        days: &[DateSlots],
        date: &str,
        time: &str,
    ) -> Result<bool, StoreError> {
        let available = days
            .iter()
            .find(|day| day.date == date)
            .and_then(|day| day.slots.iter().find(|slot| slot.time == time))
            .is_some_and(|slot| slot.available);

        if !available {
            return Ok(false);
        }

        self.store
            .send(BookingAction::SelectSlot {
                date: date.to_string(),
                time: time.to_string(),
            })
            .await?;
        Ok(true)
    }

    /// Moves forward to checkout (honored only once a slot is chosen)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn proceed_to_checkout(&self) -> Result<(), StoreError> {
        self.store
            .send(BookingAction::NavigateTo {
                page: Page::Checkout,
            })
            .await
            .map(|_| ())
    }

    /// Back to the catalogue without discarding the booking
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn back_to_catalogue(&self) -> Result<(), StoreError> {
        self.store
            .send(BookingAction::NavigateTo { page: Page::Home })
            .await
            .map(|_| ())
    }
}

/// Checkout form screen
pub struct CheckoutScreen {
    store: Arc<BookingStore>,
}

impl CheckoutScreen {
    /// Creates the checkout screen controller
    #[must_use]
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }

    /// Whether promo and submit controls should be disabled
    pub async fn is_busy(&self) -> bool {
        self.store.state(FlowState::is_busy).await
    }

    /// Pushes edited form fields into the booking
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn edit_details(&self, patch: UserDetailsPatch) -> Result<(), StoreError> {
        self.store
            .send(BookingAction::UpdateUserDetails { patch })
            .await
            .map(|_| ())
    }

    /// Applies a promo code; blank input is ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn apply_promo(&self, code: &str) -> Result<(), StoreError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(());
        }

        self.store
            .send(BookingAction::ApplyPromoCode {
                code: code.to_string(),
            })
            .await
            .map(|_| ())
    }

    /// Validates the form and submits the booking if it passes
    ///
    /// Returns the validation result either way; the caller renders any
    /// field errors inline. Validation failures never reach the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn confirm(&self) -> Result<FormErrors, StoreError> {
        let details = self.store.state(|s| s.booking.user_details.clone()).await;
        let errors = validate_details(&details);

        if errors.is_valid() {
            self.store.send(BookingAction::SubmitBooking).await?;
        }

        Ok(errors)
    }
}

/// Terminal result screen
pub struct ResultScreen {
    store: Arc<BookingStore>,
}

/// What the result screen renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    /// The submission outcome (None if the page is not a result page)
    pub outcome: Option<BookingOutcome>,
    /// Confirmation id, present on success
    pub confirmation: Option<String>,
    /// Surfaced error message, present on the transport-failure path only
    pub error: Option<String>,
}

impl ResultScreen {
    /// Creates the result screen controller
    #[must_use]
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }

    /// Reads what this screen shows
    pub async fn view(&self) -> ResultView {
        self.store
            .state(|s| ResultView {
                outcome: match s.page {
                    Page::Result { outcome } => Some(outcome),
                    _ => None,
                },
                confirmation: s.confirmation.clone(),
                error: s.last_error.clone(),
            })
            .await
    }

    /// "Back to home": discards the finished booking
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store refuses the action (shutdown).
    pub async fn back_to_home(&self) -> Result<(), StoreError> {
        self.store
            .send(BookingAction::ResetBooking)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeSlot;

    #[test]
    fn every_page_maps_to_its_screen() {
        assert_eq!(screen_for(Page::Home), Screen::Home);
        assert_eq!(
            screen_for(Page::Details {
                experience_id: ExperienceId::new(2)
            }),
            Screen::Details {
                experience_id: ExperienceId::new(2)
            }
        );
        assert_eq!(screen_for(Page::Checkout), Screen::Checkout);
        assert_eq!(
            screen_for(Page::Result {
                outcome: BookingOutcome::Failure
            }),
            Screen::Result {
                outcome: BookingOutcome::Failure
            }
        );
    }

    #[tokio::test]
    async fn unavailable_slots_are_refused_locally() {
        let store = Arc::new(crate::test_support::instant_store());
        let screen = DetailsScreen::new(
            Arc::clone(&store),
            Arc::new(crate::services::InMemoryCatalog::new(
                crate::services::sample_experiences(),
                std::time::Duration::ZERO,
            )),
            Arc::new(crate::services::SimulatedAvailability::always_available(
                Arc::new(bookflow_core::environment::SystemClock),
            )),
        );

        let days = vec![DateSlots {
            date: "2026-01-03".to_string(),
            slots: vec![
                TimeSlot {
                    time: "10:00 AM".to_string(),
                    available: false,
                },
                TimeSlot {
                    time: "01:00 PM".to_string(),
                    available: true,
                },
            ],
        }];

        let refused = screen.pick_slot(&days, "2026-01-03", "10:00 AM").await;
        assert!(matches!(refused, Ok(false)));

        let missing = screen.pick_slot(&days, "2026-01-04", "01:00 PM").await;
        assert!(matches!(missing, Ok(false)));
    }
}
