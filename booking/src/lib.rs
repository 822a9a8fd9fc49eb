//! Booking flow for experiential travel products.
//!
//! The flow walks a customer from a catalogue listing through an item's
//! slot picker and checkout form to a terminal result screen. It is built
//! on the Bookflow architecture: a single owned [`FlowState`] mutated only
//! by [`BookingReducer`] inside a runtime store, with collaborator calls
//! (promo validation, submission) returned as effects and their resolutions
//! guarded by request tokens.
//!
//! # Quick Start
//!
//! ```no_run
//! use bookflow::{
//!     BookingAction, BookingEnvironment, BookingReducer, FlowState,
//!     services::{SimulatedBookingGateway, SimulatedPromoService, sample_experiences},
//! };
//! use bookflow_core::environment::SystemClock;
//! use bookflow_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = BookingEnvironment::new(
//!     Arc::new(SimulatedPromoService::with_standard_codes()),
//!     Arc::new(SimulatedBookingGateway::with_sample_rates()),
//!     Arc::new(SystemClock),
//! );
//! let store = Store::new(FlowState::new(), BookingReducer::new(), env);
//!
//! // Select an experience; the flow moves to its detail page.
//! let experience = sample_experiences().remove(0);
//! store.send(BookingAction::SelectExperience { experience }).await?;
//!
//! let total = store.state(|s| s.booking.pricing.total).await;
//! println!("Total: ${total:.2}");
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod pricing;
pub mod reducer;
pub mod screens;
pub mod services;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use actions::BookingAction;
pub use reducer::{BookingEnvironment, BookingReducer, UNEXPECTED_ERROR};
pub use screens::{BookingStore, Screen, screen_for};
pub use state::FlowState;
pub use types::{
    Booking, BookingOutcome, DateSlots, Experience, ExperienceId, Page, PricingBreakdown,
    TimeSlot, UserDetails, UserDetailsPatch,
};
