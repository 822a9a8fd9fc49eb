//! Reducer logic for the booking flow.
//!
//! Every mutation of the flow state goes through here: experience selection,
//! slot choice, contact details, promo validation, submission, and
//! navigation. Collaborator calls are returned as `Effect::Future` values
//! that resolve to token-carrying resolution actions; the reducer discards
//! resolutions whose token is no longer current.

use crate::actions::BookingAction;
use crate::pricing::{DEFAULT_TAX_RATE, absolute_discount, compute_pricing};
use crate::services::{BookingGateway, PromoService};
use crate::state::FlowState;
use crate::types::{Booking, BookingOutcome, Page};
use bookflow_core::{effect::Effect, environment::Clock, reducer::Reducer};
use std::sync::Arc;

/// Message surfaced when submission fails at the transport level
///
/// A declined submission (business failure) deliberately surfaces nothing;
/// only the unexpected-error path sets this.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Promo code validation collaborator
    pub promo: Arc<dyn PromoService>,
    /// Booking submission collaborator
    pub bookings: Arc<dyn BookingGateway>,
    /// Clock for time-derived data
    pub clock: Arc<dyn Clock>,
    /// Tax rate applied by the pricing engine
    pub tax_rate: f64,
}

impl BookingEnvironment {
    /// Creates an environment with the default tax rate
    #[must_use]
    pub fn new(
        promo: Arc<dyn PromoService>,
        bookings: Arc<dyn BookingGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            promo,
            bookings,
            clock,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    /// Overrides the tax rate
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

/// Reducer for the booking flow
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether a direct navigation request may be honored
    ///
    /// Forward transitions come from the other commands; this only admits
    /// backward navigation to pages whose prerequisite state exists. Result
    /// pages are never reachable this way.
    fn navigation_allowed(state: &FlowState, page: Page) -> bool {
        match page {
            Page::Home => true,
            Page::Details { experience_id } => state
                .booking
                .experience
                .as_ref()
                .is_some_and(|e| e.id == experience_id),
            Page::Checkout => state.booking.submittable(),
            Page::Result { .. } => false,
        }
    }
}

impl Reducer for BookingReducer {
    type State = FlowState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per operation of the flow
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            // ========== Commands ==========
            BookingAction::SelectExperience { experience } => {
                // Full reset anchored on the new experience. Any in-flight
                // resolution becomes stale and will be discarded on arrival.
                state.abandon_request();
                state.last_error = None;
                state.confirmation = None;

                let experience_id = experience.id;
                let pricing = compute_pricing(Some(&experience), 0.0, env.tax_rate);
                state.booking = Booking {
                    experience: Some(experience),
                    pricing,
                    ..Booking::default()
                };
                state.page = Page::Details { experience_id };

                vec![Effect::None]
            },

            BookingAction::SelectSlot { date, time } => {
                // The detail screen only offers slots for a selected
                // experience; without one there is nothing to attach to.
                if state.booking.experience.is_none() {
                    return vec![Effect::None];
                }

                state.booking.date = Some(date);
                state.booking.time = Some(time);

                vec![Effect::None]
            },

            BookingAction::UpdateUserDetails { patch } => {
                state.booking.user_details.merge(patch);
                vec![Effect::None]
            },

            BookingAction::ApplyPromoCode { code } => {
                if state.is_busy() || state.booking.experience.is_none() {
                    return vec![Effect::None];
                }

                state.last_error = None;
                let token = state.begin_request();
                let promo = Arc::clone(&env.promo);

                vec![Effect::Future(Box::pin(async move {
                    match promo.validate_code(&code).await {
                        Ok(discount) => Some(BookingAction::PromoAccepted {
                            token,
                            code,
                            discount,
                        }),
                        Err(error) => Some(BookingAction::PromoRejected {
                            token,
                            message: error.to_string(),
                        }),
                    }
                }))]
            },

            BookingAction::SubmitBooking => {
                if state.is_busy() || !state.booking.submittable() {
                    return vec![Effect::None];
                }

                state.last_error = None;
                let token = state.begin_request();
                let gateway = Arc::clone(&env.bookings);
                let snapshot = state.booking.clone();

                vec![Effect::Future(Box::pin(async move {
                    match gateway.submit(&snapshot).await {
                        Ok(receipt) if receipt.success => Some(BookingAction::SubmissionAccepted {
                            token,
                            booking_id: receipt.booking_id,
                        }),
                        Ok(_) => Some(BookingAction::SubmissionDeclined { token }),
                        Err(error) => {
                            tracing::warn!(error = %error, "Booking submission failed");
                            Some(BookingAction::SubmissionErrored {
                                token,
                                message: UNEXPECTED_ERROR.to_string(),
                            })
                        },
                    }
                }))]
            },

            BookingAction::ResetBooking => {
                state.abandon_request();
                state.booking = Booking::default();
                state.page = Page::Home;
                state.last_error = None;
                state.confirmation = None;

                vec![Effect::None]
            },

            BookingAction::NavigateTo { page } => {
                if Self::navigation_allowed(state, page) {
                    state.page = page;
                }
                vec![Effect::None]
            },

            // ========== Resolutions ==========
            BookingAction::PromoAccepted {
                token,
                code,
                discount,
            } => {
                if !state.finish_request(token) {
                    return vec![Effect::None];
                }

                // Convert to an absolute amount against the base price of
                // this moment; the breakdown only ever stores absolutes.
                let base_price = state
                    .booking
                    .experience
                    .as_ref()
                    .map_or(0.0, |e| e.price);
                let amount = absolute_discount(discount, base_price);

                state.booking.promo_code = code;
                state.booking.pricing =
                    compute_pricing(state.booking.experience.as_ref(), amount, env.tax_rate);
                state.last_error = None;

                vec![Effect::None]
            },

            BookingAction::PromoRejected { token, message } => {
                if !state.finish_request(token) {
                    return vec![Effect::None];
                }

                // The booking, including any previously applied discount,
                // stays exactly as it was.
                state.last_error = Some(message);

                vec![Effect::None]
            },

            BookingAction::SubmissionAccepted { token, booking_id } => {
                if !state.finish_request(token) {
                    return vec![Effect::None];
                }

                state.confirmation = Some(booking_id);
                state.page = Page::Result {
                    outcome: BookingOutcome::Success,
                };

                vec![Effect::None]
            },

            BookingAction::SubmissionDeclined { token } => {
                if !state.finish_request(token) {
                    return vec![Effect::None];
                }

                // Business failure: the failure screen says it all, no
                // error message is surfaced.
                state.page = Page::Result {
                    outcome: BookingOutcome::Failure,
                };

                vec![Effect::None]
            },

            BookingAction::SubmissionErrored { token, message } => {
                if !state.finish_request(token) {
                    return vec![Effect::None];
                }

                state.last_error = Some(message);
                state.page = Page::Result {
                    outcome: BookingOutcome::Failure,
                };

                vec![Effect::None]
            },
        }
    }
}
