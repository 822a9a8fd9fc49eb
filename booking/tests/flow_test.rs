//! End-to-end booking flow tests against the runtime store.
//!
//! These run the real reducer inside a `Store` with zero-latency simulated
//! collaborators whose outcomes are pinned, so every async resolution is
//! deterministic.

use bookflow::services::{SimulatedBookingGateway, SimulatedPromoService};
use bookflow::{
    Booking, BookingAction, BookingEnvironment, BookingOutcome, BookingReducer, BookingStore,
    Experience, ExperienceId, FlowState, Page, UNEXPECTED_ERROR,
};
use bookflow_runtime::Store;
use bookflow_testing::test_clock;
use std::sync::Arc;

fn tour_priced_100() -> Experience {
    Experience {
        id: ExperienceId::new(7),
        title: "Canal Kayak Tour".to_string(),
        location: "Amsterdam, Netherlands".to_string(),
        description: "Paddle the quiet canals at sunrise.".to_string(),
        price: 100.0,
        rating: 4.6,
        reviews: 98,
        superhost: false,
        images: vec![],
    }
}

fn store_with_gateway(gateway: SimulatedBookingGateway) -> BookingStore {
    Store::new(
        FlowState::new(),
        BookingReducer::new(),
        BookingEnvironment::new(
            Arc::new(SimulatedPromoService::instant()),
            Arc::new(gateway),
            Arc::new(test_clock()),
        ),
    )
}

/// Send an action and wait for its effects (and their feedback) to land
async fn send_and_settle(store: &BookingStore, action: BookingAction) {
    let mut handle = store.send(action).await.unwrap();
    handle.wait().await;
}

/// Drive the flow up to a submittable booking
async fn reach_checkout(store: &BookingStore) {
    send_and_settle(
        store,
        BookingAction::SelectExperience {
            experience: tour_priced_100(),
        },
    )
    .await;
    send_and_settle(
        store,
        BookingAction::SelectSlot {
            date: "2026-01-03".to_string(),
            time: "10:00 AM".to_string(),
        },
    )
    .await;
    send_and_settle(
        store,
        BookingAction::NavigateTo {
            page: Page::Checkout,
        },
    )
    .await;
}

#[tokio::test]
async fn pricing_flows_through_promo_codes() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());

    // Select a $100 experience at the 8% tax rate.
    send_and_settle(
        &store,
        BookingAction::SelectExperience {
            experience: tour_priced_100(),
        },
    )
    .await;

    let pricing = store.state(|s| s.booking.pricing).await;
    assert_eq!(pricing.base_price, 100.0);
    assert_eq!(pricing.taxes, 100.0 * 0.08);
    assert_eq!(pricing.discount, 0.0);
    assert_eq!(pricing.total, 100.0 + 100.0 * 0.08);

    // A flat $50 code brings the total to $58.
    send_and_settle(
        &store,
        BookingAction::ApplyPromoCode {
            code: "FLAT50".to_string(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.booking.promo_code, "FLAT50");
    assert_eq!(state.booking.pricing.discount, 50.0);
    assert_eq!(state.booking.pricing.total, 100.0 + 100.0 * 0.08 - 50.0);
    assert!(state.last_error.is_none());

    // An invalid code afterwards changes nothing but the error message.
    send_and_settle(
        &store,
        BookingAction::ApplyPromoCode {
            code: "BOGUS".to_string(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.booking.pricing.discount, 50.0);
    assert_eq!(state.booking.pricing.total, 100.0 + 100.0 * 0.08 - 50.0);
    assert_eq!(state.last_error.as_deref(), Some("Invalid promo code"));
    assert!(!state.is_busy());
}

#[tokio::test]
async fn percent_code_discounts_against_base_price() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());

    send_and_settle(
        &store,
        BookingAction::SelectExperience {
            experience: tour_priced_100(),
        },
    )
    .await;
    send_and_settle(
        &store,
        BookingAction::ApplyPromoCode {
            code: "SAVE10".to_string(),
        },
    )
    .await;

    let pricing = store.state(|s| s.booking.pricing).await;
    assert_eq!(pricing.discount, 100.0 * 0.10);
    assert_eq!(pricing.total, 100.0 + 100.0 * 0.08 - 100.0 * 0.10);
}

#[tokio::test]
async fn selecting_a_new_experience_clears_the_discount() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());

    send_and_settle(
        &store,
        BookingAction::SelectExperience {
            experience: tour_priced_100(),
        },
    )
    .await;
    send_and_settle(
        &store,
        BookingAction::ApplyPromoCode {
            code: "FLAT50".to_string(),
        },
    )
    .await;

    let mut other = tour_priced_100();
    other.id = ExperienceId::new(8);
    other.price = 250.0;
    send_and_settle(&store, BookingAction::SelectExperience { experience: other }).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.booking.promo_code, "");
    assert_eq!(state.booking.pricing.discount, 0.0);
    assert_eq!(state.booking.pricing.base_price, 250.0);
    assert_eq!(state.page, Page::Details {
        experience_id: ExperienceId::new(8)
    });
}

#[tokio::test]
async fn accepted_submission_lands_on_the_success_screen() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());
    reach_checkout(&store).await;

    send_and_settle(&store, BookingAction::SubmitBooking).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.page, Page::Result {
        outcome: BookingOutcome::Success
    });
    assert!(state.confirmation.as_deref().is_some_and(|id| id.starts_with("BK-")));
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn declined_submission_fails_silently() {
    let store = store_with_gateway(SimulatedBookingGateway::always_declining());
    reach_checkout(&store).await;

    send_and_settle(&store, BookingAction::SubmitBooking).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.page, Page::Result {
        outcome: BookingOutcome::Failure
    });
    // Business failure: the failure screen is the whole answer.
    assert!(state.last_error.is_none());
    assert!(state.confirmation.is_none());
}

#[tokio::test]
async fn transport_failure_surfaces_a_generic_message() {
    let store = store_with_gateway(SimulatedBookingGateway::always_unreachable());
    reach_checkout(&store).await;

    send_and_settle(&store, BookingAction::SubmitBooking).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.page, Page::Result {
        outcome: BookingOutcome::Failure
    });
    assert_eq!(state.last_error.as_deref(), Some(UNEXPECTED_ERROR));
}

#[tokio::test]
async fn back_to_home_resets_the_flow() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());
    reach_checkout(&store).await;
    send_and_settle(&store, BookingAction::SubmitBooking).await;

    send_and_settle(&store, BookingAction::ResetBooking).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.page, Page::Home);
    assert_eq!(state.booking, Booking::default());
    assert!(state.confirmation.is_none());
    assert!(state.last_error.is_none());

    // Resetting again is a no-op.
    send_and_settle(&store, BookingAction::ResetBooking).await;
    let again = store.state(Clone::clone).await;
    assert_eq!(again, state);
}

#[tokio::test]
async fn checkout_is_unreachable_without_a_slot() {
    let store = store_with_gateway(SimulatedBookingGateway::reliable());

    send_and_settle(
        &store,
        BookingAction::SelectExperience {
            experience: tour_priced_100(),
        },
    )
    .await;
    send_and_settle(
        &store,
        BookingAction::NavigateTo {
            page: Page::Checkout,
        },
    )
    .await;

    let page = store.state(|s| s.page).await;
    assert_ne!(page, Page::Checkout);
}
