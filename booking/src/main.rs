//! Scripted CLI demo for the booking flow.
//!
//! Walks the whole journey against the simulated collaborators: browse the
//! catalogue, open an experience, pick an available slot, fill in contact
//! details, apply a promo code (and a bogus one), submit, and return home.

use bookflow::screens::{CheckoutScreen, DetailsScreen, HomeScreen, ResultScreen};
use bookflow::services::{
    InMemoryCatalog, SimulatedAvailability, SimulatedBookingGateway, SimulatedPromoService,
};
use bookflow::{
    BookingEnvironment, BookingOutcome, BookingReducer, FlowState, UserDetailsPatch,
};
use bookflow_core::environment::SystemClock;
use bookflow_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

/// Poll until no collaborator call is in flight, like a UI spinner would
async fn wait_until_idle(store: &bookflow::BookingStore) {
    while store.state(FlowState::is_busy).await {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Bookflow Demo ===\n");

    let clock = Arc::new(SystemClock);
    let catalog = Arc::new(InMemoryCatalog::with_sample_data());
    let availability = Arc::new(SimulatedAvailability::with_sample_odds(clock.clone()));

    let env = BookingEnvironment::new(
        Arc::new(SimulatedPromoService::with_standard_codes()),
        Arc::new(SimulatedBookingGateway::with_sample_rates()),
        clock,
    );
    let store = Arc::new(Store::new(FlowState::new(), BookingReducer::new(), env));

    let home = HomeScreen::new(Arc::clone(&store), catalog.clone());
    let details = DetailsScreen::new(Arc::clone(&store), catalog, availability);
    let checkout = CheckoutScreen::new(Arc::clone(&store));
    let result = ResultScreen::new(Arc::clone(&store));

    // Browse the catalogue
    println!("Loading catalogue...");
    let experiences = home.load().await;
    for experience in &experiences {
        println!(
            "  [{}] {} — {} (${:.2}, {:.1}★ / {} reviews)",
            experience.id,
            experience.title,
            experience.location,
            experience.price,
            experience.rating,
            experience.reviews,
        );
    }

    // Open the first experience
    let chosen = experiences
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("catalogue is empty"))?;
    println!("\nOpening '{}'...", chosen.title);
    let chosen_id = chosen.id;
    home.choose(chosen).await?;

    // Pick the first available slot
    let (experience, days) = details
        .load(chosen_id)
        .await
        .ok_or_else(|| anyhow::anyhow!("experience {chosen_id} not found"))?;
    let slot = days.iter().find_map(|day| {
        day.slots
            .iter()
            .find(|slot| slot.available)
            .map(|slot| (day.date.clone(), slot.time.clone()))
    });
    let Some((date, time)) = slot else {
        println!("No available slots this week, try again later.");
        return Ok(());
    };
    println!("Booking '{}' on {} at {}", experience.title, date, time);
    details.pick_slot(&days, &date, &time).await?;
    details.proceed_to_checkout().await?;

    // Fill in contact details
    checkout
        .edit_details(UserDetailsPatch {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("555-0100".to_string()),
        })
        .await?;

    // Apply a valid promo code, then a bogus one
    println!("\nApplying promo code SAVE10...");
    checkout.apply_promo("SAVE10").await?;
    wait_until_idle(&store).await;

    let pricing = store.state(|s| s.booking.pricing).await;
    println!(
        "  base ${:.2} + taxes ${:.2} - discount ${:.2} = total ${:.2}",
        pricing.base_price, pricing.taxes, pricing.discount, pricing.total,
    );

    println!("Applying promo code BOGUS...");
    checkout.apply_promo("BOGUS").await?;
    wait_until_idle(&store).await;
    if let Some(message) = store.state(|s| s.last_error.clone()).await {
        println!("  rejected: {message}");
    }

    // Submit
    println!("\nSubmitting booking...");
    let form_errors = checkout.confirm().await?;
    if !form_errors.is_valid() {
        anyhow::bail!("checkout form rejected: {form_errors:?}");
    }
    wait_until_idle(&store).await;

    // Result screen
    let view = result.view().await;
    match view.outcome {
        Some(BookingOutcome::Success) => {
            println!(
                "Confirmed! Booking id: {}",
                view.confirmation.as_deref().unwrap_or("<missing>")
            );
        },
        Some(BookingOutcome::Failure) => match view.error {
            Some(message) => println!("Booking failed: {message}"),
            None => println!("Booking was declined. Please try again."),
        },
        None => println!("Unexpected page after submission"),
    }

    println!("\nBack to home...");
    result.back_to_home().await?;
    let page = store.state(|s| s.page).await;
    println!("Current page: {page:?}");

    println!("\n=== Demo Complete ===");
    Ok(())
}
