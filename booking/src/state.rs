//! Flow state for the booking state machine.
//!
//! A single owned value holds everything the screens read: the current page,
//! the in-progress booking, the busy flag for in-flight collaborator calls,
//! and the last surfaced error message. It is only ever mutated by the
//! reducer, inside the store.

use crate::types::{Booking, Page, RequestToken};

/// State of the booking flow
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowState {
    /// The screen currently shown
    pub page: Page,
    /// The single in-progress reservation
    pub booking: Booking,
    /// Token of the collaborator call currently in flight, if any
    ///
    /// Doubles as the process-wide busy flag: screens disable promo and
    /// submit controls while this is `Some`.
    pub in_flight: Option<RequestToken>,
    /// Last surfaced error message (promo rejection or transport failure)
    pub last_error: Option<String>,
    /// Confirmation id of the last accepted submission
    pub confirmation: Option<String>,
    /// Monotonic source for request tokens
    next_token: u64,
}

impl FlowState {
    /// Creates the initial state: empty booking on the home page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a promo validation or submission is currently in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Issues a fresh request token and marks it as the in-flight operation
    ///
    /// Any resolution still pending for a previous token becomes stale and
    /// will be discarded on arrival.
    pub fn begin_request(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken::new(self.next_token);
        self.in_flight = Some(token);
        token
    }

    /// Accepts a resolution if its token is the current in-flight one
    ///
    /// On a match the busy flag is cleared and `true` is returned; a stale
    /// token leaves state untouched and returns `false`.
    pub fn finish_request(&mut self, token: RequestToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Drops any in-flight operation without waiting for its resolution
    ///
    /// Used when the booking is reset or re-anchored on a new experience;
    /// the abandoned resolution will fail the token check when it arrives.
    pub fn abandon_request(&mut self) {
        self.in_flight = None;
    }
}
