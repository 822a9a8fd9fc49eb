//! Actions for the booking flow.
//!
//! Commands are dispatched by screen controllers in response to user input;
//! resolutions are fed back by effects when a collaborator call completes.
//! Every resolution carries the [`RequestToken`] of the call that produced
//! it so the reducer can discard stale completions.

use crate::types::{Experience, Page, PromoDiscount, RequestToken, UserDetailsPatch};
use serde::{Deserialize, Serialize};

/// All inputs to the booking reducer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Commands ==========
    /// Command: anchor a fresh booking on this experience
    ///
    /// A full reset, not a partial patch: date, time, user details, promo
    /// code, and discount all return to their defaults.
    SelectExperience {
        /// The chosen catalogue item
        experience: Experience,
    },

    /// Command: choose a date and time for the current booking
    ///
    /// Availability is checked by the detail screen before dispatching.
    SelectSlot {
        /// Calendar date, ISO `YYYY-MM-DD`
        date: String,
        /// Display time within the date
        time: String,
    },

    /// Command: merge form input into the booking's contact details
    UpdateUserDetails {
        /// Fields to update; absent fields are left unchanged
        patch: UserDetailsPatch,
    },

    /// Command: validate a promo code and apply its discount
    ApplyPromoCode {
        /// The code as typed (matched case-insensitively)
        code: String,
    },

    /// Command: submit the current booking for confirmation
    SubmitBooking,

    /// Command: discard the booking and return to the catalogue
    ResetBooking,

    /// Command: backward navigation to an already-valid page
    ///
    /// Forward transitions happen through the other commands; requests for
    /// pages whose prerequisite state is missing are ignored.
    NavigateTo {
        /// The requested page
        page: Page,
    },

    // ========== Resolutions ==========
    /// Resolution: the promo collaborator accepted the code
    PromoAccepted {
        /// Token of the originating call
        token: RequestToken,
        /// The accepted code
        code: String,
        /// The granted discount, percent or flat
        discount: PromoDiscount,
    },

    /// Resolution: the promo collaborator rejected the code
    PromoRejected {
        /// Token of the originating call
        token: RequestToken,
        /// Message to surface near the promo input
        message: String,
    },

    /// Resolution: submission confirmed
    SubmissionAccepted {
        /// Token of the originating call
        token: RequestToken,
        /// Confirmation id from the collaborator
        booking_id: String,
    },

    /// Resolution: submission answered with a business failure
    ///
    /// Routes to the failure screen without surfacing an error message;
    /// distinct from [`BookingAction::SubmissionErrored`].
    SubmissionDeclined {
        /// Token of the originating call
        token: RequestToken,
    },

    /// Resolution: submission failed at the transport level
    ///
    /// Routes to the failure screen and additionally surfaces a generic
    /// error message.
    SubmissionErrored {
        /// Token of the originating call
        token: RequestToken,
        /// Message to surface
        message: String,
    },
}
