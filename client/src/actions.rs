//! Actions driving the booking flow.
//!
//! One enum unifies user intents (selections, form submissions, closes)
//! and effect feedback (fetch results). Feedback variants for
//! step-scoped fetches carry the generation current when the fetch was
//! issued so the reducer can discard responses that arrive after the
//! user has left the step.

use crate::state::AuthMode;
use crate::types::{BookingConfirmation, Movie, MovieId, SeatId, SeatLayout, Session, Show, ShowId};

/// All inputs to the booking-flow reducer
#[derive(Clone, Debug)]
pub enum FlowAction {
    // ========== Lifecycle ==========
    /// The client started: restore any persisted session and load the
    /// catalog
    Started,

    /// Feedback: persisted session restored (or absent/corrupt)
    SessionRestored {
        /// The restored session, if a valid record existed
        session: Option<Session>,
    },

    /// Feedback: catalog fetch finished (failures degrade to empty)
    MoviesLoaded {
        /// The catalog; possibly empty
        movies: Vec<Movie>,
    },

    // ========== Browsing / show selection ==========
    /// The user selected a movie from the catalog
    MovieSelected {
        /// The selected movie
        movie_id: MovieId,
    },

    /// Feedback: show list fetch finished (failures degrade to empty)
    ShowsLoaded {
        /// Generation at fetch time
        generation: u64,
        /// Shows for the selected movie; possibly empty
        shows: Vec<Show>,
    },

    /// The user picked a showtime
    ShowPicked {
        /// The picked show
        show_id: ShowId,
    },

    // ========== Authentication ==========
    /// The user opened the login/signup dialog from the chrome
    AuthRequested,

    /// The user switched between the login and register forms
    AuthModeSwitched {
        /// The form to show
        mode: AuthMode,
    },

    /// The user submitted the login form
    LoginSubmitted {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// The user submitted the registration form
    RegisterSubmitted {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// Feedback: login/registration succeeded and the session was
    /// persisted
    AuthSucceeded {
        /// Generation at submit time
        generation: u64,
        /// The established session
        session: Session,
    },

    /// Feedback: login/registration was rejected
    AuthFailed {
        /// Generation at submit time
        generation: u64,
        /// Server-provided reason, surfaced inline
        reason: String,
    },

    /// The user logged out
    LogoutRequested,

    /// Feedback: the persisted session was cleared
    SessionCleared,

    // ========== Seat selection ==========
    /// Feedback: seat layout fetch succeeded
    SeatMapLoaded {
        /// Generation at fetch time
        generation: u64,
        /// The fetched layout snapshot
        layout: SeatLayout,
    },

    /// Feedback: seat layout fetch failed; the step stalls visibly
    SeatMapFailed {
        /// Generation at fetch time
        generation: u64,
        /// What went wrong, for display
        reason: String,
    },

    /// The user toggled a seat in the open layout
    SeatToggled {
        /// The toggled seat
        seat_id: SeatId,
    },

    /// The user submitted the selected seats for booking
    SubmitBooking,

    /// Feedback: the reservation was accepted
    BookingAccepted {
        /// Generation at submit time
        generation: u64,
        /// The confirmation record
        booking: BookingConfirmation,
    },

    /// Feedback: the reservation was rejected (e.g. a seat was booked by
    /// someone else between layout fetch and submit)
    BookingRejected {
        /// Generation at submit time
        generation: u64,
        /// Server-provided reason, surfaced inline verbatim
        reason: String,
    },

    // ========== Navigation ==========
    /// The user closed the current step (or dismissed the confirmation)
    CloseStep,
}
