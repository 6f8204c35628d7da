//! Application state for the booking client.
//!
//! The flow is modeled as a single tagged enum so that exactly one step
//! is representable at a time: there is no way to express "seat picker
//! and login dialog both open", which the step-per-boolean approach
//! allows.

use crate::types::{BookingConfirmation, Movie, MovieId, SeatId, SeatLayout, Session, Show};
use std::collections::HashSet;

/// Which form the auth step is currently showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign in with an existing account
    #[default]
    Login,
    /// Create a new account
    Register,
}

/// The seat map of the currently open seat-selection step
#[derive(Clone, Debug, PartialEq)]
pub enum SeatMap {
    /// Layout fetch outstanding
    Loading,
    /// Layout fetched; selection in progress
    Ready {
        /// The layout snapshot this selection was built against
        layout: SeatLayout,
        /// Seats chosen so far; always a subset of the layout's
        /// non-booked seats
        selected: HashSet<SeatId>,
    },
    /// Layout fetch failed; the step is stalled but stays open
    Failed {
        /// What went wrong, for display
        reason: String,
    },
}

/// The current step of the booking flow
///
/// `Browsing` is both the initial state and the state every close path
/// returns to. Step-local data (a pending show, an in-progress seat
/// selection) lives inside the variant and is discarded on transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FlowStep {
    /// Catalog browsing; no overlay open
    #[default]
    Browsing,

    /// Showtime picker for a chosen movie
    ShowSelection {
        /// The chosen movie
        movie: Movie,
        /// Fetched shows; `None` while the fetch is outstanding
        shows: Option<Vec<Show>>,
    },

    /// Login/register dialog
    ///
    /// Opened either as the authentication gate on the way to seat
    /// selection (`pending_show` is `Some`) or standalone from the page
    /// chrome (`pending_show` is `None`).
    AuthGate {
        /// Show to continue to once authenticated
        pending_show: Option<Show>,
        /// Login or register form
        mode: AuthMode,
        /// Inline failure message from the last attempt
        error: Option<String>,
        /// Whether a login/register request is outstanding
        in_flight: bool,
    },

    /// Seat picker for a chosen show
    SeatSelection {
        /// The chosen show
        show: Show,
        /// Layout fetch status and the in-progress selection
        seat_map: SeatMap,
        /// Inline failure message from the last submit attempt
        error: Option<String>,
        /// Whether a booking request is outstanding
        submitting: bool,
    },

    /// Booking confirmed; held for display until dismissed
    Confirmation {
        /// The confirmation record returned by the service
        booking: BookingConfirmation,
    },
}

impl FlowStep {
    /// Whether no overlay is open
    #[must_use]
    pub const fn is_browsing(&self) -> bool {
        matches!(self, Self::Browsing)
    }
}

/// Top-level client state
///
/// The session and catalog are shared context read by several steps; the
/// flow step carries everything step-local.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Current authenticated identity, if any
    pub session: Option<Session>,
    /// The movie catalog, fetched once at startup
    pub catalog: Vec<Movie>,
    /// Current flow step
    pub flow: FlowStep,
    /// Fetch generation: bumped on every step transition
    ///
    /// Every fetch effect carries the generation current when it was
    /// issued; feedback with a stale generation is discarded instead of
    /// being applied to a step the user has already left.
    pub generation: u64,
}

impl AppState {
    /// Creates the initial (anonymous, browsing) state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently active
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Look up a catalog movie by id
    #[must_use]
    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.catalog.iter().find(|movie| &movie.id == id)
    }

    /// Advance the fetch generation and return the new value
    pub const fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// The in-progress seat selection, if the seat picker is open and
    /// its layout has loaded
    #[must_use]
    pub fn selected_seats(&self) -> Option<&HashSet<SeatId>> {
        match &self.flow {
            FlowStep::SeatSelection {
                seat_map: SeatMap::Ready { selected, .. },
                ..
            } => Some(selected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MovieId;

    #[test]
    fn initial_state_is_anonymous_browsing() {
        let state = AppState::new();
        assert!(!state.is_authenticated());
        assert!(state.flow.is_browsing());
        assert!(state.catalog.is_empty());
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn bump_generation_is_monotonic() {
        let mut state = AppState::new();
        let a = state.bump_generation();
        let b = state.bump_generation();
        assert!(b > a);
        assert_eq!(state.generation, b);
    }

    #[test]
    fn movie_lookup_misses_unknown_id() {
        let state = AppState::new();
        assert!(state.movie(&MovieId::new("m1".to_string())).is_none());
    }
}
