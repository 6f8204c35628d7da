//! The booking-flow state machine.
//!
//! All orchestration lives here: which step is visible, the
//! authentication gate, seat-selection invariants, and the discard of
//! fetch results that arrive after the user has left the step they were
//! issued for.

use crate::actions::FlowAction;
use crate::environment::FlowEnvironment;
use crate::error::GatewayError;
use crate::state::{AppState, AuthMode, FlowStep, SeatMap};
use crate::types::{AuthResponse, SeatId, Show};
use cinebook_core::environment::Clock;
use cinebook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::collections::HashSet;
use std::sync::Arc;

/// Reducer for the booking flow
#[derive(Clone, Debug)]
pub struct BookingFlowReducer;

impl BookingFlowReducer {
    /// Creates a new `BookingFlowReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fetch the show list for a movie; failures degrade to an empty
    /// list (the catalog tier is non-critical browsing data).
    fn load_shows_effect(
        env: &FlowEnvironment,
        movie_id: crate::types::MovieId,
        generation: u64,
    ) -> Effect<FlowAction> {
        let gateway = Arc::clone(&env.gateway);
        Effect::Future(Box::pin(async move {
            let shows = match gateway.shows(movie_id).await {
                Ok(shows) => shows,
                Err(err) => {
                    tracing::debug!(error = %err, "Show list fetch failed, degrading to empty");
                    Vec::new()
                },
            };
            Some(FlowAction::ShowsLoaded { generation, shows })
        }))
    }

    /// Enter seat selection for a show and fetch its layout.
    fn open_seat_selection(
        state: &mut AppState,
        env: &FlowEnvironment,
        show: Show,
    ) -> SmallVec<[Effect<FlowAction>; 4]> {
        let generation = state.bump_generation();
        let show_id = show.id.clone();
        state.flow = FlowStep::SeatSelection {
            show,
            seat_map: SeatMap::Loading,
            error: None,
            submitting: false,
        };

        let gateway = Arc::clone(&env.gateway);
        smallvec![Effect::Future(Box::pin(async move {
            match gateway.seats(show_id).await {
                Ok(layout) => Some(FlowAction::SeatMapLoaded { generation, layout }),
                Err(err) => Some(FlowAction::SeatMapFailed {
                    generation,
                    reason: err.to_string(),
                }),
            }
        }))]
    }

    /// Turn an auth result into feedback, persisting the session first
    /// so the durable record never lags a session the flow considers
    /// established.
    fn finish_auth(
        env: &FlowEnvironment,
        generation: u64,
        result: Result<AuthResponse, GatewayError>,
    ) -> FlowAction {
        match result {
            Ok(auth) => {
                let session = auth.into_session(env.clock.now());
                match env.sessions.persist(&session) {
                    Ok(()) => FlowAction::AuthSucceeded {
                        generation,
                        session,
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to persist session");
                        FlowAction::AuthFailed {
                            generation,
                            reason: err.to_string(),
                        }
                    },
                }
            },
            Err(err) => FlowAction::AuthFailed {
                generation,
                reason: err.to_string(),
            },
        }
    }
}

impl Default for BookingFlowReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for BookingFlowReducer {
    type State = AppState;
    type Action = FlowAction;
    type Environment = FlowEnvironment;

    #[allow(clippy::too_many_lines)] // The transition table is one match by design
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            FlowAction::Started => {
                let sessions = Arc::clone(&env.sessions);
                let gateway = Arc::clone(&env.gateway);
                smallvec![
                    Effect::Future(Box::pin(async move {
                        Some(FlowAction::SessionRestored {
                            session: sessions.restore(),
                        })
                    })),
                    Effect::Future(Box::pin(async move {
                        let movies = match gateway.movies().await {
                            Ok(movies) => movies,
                            Err(err) => {
                                tracing::debug!(error = %err, "Catalog fetch failed, degrading to empty");
                                Vec::new()
                            },
                        };
                        Some(FlowAction::MoviesLoaded { movies })
                    })),
                ]
            },

            FlowAction::SessionRestored { session } => {
                state.session = session;
                smallvec![Effect::None]
            },

            FlowAction::MoviesLoaded { movies } => {
                state.catalog = movies;
                smallvec![Effect::None]
            },

            // ========== Browsing / show selection ==========
            FlowAction::MovieSelected { movie_id } => {
                if !state.flow.is_browsing() {
                    return smallvec![Effect::None];
                }
                let Some(movie) = state.movie(&movie_id).cloned() else {
                    return smallvec![Effect::None];
                };

                let generation = state.bump_generation();
                state.flow = FlowStep::ShowSelection { movie, shows: None };
                smallvec![Self::load_shows_effect(env, movie_id, generation)]
            },

            FlowAction::ShowsLoaded { generation, shows } => {
                if generation != state.generation {
                    tracing::trace!("Discarding stale show list");
                    return smallvec![Effect::None];
                }
                if let FlowStep::ShowSelection { shows: slot, .. } = &mut state.flow {
                    *slot = Some(shows);
                }
                smallvec![Effect::None]
            },

            FlowAction::ShowPicked { show_id } => {
                let FlowStep::ShowSelection {
                    shows: Some(shows), ..
                } = &state.flow
                else {
                    return smallvec![Effect::None];
                };
                let Some(show) = shows.iter().find(|show| show.id == show_id).cloned() else {
                    return smallvec![Effect::None];
                };

                // The gate is re-evaluated at every pick: login/logout may
                // have happened since the last one.
                if state.session.is_some() {
                    Self::open_seat_selection(state, env, show)
                } else {
                    state.bump_generation();
                    state.flow = FlowStep::AuthGate {
                        pending_show: Some(show),
                        mode: AuthMode::Login,
                        error: None,
                        in_flight: false,
                    };
                    smallvec![Effect::None]
                }
            },

            // ========== Authentication ==========
            FlowAction::AuthRequested => {
                if !state.flow.is_browsing() {
                    return smallvec![Effect::None];
                }
                state.bump_generation();
                state.flow = FlowStep::AuthGate {
                    pending_show: None,
                    mode: AuthMode::Login,
                    error: None,
                    in_flight: false,
                };
                smallvec![Effect::None]
            },

            FlowAction::AuthModeSwitched { mode } => {
                if let FlowStep::AuthGate {
                    mode: current,
                    error,
                    ..
                } = &mut state.flow
                {
                    *current = mode;
                    *error = None;
                }
                smallvec![Effect::None]
            },

            FlowAction::LoginSubmitted { email, password } => {
                let FlowStep::AuthGate {
                    error, in_flight, ..
                } = &mut state.flow
                else {
                    return smallvec![Effect::None];
                };
                if *in_flight {
                    return smallvec![Effect::None];
                }
                if email.trim().is_empty() || password.is_empty() {
                    *error = Some("Email and password are required".to_string());
                    return smallvec![Effect::None];
                }

                *in_flight = true;
                *error = None;

                let generation = state.generation;
                let env = env.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let result = env.gateway.login(email, password).await;
                    Some(Self::finish_auth(&env, generation, result))
                }))]
            },

            FlowAction::RegisterSubmitted {
                name,
                email,
                password,
            } => {
                let FlowStep::AuthGate {
                    error, in_flight, ..
                } = &mut state.flow
                else {
                    return smallvec![Effect::None];
                };
                if *in_flight {
                    return smallvec![Effect::None];
                }
                if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                    *error = Some("Name, email and password are required".to_string());
                    return smallvec![Effect::None];
                }

                *in_flight = true;
                *error = None;

                let generation = state.generation;
                let env = env.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let result = env.gateway.register(name, email, password).await;
                    Some(Self::finish_auth(&env, generation, result))
                }))]
            },

            FlowAction::AuthSucceeded {
                generation,
                session,
            } => {
                // The session is shared app context and is already on
                // disk; apply it even if the gate was closed meanwhile.
                state.session = Some(session);

                if generation != state.generation {
                    tracing::trace!("Auth finished after its gate closed; not navigating");
                    return smallvec![Effect::None];
                }
                let FlowStep::AuthGate { pending_show, .. } = &mut state.flow else {
                    return smallvec![Effect::None];
                };

                match pending_show.take() {
                    Some(show) => Self::open_seat_selection(state, env, show),
                    None => {
                        state.bump_generation();
                        state.flow = FlowStep::Browsing;
                        smallvec![Effect::None]
                    },
                }
            },

            FlowAction::AuthFailed { generation, reason } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }
                if let FlowStep::AuthGate {
                    error, in_flight, ..
                } = &mut state.flow
                {
                    *error = Some(reason);
                    *in_flight = false;
                }
                smallvec![Effect::None]
            },

            FlowAction::LogoutRequested => {
                let sessions = Arc::clone(&env.sessions);
                smallvec![Effect::Future(Box::pin(async move {
                    if let Err(err) = sessions.clear() {
                        tracing::warn!(error = %err, "Failed to clear persisted session");
                    }
                    Some(FlowAction::SessionCleared)
                }))]
            },

            FlowAction::SessionCleared => {
                state.session = None;
                smallvec![Effect::None]
            },

            // ========== Seat selection ==========
            FlowAction::SeatMapLoaded { generation, layout } => {
                if generation != state.generation {
                    tracing::trace!("Discarding stale seat layout");
                    return smallvec![Effect::None];
                }
                if let FlowStep::SeatSelection { seat_map, .. } = &mut state.flow {
                    // A fresh layout always replaces the previous one and
                    // its selection in full.
                    *seat_map = SeatMap::Ready {
                        layout,
                        selected: HashSet::new(),
                    };
                }
                smallvec![Effect::None]
            },

            FlowAction::SeatMapFailed { generation, reason } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }
                if let FlowStep::SeatSelection { seat_map, .. } = &mut state.flow {
                    *seat_map = SeatMap::Failed { reason };
                }
                smallvec![Effect::None]
            },

            FlowAction::SeatToggled { seat_id } => {
                if let FlowStep::SeatSelection {
                    seat_map: SeatMap::Ready { layout, selected },
                    ..
                } = &mut state.flow
                {
                    match layout.seat(&seat_id) {
                        Some(seat) if !seat.booked => {
                            if !selected.remove(&seat_id) {
                                selected.insert(seat_id);
                            }
                        },
                        // Booked or unknown seats cannot be selected.
                        _ => {},
                    }
                }
                smallvec![Effect::None]
            },

            FlowAction::SubmitBooking => {
                let FlowStep::SeatSelection {
                    show,
                    seat_map: SeatMap::Ready { selected, .. },
                    error,
                    submitting,
                } = &mut state.flow
                else {
                    return smallvec![Effect::None];
                };
                if *submitting || selected.is_empty() {
                    return smallvec![Effect::None];
                }
                // The gate enforces this upstream; defend here anyway.
                let Some(session) = &state.session else {
                    *error = Some("Sign in to book seats".to_string());
                    return smallvec![Effect::None];
                };

                *submitting = true;
                *error = None;

                let generation = state.generation;
                let token = session.token.clone();
                let show_id = show.id.clone();
                let mut seats: Vec<SeatId> = selected.iter().cloned().collect();
                seats.sort();

                let gateway = Arc::clone(&env.gateway);
                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.book(token, show_id, seats).await {
                        Ok(booking) => Some(FlowAction::BookingAccepted {
                            generation,
                            booking,
                        }),
                        Err(err) => Some(FlowAction::BookingRejected {
                            generation,
                            reason: err.to_string(),
                        }),
                    }
                }))]
            },

            FlowAction::BookingAccepted {
                generation,
                booking,
            } => {
                if generation != state.generation {
                    tracing::trace!("Discarding booking result for a closed step");
                    return smallvec![Effect::None];
                }
                if matches!(state.flow, FlowStep::SeatSelection { .. }) {
                    state.bump_generation();
                    state.flow = FlowStep::Confirmation { booking };
                }
                smallvec![Effect::None]
            },

            FlowAction::BookingRejected { generation, reason } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }
                if let FlowStep::SeatSelection {
                    error, submitting, ..
                } = &mut state.flow
                {
                    // The selection is left exactly as it was; retrying is
                    // always an explicit user action.
                    *error = Some(reason);
                    *submitting = false;
                }
                smallvec![Effect::None]
            },

            // ========== Navigation ==========
            FlowAction::CloseStep => {
                if !state.flow.is_browsing() {
                    state.bump_generation();
                    state.flow = FlowStep::Browsing;
                }
                smallvec![Effect::None]
            },
        }
    }
}
