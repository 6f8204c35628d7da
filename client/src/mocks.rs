//! Mock environment implementations for testing.
//!
//! Simple in-memory stand-ins for the gateway and session store, with
//! scripted responses and call recording so tests can drive the whole
//! flow without a network or a filesystem.

use crate::environment::{BookingGateway, GatewayFuture, SessionStore};
use crate::error::{GatewayError, SessionStoreError};
use crate::types::{
    AuthResponse, BookingConfirmation, Movie, MovieId, SeatId, SeatLayout, Session, Show, ShowId,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One recorded `book` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedBooking {
    /// Bearer token the call carried
    pub token: String,
    /// Show the reservation was for
    pub show_id: ShowId,
    /// Seats in wire order
    pub seats: Vec<SeatId>,
}

#[derive(Default)]
struct GatewayScript {
    login: VecDeque<Result<AuthResponse, GatewayError>>,
    register: VecDeque<Result<AuthResponse, GatewayError>>,
    movies: VecDeque<Result<Vec<Movie>, GatewayError>>,
    shows: VecDeque<Result<Vec<Show>, GatewayError>>,
    seats: VecDeque<Result<SeatLayout, GatewayError>>,
    book: VecDeque<Result<BookingConfirmation, GatewayError>>,
    shows_requests: Vec<MovieId>,
    seats_requests: Vec<ShowId>,
    bookings: Vec<RecordedBooking>,
}

/// Mock booking gateway with scripted responses
///
/// Responses are queued per endpoint and consumed in order; an
/// unscripted call fails like a network error, which exercises the
/// client's degradation paths.
#[derive(Clone, Default)]
pub struct MockGateway {
    script: Arc<Mutex<GatewayScript>>,
    latency: Option<Duration>,
}

impl MockGateway {
    /// Create a gateway with no scripted responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response, to let tests navigate away mid-fetch
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn lock(&self) -> MutexGuard<'_, GatewayScript> {
        self.script.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue a login result
    pub fn script_login(&self, result: Result<AuthResponse, GatewayError>) {
        self.lock().login.push_back(result);
    }

    /// Queue a registration result
    pub fn script_register(&self, result: Result<AuthResponse, GatewayError>) {
        self.lock().register.push_back(result);
    }

    /// Queue a catalog result
    pub fn script_movies(&self, result: Result<Vec<Movie>, GatewayError>) {
        self.lock().movies.push_back(result);
    }

    /// Queue a show-list result
    pub fn script_shows(&self, result: Result<Vec<Show>, GatewayError>) {
        self.lock().shows.push_back(result);
    }

    /// Queue a seat-layout result
    pub fn script_seats(&self, result: Result<SeatLayout, GatewayError>) {
        self.lock().seats.push_back(result);
    }

    /// Queue a booking result
    pub fn script_book(&self, result: Result<BookingConfirmation, GatewayError>) {
        self.lock().book.push_back(result);
    }

    /// Movie ids the client fetched shows for, in order
    #[must_use]
    pub fn shows_requests(&self) -> Vec<MovieId> {
        self.lock().shows_requests.clone()
    }

    /// Show ids the client fetched seat layouts for, in order
    #[must_use]
    pub fn seats_requests(&self) -> Vec<ShowId> {
        self.lock().seats_requests.clone()
    }

    /// Reservation requests the client submitted, in order
    #[must_use]
    pub fn bookings(&self) -> Vec<RecordedBooking> {
        self.lock().bookings.clone()
    }

    fn unscripted() -> GatewayError {
        GatewayError::RequestFailed("no scripted response".to_string())
    }

    fn respond<T>(
        &self,
        pop: impl FnOnce(&mut GatewayScript) -> Option<Result<T, GatewayError>>,
    ) -> GatewayFuture<'_, T>
    where
        T: Send + 'static,
    {
        let result = pop(&mut self.lock()).unwrap_or_else(|| Err(Self::unscripted()));
        let latency = self.latency;
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}

impl BookingGateway for MockGateway {
    fn login(&self, _email: String, _password: String) -> GatewayFuture<'_, AuthResponse> {
        self.respond(|s| s.login.pop_front())
    }

    fn register(
        &self,
        _name: String,
        _email: String,
        _password: String,
    ) -> GatewayFuture<'_, AuthResponse> {
        self.respond(|s| s.register.pop_front())
    }

    fn movies(&self) -> GatewayFuture<'_, Vec<Movie>> {
        self.respond(|s| s.movies.pop_front())
    }

    fn shows(&self, movie_id: MovieId) -> GatewayFuture<'_, Vec<Show>> {
        self.lock().shows_requests.push(movie_id);
        self.respond(|s| s.shows.pop_front())
    }

    fn seats(&self, show_id: ShowId) -> GatewayFuture<'_, SeatLayout> {
        self.lock().seats_requests.push(show_id);
        self.respond(|s| s.seats.pop_front())
    }

    fn book(
        &self,
        token: String,
        show_id: ShowId,
        seats: Vec<SeatId>,
    ) -> GatewayFuture<'_, BookingConfirmation> {
        self.lock().bookings.push(RecordedBooking {
            token,
            show_id,
            seats,
        });
        self.respond(|s| s.book.pop_front())
    }
}

/// Mock session store keeping the record in memory
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    record: Arc<Mutex<Option<Session>>>,
    fail_persist: bool,
}

impl MemorySessionStore {
    /// Create an empty (anonymous) store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a persisted session
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(session))),
            fail_persist: false,
        }
    }

    /// Make every `persist` call fail, for error-path tests
    #[must_use]
    pub const fn failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    /// The currently persisted record, if any
    #[must_use]
    pub fn persisted(&self) -> Option<Session> {
        self.record
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn restore(&self) -> Option<Session> {
        self.persisted()
    }

    fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        if self.fail_persist {
            return Err(SessionStoreError::Io(std::io::Error::other(
                "scripted persist failure",
            )));
        }
        *self
            .record
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self
            .record
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}
