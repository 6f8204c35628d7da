//! Injected dependencies for the booking-flow reducer.
//!
//! All external collaborators are abstracted behind traits so the
//! reducer stays a pure function: the remote booking service behind
//! [`BookingGateway`], durable credential storage behind
//! [`SessionStore`], and time behind [`Clock`].

use crate::error::{GatewayError, SessionStoreError};
use crate::types::{AuthResponse, BookingConfirmation, Movie, MovieId, SeatId, SeatLayout, Session, Show, ShowId};
use cinebook_core::environment::Clock;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by gateway methods
pub type GatewayFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// The remote booking service, as seen by the client
///
/// One method per endpoint the client consumes. The service owns all
/// authoritative state; every method is a plain request-response fetch.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn BookingGateway>`).
/// This is required for the effect system where reducers create effects
/// that capture the gateway.
pub trait BookingGateway: Send + Sync {
    /// Authenticate with an existing account
    fn login(&self, email: String, password: String) -> GatewayFuture<'_, AuthResponse>;

    /// Create an account and authenticate
    fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> GatewayFuture<'_, AuthResponse>;

    /// Fetch the movie catalog
    fn movies(&self) -> GatewayFuture<'_, Vec<Movie>>;

    /// Fetch the shows for one movie
    fn shows(&self, movie_id: MovieId) -> GatewayFuture<'_, Vec<Show>>;

    /// Fetch the seat layout for one show
    fn seats(&self, show_id: ShowId) -> GatewayFuture<'_, SeatLayout>;

    /// Submit a reservation (bearer credential required)
    fn book(
        &self,
        token: String,
        show_id: ShowId,
        seats: Vec<SeatId>,
    ) -> GatewayFuture<'_, BookingConfirmation>;
}

/// Durable storage for the session record
///
/// The only durable state the client owns. Operations are synchronous
/// (a tiny local file); they are invoked from inside effects, never from
/// the reducer itself.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if a valid record exists
    ///
    /// Never fails fatally: a missing or corrupt record yields `None`.
    fn restore(&self) -> Option<Session>;

    /// Replace the persisted session record
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if the record cannot be written.
    fn persist(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the persisted session record; idempotent
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if an existing record cannot be
    /// removed.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Environment dependencies for the booking-flow reducer
#[derive(Clone)]
pub struct FlowEnvironment {
    /// The remote booking service
    pub gateway: Arc<dyn BookingGateway>,
    /// Durable session storage
    pub sessions: Arc<dyn SessionStore>,
    /// Clock for session timestamps
    pub clock: Arc<dyn Clock>,
}

impl FlowEnvironment {
    /// Creates a new `FlowEnvironment`
    #[must_use]
    pub fn new(
        gateway: Arc<dyn BookingGateway>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            clock,
        }
    }
}
