//! Domain types for the booking client.
//!
//! Everything here mirrors records owned by the remote service. The
//! client never invents identifiers; all ids are opaque server-issued
//! strings carried back and forth on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a movie
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieId(String);

impl MovieId {
    /// Creates a `MovieId` from a server-issued string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a show (a scheduled screening)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowId(String);

impl ShowId {
    /// Creates a `ShowId` from a server-issued string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a seat within one show's layout (e.g. `A3`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId(String);

impl SeatId {
    /// Creates a `SeatId` from a layout entry
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user account
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId` from a server-issued string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a confirmed booking
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a `BookingId` from a server-issued string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in dollars (as floating point)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // i64 to f64 precision loss is acceptable for display
    pub fn dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.dollars())
    }
}

/// A bookable movie from the catalog
///
/// Immutable from the client's perspective; sourced entirely from the
/// catalog fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Server-issued identifier
    pub id: MovieId,
    /// Title for display
    pub title: String,
    /// Optional synopsis
    #[serde(default)]
    pub description: Option<String>,
    /// Running time in minutes
    pub duration_minutes: u32,
    /// Optional poster image URL
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// A scheduled screening of a movie
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Server-issued identifier
    pub id: ShowId,
    /// The movie being screened
    pub movie_id: MovieId,
    /// When the screening starts
    pub start_time: DateTime<Utc>,
    /// Screen/auditorium label
    pub screen: String,
    /// Price per seat
    pub price_cents: Money,
}

/// One seat in a show's layout
///
/// `booked` is authoritative and supplied by the remote service at fetch
/// time; the client never flips it locally except by re-fetching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat identifier within the layout
    pub id: SeatId,
    /// Whether the seat was already booked at fetch time
    pub booked: bool,
}

/// One row of seats
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRow {
    /// Row label (e.g. `A`)
    pub row: String,
    /// Seats in display order
    pub seats: Vec<Seat>,
}

/// The full row/seat map for one show, as fetched
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Rows in display order
    pub layout: Vec<SeatRow>,
}

impl SeatLayout {
    /// Look up a seat by id
    #[must_use]
    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        self.layout
            .iter()
            .flat_map(|row| row.seats.iter())
            .find(|seat| &seat.id == id)
    }

    /// Whether the layout contains the given seat id at all
    #[must_use]
    pub fn contains(&self, id: &SeatId) -> bool {
        self.seat(id).is_some()
    }

    /// Number of seats not yet booked
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.layout
            .iter()
            .flat_map(|row| row.seats.iter())
            .filter(|seat| !seat.booked)
            .count()
    }
}

/// The authenticated identity and bearer credential
///
/// Created on successful login/registration, persisted so it survives a
/// process restart, destroyed on logout. Absence of a session is the
/// valid anonymous state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-issued account identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Bearer credential for authenticated requests
    pub token: String,
    /// When this session was established on this client
    pub logged_in_at: DateTime<Utc>,
}

/// Successful authentication payload from the service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer credential
    pub token: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Server-issued account identifier
    pub user_id: UserId,
}

impl AuthResponse {
    /// Build the client session established by this response
    #[must_use]
    pub fn into_session(self, logged_in_at: DateTime<Utc>) -> Session {
        Session {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            token: self.token,
            logged_in_at,
        }
    }
}

/// A confirmed reservation, held only for display until dismissed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Server-issued booking identifier
    pub booking_id: BookingId,
    /// Total amount charged
    pub amount_cents: Money,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    fn layout_two_rows() -> SeatLayout {
        SeatLayout {
            layout: vec![
                SeatRow {
                    row: "A".to_string(),
                    seats: vec![
                        Seat {
                            id: SeatId::new("A1".to_string()),
                            booked: false,
                        },
                        Seat {
                            id: SeatId::new("A2".to_string()),
                            booked: true,
                        },
                    ],
                },
                SeatRow {
                    row: "B".to_string(),
                    seats: vec![Seat {
                        id: SeatId::new("B1".to_string()),
                        booked: false,
                    }],
                },
            ],
        }
    }

    #[test]
    fn money_displays_as_dollars() {
        assert_eq!(Money::from_cents(1250).to_string(), "$12.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn layout_seat_lookup_spans_rows() {
        let layout = layout_two_rows();
        assert!(layout.contains(&SeatId::new("B1".to_string())));
        assert!(!layout.contains(&SeatId::new("C1".to_string())));

        let seat = layout.seat(&SeatId::new("A2".to_string())).unwrap();
        assert!(seat.booked);
    }

    #[test]
    fn layout_available_count_skips_booked() {
        assert_eq!(layout_two_rows().available_count(), 2);
    }
}
