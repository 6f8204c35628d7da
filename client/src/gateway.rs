//! HTTP implementation of the booking gateway.
//!
//! Thin request-response plumbing over `reqwest`. Service rejections
//! carry a human-readable `detail` field; for auth and booking failures
//! that text is surfaced to the user verbatim.

use crate::environment::{BookingGateway, GatewayFuture};
use crate::error::GatewayError;
use crate::types::{AuthResponse, BookingConfirmation, Movie, MovieId, SeatId, SeatLayout, Show, ShowId};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// Error body the service attaches to rejections
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Reservation request body
#[derive(Debug, Serialize)]
struct BookingRequest {
    show_id: ShowId,
    seats: Vec<SeatId>,
}

/// Login request body
#[derive(Debug, Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Registration request body
#[derive(Debug, Serialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

/// HTTP client for the remote booking service
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given service base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a successful response body, or turn a rejection into the
    /// server's own reason.
    async fn decode<T>(response: Response) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
    {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<T>()
                .await
                .map_err(|e| GatewayError::DecodeFailed(e.to_string())),
            _ => {
                let reason = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.detail)
                    .unwrap_or_else(|| "Request failed".to_string());
                Err(GatewayError::Rejected { reason })
            },
        }
    }
}

impl BookingGateway for HttpGateway {
    fn login(&self, email: String, password: String) -> GatewayFuture<'_, AuthResponse> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });

        Box::pin(async move {
            tracing::debug!("POST /auth/login");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> GatewayFuture<'_, AuthResponse> {
        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            });

        Box::pin(async move {
            tracing::debug!("POST /auth/register");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn movies(&self) -> GatewayFuture<'_, Vec<Movie>> {
        let request = self.client.get(self.url("/movies"));

        Box::pin(async move {
            tracing::debug!("GET /movies");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn shows(&self, movie_id: MovieId) -> GatewayFuture<'_, Vec<Show>> {
        let request = self
            .client
            .get(self.url("/shows"))
            .query(&[("movie_id", movie_id.as_str())]);

        Box::pin(async move {
            tracing::debug!(movie_id = %movie_id, "GET /shows");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn seats(&self, show_id: ShowId) -> GatewayFuture<'_, SeatLayout> {
        let request = self
            .client
            .get(self.url(&format!("/shows/{show_id}/seats")));

        Box::pin(async move {
            tracing::debug!(show_id = %show_id, "GET /shows/{{id}}/seats");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn book(
        &self,
        token: String,
        show_id: ShowId,
        seats: Vec<SeatId>,
    ) -> GatewayFuture<'_, BookingConfirmation> {
        let request = self
            .client
            .post(self.url("/bookings"))
            .bearer_auth(token)
            .json(&BookingRequest { show_id, seats });

        Box::pin(async move {
            tracing::debug!("POST /bookings");
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
            Self::decode(response).await
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::Money;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8000/");
        assert_eq!(gateway.url("/movies"), "http://localhost:8000/movies");
    }

    #[test]
    fn seat_layout_decodes_wire_shape() {
        let json = r#"{
            "layout": [
                { "row": "A", "seats": [
                    { "id": "A1", "booked": false },
                    { "id": "A2", "booked": true }
                ]}
            ]
        }"#;

        let layout: SeatLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.layout.len(), 1);
        assert_eq!(layout.available_count(), 1);
        assert!(layout.seat(&SeatId::new("A2".to_string())).unwrap().booked);
    }

    #[test]
    fn movie_decodes_with_missing_optionals() {
        let json = r#"{ "id": "m1", "title": "Solaris", "duration_minutes": 167 }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title, "Solaris");
        assert!(movie.description.is_none());
        assert!(movie.poster_url.is_none());
    }

    #[test]
    fn confirmation_decodes_cents() {
        let json = r#"{ "booking_id": "b42", "amount_cents": 2600 }"#;
        let booking: BookingConfirmation = serde_json::from_str(json).unwrap();
        assert_eq!(booking.amount_cents, Money::from_cents(2600));
    }

    #[test]
    fn booking_request_serializes_seats_array() {
        let request = BookingRequest {
            show_id: ShowId::new("s1".to_string()),
            seats: vec![SeatId::new("A1".to_string()), SeatId::new("A2".to_string())],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["show_id"], "s1");
        assert_eq!(json["seats"][1], "A2");
    }
}
