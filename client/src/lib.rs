//! # Cinebook Client
//!
//! A movie-booking client built on the cinebook reducer architecture.
//!
//! The client browses a remote catalog, lets the user pick a showtime and
//! seats, and submits a reservation. All authoritative state (seat
//! availability, pricing, bookings, credentials) lives behind the remote
//! service; this crate owns display state and orchestration only.
//!
//! ## Structure
//!
//! - [`types`] — domain data model (movies, shows, seats, sessions)
//! - [`state`] — application state and the single tagged flow step
//! - [`actions`] — user intents and effect feedback
//! - [`reducer`] — the booking-flow state machine
//! - [`environment`] — injected dependencies (gateway, session store)
//! - [`gateway`] — HTTP implementation of the booking gateway
//! - [`session`] — file-backed session persistence
//! - [`config`] — environment-variable configuration
//!
//! ## Example
//!
//! ```ignore
//! use cinebook_client::{
//!     actions::FlowAction, environment::FlowEnvironment, reducer::BookingFlowReducer,
//!     state::AppState,
//! };
//! use cinebook_runtime::Store;
//!
//! let store = Store::new(AppState::default(), BookingFlowReducer, environment);
//! store.send(FlowAction::Started).await?;
//! ```

pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod mocks;
pub mod reducer;
pub mod session;
pub mod state;
pub mod types;
