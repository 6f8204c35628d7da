//! Interactive CLI shell for the booking client.
//!
//! A thin imperative shell over the flow store: it reads commands,
//! translates them into actions, and renders the current step after the
//! fetches they trigger have settled.

use anyhow::Result;
use cinebook_client::actions::FlowAction;
use cinebook_client::config::Config;
use cinebook_client::environment::FlowEnvironment;
use cinebook_client::gateway::HttpGateway;
use cinebook_client::reducer::BookingFlowReducer;
use cinebook_client::session::FileSessionStore;
use cinebook_client::state::{AppState, AuthMode, FlowStep, SeatMap};
use cinebook_client::types::{MovieId, SeatId, ShowId};
use cinebook_core::environment::SystemClock;
use cinebook_runtime::Store;
use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type FlowStore = Store<AppState, FlowAction, FlowEnvironment, BookingFlowReducer>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(api_url = %config.api_url, "Starting cinebook");

    let environment = FlowEnvironment::new(
        Arc::new(HttpGateway::new(config.api_url)),
        Arc::new(FileSessionStore::new(config.session_file)),
        Arc::new(SystemClock),
    );
    let store = Store::new(AppState::new(), BookingFlowReducer::new(), environment);

    send(&store, FlowAction::Started).await;
    render(&store).await;
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("> ");
    let _ = std::io::stdout().flush();

    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {},
            ["quit" | "exit"] => break,
            ["help"] => print_help(),
            ["state"] => {},
            ["movies"] => {},
            ["open", index] => {
                if let Some(movie_id) = movie_at(&store, index).await {
                    send(&store, FlowAction::MovieSelected { movie_id }).await;
                } else {
                    println!("No such movie");
                }
            },
            ["pick", index] => {
                if let Some(show_id) = show_at(&store, index).await {
                    send(&store, FlowAction::ShowPicked { show_id }).await;
                } else {
                    println!("No such show");
                }
            },
            ["login", email, password] => {
                send(
                    &store,
                    FlowAction::LoginSubmitted {
                        email: (*email).to_string(),
                        password: (*password).to_string(),
                    },
                )
                .await;
            },
            ["register", name, email, password] => {
                send(
                    &store,
                    FlowAction::RegisterSubmitted {
                        name: (*name).to_string(),
                        email: (*email).to_string(),
                        password: (*password).to_string(),
                    },
                )
                .await;
            },
            ["mode", "login"] => {
                send(&store, FlowAction::AuthModeSwitched { mode: AuthMode::Login }).await;
            },
            ["mode", "register"] => {
                send(
                    &store,
                    FlowAction::AuthModeSwitched {
                        mode: AuthMode::Register,
                    },
                )
                .await;
            },
            ["auth"] => send(&store, FlowAction::AuthRequested).await,
            ["toggle", seat] => {
                send(
                    &store,
                    FlowAction::SeatToggled {
                        seat_id: SeatId::new((*seat).to_string()),
                    },
                )
                .await;
            },
            ["submit"] => send(&store, FlowAction::SubmitBooking).await,
            ["close"] => send(&store, FlowAction::CloseStep).await,
            ["logout"] => send(&store, FlowAction::LogoutRequested).await,
            _ => println!("Unknown command; try 'help'"),
        }

        render(&store).await;
        print!("> ");
        let _ = std::io::stdout().flush();
    }

    store.shutdown(Duration::from_secs(5)).await.ok();
    Ok(())
}

/// Send an action and wait for its fetches to settle before rendering.
async fn send(store: &FlowStore, action: FlowAction) {
    match store.send(action).await {
        Ok(mut handle) => {
            let _ = handle.wait_with_timeout(Duration::from_secs(10)).await;
            settle(store).await;
        },
        Err(err) => println!("({err})"),
    }
}

/// Wait until no step-local fetch is outstanding (bounded).
async fn settle(store: &FlowStore) {
    for _ in 0..200 {
        let busy = store
            .state(|s| {
                matches!(
                    &s.flow,
                    FlowStep::ShowSelection { shows: None, .. }
                        | FlowStep::SeatSelection {
                            seat_map: SeatMap::Loading,
                            ..
                        }
                        | FlowStep::AuthGate { in_flight: true, .. }
                )
            })
            .await;
        if !busy {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

async fn movie_at(store: &FlowStore, index: &str) -> Option<MovieId> {
    let index: usize = index.parse().ok()?;
    store
        .state(|s| s.catalog.get(index.checked_sub(1)?).map(|m| m.id.clone()))
        .await
}

async fn show_at(store: &FlowStore, index: &str) -> Option<ShowId> {
    let index: usize = index.parse().ok()?;
    store
        .state(|s| match &s.flow {
            FlowStep::ShowSelection {
                shows: Some(shows), ..
            } => shows.get(index.checked_sub(1)?).map(|show| show.id.clone()),
            _ => None,
        })
        .await
}

fn print_help() {
    println!(
        "commands: movies | open <n> | pick <n> | login <email> <pw> | \
         register <name> <email> <pw> | mode login|register | auth | \
         toggle <seat> | submit | close | logout | state | quit"
    );
}

async fn render(store: &FlowStore) {
    let state = store.state(Clone::clone).await;

    match &state.session {
        Some(session) => println!("-- signed in as {} <{}>", session.name, session.email),
        None => println!("-- anonymous"),
    }

    match &state.flow {
        FlowStep::Browsing => {
            if state.catalog.is_empty() {
                println!("No movies in the catalog yet.");
            } else {
                println!("Now showing:");
                for (i, movie) in state.catalog.iter().enumerate() {
                    println!("  {}. {} ({} mins)", i + 1, movie.title, movie.duration_minutes);
                }
            }
        },
        FlowStep::ShowSelection { movie, shows } => {
            println!("Showtimes for {}:", movie.title);
            match shows {
                None => println!("  loading..."),
                Some(shows) if shows.is_empty() => println!("  no shows found"),
                Some(shows) => {
                    for (i, show) in shows.iter().enumerate() {
                        println!(
                            "  {}. {} | screen {} | {}",
                            i + 1,
                            show.start_time,
                            show.screen,
                            show.price_cents
                        );
                    }
                },
            }
        },
        FlowStep::AuthGate {
            pending_show,
            mode,
            error,
            in_flight,
        } => {
            let mode = match mode {
                AuthMode::Login => "login",
                AuthMode::Register => "register",
            };
            println!("Sign in required ({mode})");
            if pending_show.is_some() {
                println!("  (continuing to seat selection after sign-in)");
            }
            if *in_flight {
                println!("  please wait...");
            }
            if let Some(error) = error {
                println!("  ! {error}");
            }
        },
        FlowStep::SeatSelection {
            show,
            seat_map,
            error,
            submitting,
        } => {
            println!("Pick your seats (screen {}, {}):", show.screen, show.price_cents);
            match seat_map {
                SeatMap::Loading => println!("  loading seat map..."),
                SeatMap::Failed { reason } => println!("  seat map unavailable: {reason}"),
                SeatMap::Ready { layout, selected } => {
                    for row in &layout.layout {
                        let seats: Vec<String> = row
                            .seats
                            .iter()
                            .map(|seat| {
                                if seat.booked {
                                    format!("[x {}]", seat.id)
                                } else if selected.contains(&seat.id) {
                                    format!("[* {}]", seat.id)
                                } else {
                                    format!("[  {}]", seat.id)
                                }
                            })
                            .collect();
                        println!("  {} {}", row.row, seats.join(" "));
                    }
                    println!("  {} seat(s) selected", selected.len());
                },
            }
            if *submitting {
                println!("  booking...");
            }
            if let Some(error) = error {
                println!("  ! {error}");
            }
        },
        FlowStep::Confirmation { booking } => {
            println!("Booking confirmed!");
            println!("  id:     {}", booking.booking_id);
            println!("  amount: {}", booking.amount_cents);
            println!("(close to continue browsing)");
        },
    }
}
