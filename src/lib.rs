// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gamification and notification core for a family-organization app.
//!
//! This crate owns the client-side logic the app's screens render: the
//! points ledger over the family activity feed, daily check-in streaks,
//! achievement unlocks, the leaderboard, and the notification list with
//! its locally-persisted read state. The backend-as-a-service on the far
//! side (auth, row storage, realtime fan-out) is reached through a thin
//! REST client and is otherwise out of scope.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod time_utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use session::Session;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON logging.
///
/// Call once from the embedding app before starting a session.
pub fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("family_points=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
