// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared across the crate.
//!
//! Nothing in this subsystem is fatal: every error degrades exactly one
//! derived view (check-in, leaderboard, notifications, ...) and the caller
//! decides how to surface it. `user_message` produces the string the UI
//! layer shows for fetch failures.

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local key-value store read/write failure.
    #[error("Local storage error: {0}")]
    Storage(String),

    /// Backend request failed (network, HTTP status, decode).
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend request exceeded the configured deadline.
    ///
    /// Kept distinct from [`AppError::Backend`] for diagnostics; read paths
    /// fall back to empty collections in both cases.
    #[error("Backend request timed out")]
    Timeout,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A session operation ran before its required context was loaded.
    #[error("Missing session context: {0}")]
    MissingContext(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True if this error is the fetch deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout)
    }

    /// User-visible message for a failed fetch.
    ///
    /// Timeouts get a distinct message; everything else collapses to a
    /// generic one so backend internals never leak into the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Timeout => "Request timed out. Check your connection and try again.",
            AppError::Storage(_) => "Couldn't save your changes on this device.",
            _ => "Something went wrong loading your family data.",
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
