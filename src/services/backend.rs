// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend REST client for the family data service.
//!
//! Handles:
//! - Activity feed fetch (server-ordered newest-first)
//! - Family metadata + member list fetch
//! - Unlocked achievement fetch
//! - Points-award and goal writes with bounded retry
//!
//! Every call is bounded by the configured fetch deadline. Writes are
//! retried with a fixed backoff; reads are not (a failed read falls back to
//! an empty view at the session layer instead).

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Achievement, Family, FamilyGoal, NewActivity, NewGoal, PointsActivity};

/// Typed client for the backend REST API.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    fetch_timeout: Duration,
    write_attempts: u32,
    write_backoff: Duration,
}

impl BackendClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url.clone(),
            api_key: config.backend_api_key.clone(),
            fetch_timeout: config.fetch_timeout(),
            write_attempts: config.write_attempts.max(1),
            write_backoff: config.write_backoff(),
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    /// Fetch the family's activity feed, newest first.
    ///
    /// Ordering is requested server-side (`order=created_at.desc`), which is
    /// what lets [`Ledger::new`](crate::services::Ledger::new) take its
    /// newest-first input contract at face value.
    pub async fn list_activities(&self, family_id: &str) -> Result<Vec<PointsActivity>> {
        let url = format!(
            "{}/families/{}/activities?order=created_at.desc",
            self.base_url, family_id
        );
        self.get_json(&url).await
    }

    /// Fetch family metadata with the member list embedded.
    pub async fn get_family(&self, family_id: &str) -> Result<Family> {
        let url = format!("{}/families/{}", self.base_url, family_id);
        self.get_json(&url).await
    }

    /// Fetch the family's unlocked achievements.
    pub async fn list_achievements(&self, family_id: &str) -> Result<Vec<Achievement>> {
        let url = format!("{}/families/{}/achievements", self.base_url, family_id);
        self.get_json(&url).await
    }

    // ─── Writes ──────────────────────────────────────────────────────────────

    /// Append a points activity (the points-award sink).
    ///
    /// Idempotency is the caller's responsibility; no dedupe key is sent.
    pub async fn award_points(
        &self,
        family_id: &str,
        activity: &NewActivity,
    ) -> Result<PointsActivity> {
        let url = format!("{}/families/{}/activities", self.base_url, family_id);
        self.post_json_with_retry(&url, activity).await
    }

    /// Create a family goal.
    pub async fn create_goal(&self, family_id: &str, goal: &NewGoal) -> Result<FamilyGoal> {
        let url = format!("{}/families/{}/goals", self.base_url, family_id);
        self.post_json_with_retry(&url, goal).await
    }

    /// Add points to a goal's progress.
    pub async fn add_goal_progress(
        &self,
        family_id: &str,
        goal_id: &str,
        points: u32,
    ) -> Result<FamilyGoal> {
        let url = format!(
            "{}/families/{}/goals/{}/progress",
            self.base_url, family_id, goal_id
        );
        let body = serde_json::json!({ "points": points });
        self.post_json_with_retry(&url, &body).await
    }

    // ─── Request plumbing ────────────────────────────────────────────────────

    /// Generic GET with JSON response, bounded by the fetch deadline.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = async {
            let response = self
                .http
                .get(url)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| AppError::Backend(e.to_string()))?;
            self.check_response_json(response).await
        };

        tokio::time::timeout(self.fetch_timeout, request)
            .await
            .map_err(|_| AppError::Timeout)?
    }

    /// Single POST attempt with JSON body and response, bounded by the
    /// fetch deadline.
    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = async {
            let response = self
                .http
                .post(url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await
                .map_err(|e| AppError::Backend(e.to_string()))?;
            self.check_response_json(response).await
        };

        tokio::time::timeout(self.fetch_timeout, request)
            .await
            .map_err(|_| AppError::Timeout)?
    }

    /// POST with bounded retry and fixed backoff.
    ///
    /// Client errors (4xx) are not retried; repeating them cannot succeed.
    /// After the last attempt the error propagates and the caller must not
    /// assume the write happened.
    async fn post_json_with_retry<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            match self.post_json(url, body).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(url, attempt, "Backend write succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e @ (AppError::BadRequest(_) | AppError::NotFound(_))) => return Err(e),
                Err(e) if attempt < self.write_attempts => {
                    tracing::warn!(url, attempt, error = %e, "Backend write failed, retrying");
                    tokio::time::sleep(self.write_backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(url, attempt, error = %e, "Backend write failed");
                    return Err(e);
                }
            }
        }
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(body));
            }
            if status.is_client_error() {
                return Err(AppError::BadRequest(format!("HTTP {}: {}", status, body)));
            }
            return Err(AppError::Backend(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("JSON parse error: {}", e)))
    }
}
